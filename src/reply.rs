//! Formats resolved entities into structured replies.
//!
//! A reply is markdown-ish text split into title, short description, and
//! body, so the delivery channel (CLI, HTTP) can lay it out however it
//! wants. The line formats here are load-bearing: downstream consumers
//! parse the bold/underline markers, so spacing quirks like the one after
//! "**Cost: **" stay as they are.

use std::fmt;

use serde::Serialize;

use crate::data::ability::Ability;
use crate::data::catalog::Catalog;
use crate::data::send::Send;
use crate::data::tower::Tower;
use crate::data::unit::Unit;
use crate::data::wave::Wave;

/// A formatted reply for one resolved entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reply {
    pub title: String,
    pub description: String,
    pub body: String,
}

/// A resolved entity referenced a key missing from its catalog. This is a
/// data authoring bug surfaced as an internal error, never a user error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    MissingAbility { id: String },
    MissingPredecessor { key: String },
    MissingUpgrade { key: String },
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingAbility { id } => write!(f, "unknown ability '{id}'"),
            Self::MissingPredecessor { key } => write!(f, "unknown predecessor tower '{key}'"),
            Self::MissingUpgrade { key } => write!(f, "unknown upgrade tower '{key}'"),
        }
    }
}

impl std::error::Error for LookupError {}

/// Display flags for wave replies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WaveOptions {
    /// Show raw stats instead of adrenaline-scaled ones.
    pub non_adr: bool,
    /// Show the 1x-difficulty count instead of the stored 3x count.
    pub x1: bool,
}

/// Render ability references as `**name**: desc` lines joined by newlines,
/// in listed order.
pub fn format_abilities(
    ids: &[String],
    abilities: &Catalog<Ability>,
) -> Result<String, LookupError> {
    let mut out = String::new();
    for (position, id) in ids.iter().enumerate() {
        let ability = abilities
            .get(id)
            .ok_or_else(|| LookupError::MissingAbility { id: id.clone() })?;
        if position > 0 {
            out.push('\n');
        }
        out.push_str(&format!("**{}**: {}", ability.name, ability.desc));
    }
    Ok(out)
}

/// Cost of buying this tower given its predecessors are already built:
/// total cost minus every predecessor's total cost.
pub fn incremental_cost(tower: &Tower, towers: &Catalog<Tower>) -> Result<i64, LookupError> {
    let mut cost = i64::from(tower.cost);
    for key in &tower.predecessors {
        let predecessor = towers
            .get(key)
            .ok_or_else(|| LookupError::MissingPredecessor { key: key.clone() })?;
        cost -= i64::from(predecessor.cost);
    }
    Ok(cost)
}

fn upgrade_names(tower: &Tower, towers: &Catalog<Tower>) -> Result<String, LookupError> {
    let mut out = String::new();
    for (position, key) in tower.upgrades.iter().enumerate() {
        let upgrade = towers
            .get(key)
            .ok_or_else(|| LookupError::MissingUpgrade { key: key.clone() })?;
        if position > 0 {
            out.push_str(", ");
        }
        out.push_str(&upgrade.unit.name);
    }
    Ok(out)
}

/// The stats shown in the Speed/HP/Weapon lines. Waves swap in adrenaline
/// values; everything else shows the unit raw.
struct StatBlock {
    move_speed: f64,
    hp: u32,
    shields: u32,
    energy: u32,
    dmg_min: u32,
    dmg_max: u32,
    period: f64,
    range: f64,
}

impl StatBlock {
    fn raw(unit: &Unit) -> StatBlock {
        StatBlock {
            move_speed: unit.move_speed,
            hp: unit.hp,
            shields: unit.shields,
            energy: unit.energy,
            dmg_min: unit.weapon.dmg_min,
            dmg_max: unit.weapon.dmg_max,
            period: unit.weapon.period,
            range: unit.weapon.range,
        }
    }

    /// Adrenaline-scaled hp, damage, and period. Range is never scaled.
    fn adrenaline(wave: &Wave) -> StatBlock {
        StatBlock {
            move_speed: wave.unit.move_speed,
            hp: wave.adrenaline_hp(),
            shields: wave.unit.shields,
            energy: wave.unit.energy,
            dmg_min: wave.adrenaline_dmg_min(),
            dmg_max: wave.adrenaline_dmg_max(),
            period: wave.adrenaline_period(),
            range: wave.unit.weapon.range,
        }
    }
}

fn push_stat_lines(body: &mut String, stats: &StatBlock) {
    body.push_str(&format!("**Speed: **{}\n", stats.move_speed));
    body.push_str(&format!("**HP: **{}\n", stats.hp));
    if stats.shields > 0 {
        body.push_str(&format!("**Shields: **{}\n", stats.shields));
    }
    if stats.energy > 0 {
        body.push_str(&format!("**Energy: **{}\n", stats.energy));
    }
    body.push_str("\n__**Weapon**__\n");
    body.push_str(&format!("**Damage: **{}-{}\n", stats.dmg_min, stats.dmg_max));
    body.push_str(&format!("**Attack Speed: **{}\n", stats.period));
    body.push_str(&format!("**Range: **{}\n", stats.range));
}

fn push_ability_block(
    body: &mut String,
    unit: &Unit,
    abilities: &Catalog<Ability>,
) -> Result<(), LookupError> {
    if unit.abilities.is_empty() {
        return Ok(());
    }
    body.push_str("\n__**Abilities**__\n");
    body.push_str(&format_abilities(&unit.abilities, abilities)?);
    Ok(())
}

pub fn send_reply(send: &Send, abilities: &Catalog<Ability>) -> Result<Reply, LookupError> {
    let mut body = String::from("__**Basic Info**__\n");
    body.push_str(&format!("**Cost: ** {} vespene\n", send.cost));
    body.push_str(&format!("**Bounty: **{} minerals\n", send.bounty));
    body.push_str(&format!("**Income: **{}\n", send.income));
    push_stat_lines(&mut body, &StatBlock::raw(&send.unit));
    push_ability_block(&mut body, &send.unit, abilities)?;

    Ok(Reply {
        title: send.unit.name.clone(),
        description: format!("*Send\n{}, {}*", send.unit.armor, send.unit.weapon.dmg_type),
        body,
    })
}

pub fn tower_reply(
    tower: &Tower,
    towers: &Catalog<Tower>,
    abilities: &Catalog<Ability>,
) -> Result<Reply, LookupError> {
    let mut body = String::from("__**Basic Info**__\n");
    body.push_str(&format!(
        "**Cost: ** {} minerals\n",
        incremental_cost(tower, towers)?
    ));
    body.push_str(&format!("**Total Cost: ** {} minerals\n", tower.cost));
    // Supply costs are stored negative; show the magnitude.
    body.push_str(&format!("**Supply: ** {}\n", -tower.supply));
    push_stat_lines(&mut body, &StatBlock::raw(&tower.unit));
    push_ability_block(&mut body, &tower.unit, abilities)?;
    if !tower.upgrades.is_empty() {
        body.push_str("\n\n__**Upgrades:**__ ");
        body.push_str(&upgrade_names(tower, towers)?);
    }

    Ok(Reply {
        title: tower.unit.name.clone(),
        description: format!(
            "*{}, Tier {}\n{}, {}*",
            tower.builder, tower.tier, tower.unit.armor, tower.unit.weapon.dmg_type
        ),
        body,
    })
}

pub fn wave_reply(
    wave: &Wave,
    abilities: &Catalog<Ability>,
    options: WaveOptions,
) -> Result<Reply, LookupError> {
    let mode = if options.non_adr {
        "Non-adrenaline"
    } else {
        "Adrenaline"
    };
    let count_label = if options.x1 { "1x" } else { "3x" };
    let count = if options.x1 { wave.count_1x() } else { wave.count };
    let stats = if options.non_adr {
        StatBlock::raw(&wave.unit)
    } else {
        StatBlock::adrenaline(wave)
    };

    let mut body = String::from("__**Basic Info**__\n");
    body.push_str(&format!("**Count ({count_label}): **{count}\n"));
    body.push_str(&format!("**Bounty: **{} minerals\n", wave.bounty));
    push_stat_lines(&mut body, &stats);
    push_ability_block(&mut body, &wave.unit, abilities)?;

    Ok(Reply {
        title: format!("Wave {} ({mode})", wave.index),
        description: format!(
            "*{}\n{}, {}*",
            wave.unit.name, wave.unit.armor, wave.unit.weapon.dmg_type
        ),
        body,
    })
}
