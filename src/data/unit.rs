//! Shared unit schema: the base attributes every entity kind (send, tower,
//! wave) carries, plus the weapon sub-record. Kind modules layer their own
//! fields on top of this.

use serde::Deserialize;

/// Weapon stats after load. Damage bounds are rounded to whole numbers;
/// period and range keep their source precision.
#[derive(Debug, Clone, PartialEq)]
pub struct Weapon {
    pub period: f64,
    pub targets: u32,
    pub range: f64,
    pub dmg_min: u32,
    pub dmg_max: u32,
    pub dmg_type: String,
    pub melee: bool,
}

/// Base unit attributes common to every catalog entry. hp/shields/energy are
/// rounded to whole numbers at load; `abilities` holds ability-catalog ids
/// that are only resolved when a reply is formatted.
#[derive(Debug, Clone, PartialEq)]
pub struct Unit {
    pub name: String,
    pub weapon: Weapon,
    pub hp: u32,
    pub shields: u32,
    pub energy: u32,
    pub armor: String,
    pub move_speed: f64,
    pub abilities: Vec<String>,
}

/// Raw JSON shape shared by sends.json, towers.json and waves.json entries.
/// Kind-specific fields live in the kind modules and flatten around this.
#[derive(Debug, Clone, Deserialize)]
pub struct UnitRecord {
    pub name: String,
    pub hp: f64,
    pub shields: f64,
    pub energy: f64,
    pub armor: String,
    pub move_speed: f64,
    #[serde(default)]
    pub abilities: Vec<String>,
    pub wpn: WeaponRecord,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeaponRecord {
    pub period: f64,
    pub targets: u32,
    pub range: f64,
    pub damage: DamageRecord,
    pub melee: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DamageRecord {
    pub min: f64,
    pub max: f64,
    pub dmg_type: String,
}

/// Round a source float to a whole stat. Negative source values clamp to 0;
/// `validate` reports them instead of the loader guessing.
fn round_stat(value: f64) -> u32 {
    value.round() as u32
}

impl WeaponRecord {
    pub fn into_weapon(self) -> Weapon {
        Weapon {
            period: self.period,
            targets: self.targets,
            range: self.range,
            dmg_min: round_stat(self.damage.min),
            dmg_max: round_stat(self.damage.max),
            dmg_type: self.damage.dmg_type,
            melee: self.melee,
        }
    }
}

impl UnitRecord {
    pub fn into_unit(self) -> Unit {
        Unit {
            name: self.name,
            hp: round_stat(self.hp),
            shields: round_stat(self.shields),
            energy: round_stat(self.energy),
            armor: self.armor,
            move_speed: self.move_speed,
            abilities: self.abilities,
            weapon: self.wpn.into_weapon(),
        }
    }
}
