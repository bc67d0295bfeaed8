//! Wave data: the enemy groups that spawn each round, loaded from
//! waves.json. Unlike sends and towers, the catalog key is the string form
//! of the wave's `index`, not the raw JSON key, so `/wave 12` resolves
//! without knowing how the file labels its records.

use std::path::Path;

use serde::Deserialize;

use crate::data::catalog::{load_catalog, Catalog, DataError};
use crate::data::unit::{Unit, UnitRecord};

pub const WAVES_FILE: &str = "waves.json";

/// Adrenaline makes hp and damage grow linearly with wave index:
/// `stat * (1 + 0.02 * index)`.
pub const ADRENALINE_STAT_GROWTH: f64 = 0.02;

/// Adrenaline makes attacks geometrically faster: `period / 1.01^index`.
pub const ADRENALINE_SPEED_BASE: f64 = 1.01;

/// Stored counts are for 3x difficulty; divide to show 1x.
pub const COUNT_DIFFICULTY_FACTOR: f64 = 3.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Wave {
    pub unit: Unit,
    /// Wave number; the adrenaline scaling exponent.
    pub index: u32,
    /// Minerals earned per kill.
    pub bounty: f64,
    /// Enemy count at 3x difficulty.
    pub count: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WaveRecord {
    #[serde(flatten)]
    pub unit: UnitRecord,
    pub index: u32,
    pub bounty: f64,
    pub count: u32,
}

impl WaveRecord {
    pub fn into_wave(self) -> Wave {
        Wave {
            unit: self.unit.into_unit(),
            index: self.index,
            bounty: self.bounty,
            count: self.count,
        }
    }
}

impl Wave {
    fn adrenaline_factor(&self) -> f64 {
        1.0 + ADRENALINE_STAT_GROWTH * f64::from(self.index)
    }

    pub fn adrenaline_hp(&self) -> u32 {
        (f64::from(self.unit.hp) * self.adrenaline_factor()).round() as u32
    }

    pub fn adrenaline_dmg_min(&self) -> u32 {
        (f64::from(self.unit.weapon.dmg_min) * self.adrenaline_factor()).round() as u32
    }

    pub fn adrenaline_dmg_max(&self) -> u32 {
        (f64::from(self.unit.weapon.dmg_max) * self.adrenaline_factor()).round() as u32
    }

    /// Attack period under adrenaline, rounded to two decimals.
    pub fn adrenaline_period(&self) -> f64 {
        let scaled = self.unit.weapon.period / ADRENALINE_SPEED_BASE.powi(self.index as i32);
        (scaled * 100.0).round() / 100.0
    }

    /// Enemy count at 1x difficulty.
    pub fn count_1x(&self) -> u32 {
        (f64::from(self.count) / COUNT_DIFFICULTY_FACTOR).round() as u32
    }
}

pub fn load_waves(path: &Path) -> Result<Catalog<Wave>, DataError> {
    load_catalog(path, |_key, record: WaveRecord| {
        let key = record.index.to_string();
        (key, record.into_wave())
    })
}
