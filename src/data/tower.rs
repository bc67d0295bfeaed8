//! Tower data: defensive structures keyed by lowercased display name in
//! towers.json. `upgrades` and `predecessors` are weak references to other
//! tower keys, resolved only when a reply is formatted.

use std::path::Path;

use serde::Deserialize;

use crate::data::catalog::{load_catalog, Catalog, DataError};
use crate::data::unit::{Unit, UnitRecord};

pub const TOWERS_FILE: &str = "towers.json";

#[derive(Debug, Clone, PartialEq)]
pub struct Tower {
    pub unit: Unit,
    pub builder: String,
    pub tier: String,
    /// Keys of towers this one upgrades into, in menu order.
    pub upgrades: Vec<String>,
    /// Total mineral price including every predecessor, rounded at load.
    pub cost: u32,
    /// Supply cost as stored: negative (the tower consumes supply). The
    /// display layer shows the positive magnitude.
    pub supply: f64,
    /// Keys of towers already paid for on the way here; their totals are
    /// subtracted to get the incremental price.
    pub predecessors: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TowerRecord {
    #[serde(flatten)]
    pub unit: UnitRecord,
    pub builder: String,
    pub tier: String,
    #[serde(default)]
    pub upgrades: Vec<String>,
    pub cost: TowerCostRecord,
    #[serde(default)]
    pub predecessors: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TowerCostRecord {
    pub minerals: f64,
    pub supply: f64,
}

impl TowerRecord {
    pub fn into_tower(self) -> Tower {
        Tower {
            unit: self.unit.into_unit(),
            builder: self.builder,
            tier: self.tier,
            upgrades: self.upgrades,
            cost: self.cost.minerals.round() as u32,
            supply: self.cost.supply,
            predecessors: self.predecessors,
        }
    }
}

pub fn load_towers(path: &Path) -> Result<Catalog<Tower>, DataError> {
    load_catalog(path, |key, record: TowerRecord| {
        (key.to_string(), record.into_tower())
    })
}
