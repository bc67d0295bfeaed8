//! Send data: attacker units players pay vespene to send at an opponent.
//! Keyed by lowercased display name in sends.json.

use std::path::Path;

use serde::Deserialize;

use crate::data::catalog::{load_catalog, Catalog, DataError};
use crate::data::unit::{Unit, UnitRecord};

pub const SENDS_FILE: &str = "sends.json";

#[derive(Debug, Clone, PartialEq)]
pub struct Send {
    pub unit: Unit,
    /// Minerals the opponent earns per kill.
    pub bounty: f64,
    /// Income granted to the sender.
    pub income: f64,
    /// Vespene price, rounded at load.
    pub cost: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SendRecord {
    #[serde(flatten)]
    pub unit: UnitRecord,
    pub bounty: f64,
    pub income: f64,
    pub cost: SendCostRecord,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SendCostRecord {
    pub vespene: f64,
}

impl SendRecord {
    pub fn into_send(self) -> Send {
        Send {
            unit: self.unit.into_unit(),
            bounty: self.bounty,
            income: self.income,
            cost: self.cost.vespene.round() as u32,
        }
    }
}

pub fn load_sends(path: &Path) -> Result<Catalog<Send>, DataError> {
    load_catalog(path, |key, record: SendRecord| {
        (key.to_string(), record.into_send())
    })
}
