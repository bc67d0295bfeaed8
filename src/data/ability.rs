//! Ability reference data: flat id -> {name, desc} mapping loaded from
//! abils.json. Entities refer to abilities by id only.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::data::catalog::{load_catalog, Catalog, DataError};

pub const ABILITIES_FILE: &str = "abils.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ability {
    pub name: String,
    pub desc: String,
}

pub fn load_abilities(path: &Path) -> Result<Catalog<Ability>, DataError> {
    load_catalog(path, |key, record: Ability| (key.to_string(), record))
}
