//! Startup-loaded registry of all game catalogs.
//! Load once at startup, pass via Arc to handlers so requests never touch disk.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use crate::data::ability::{load_abilities, Ability, ABILITIES_FILE};
use crate::data::catalog::{Catalog, DataError};
use crate::data::send::{load_sends, Send, SENDS_FILE};
use crate::data::tower::{load_towers, Tower, TOWERS_FILE};
use crate::data::wave::{load_waves, Wave, WAVES_FILE};

pub const DEFAULT_DATA_DIR: &str = "data";
pub const DATA_DIR_ENV: &str = "ADJUTANT_DATA_DIR";

/// Data directory from ADJUTANT_DATA_DIR, falling back to ./data.
pub fn default_data_dir() -> PathBuf {
    std::env::var_os(DATA_DIR_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
}

/// Read-only game data loaded once at startup. Any catalog failing to load
/// is a startup error; there is no partial registry.
#[derive(Debug)]
pub struct GameData {
    pub abilities: Catalog<Ability>,
    pub sends: Catalog<Send>,
    pub towers: Catalog<Tower>,
    pub waves: Catalog<Wave>,
    /// Directory the catalogs were loaded from, kept for status reporting.
    pub data_dir: PathBuf,
}

impl GameData {
    /// Load all four catalogs from `dir`.
    pub fn load_from_dir(dir: &Path) -> Result<GameData, DataError> {
        let abilities = load_abilities(&dir.join(ABILITIES_FILE))?;
        debug!(count = abilities.len(), "loaded ability catalog");
        let sends = load_sends(&dir.join(SENDS_FILE))?;
        debug!(count = sends.len(), "loaded send catalog");
        let towers = load_towers(&dir.join(TOWERS_FILE))?;
        debug!(count = towers.len(), "loaded tower catalog");
        let waves = load_waves(&dir.join(WAVES_FILE))?;
        debug!(count = waves.len(), "loaded wave catalog");

        Ok(GameData {
            abilities,
            sends,
            towers,
            waves,
            data_dir: dir.to_path_buf(),
        })
    }

    /// Load from the default data directory. Returns an Arc so the registry
    /// can be shared across server threads.
    pub fn load() -> Result<Arc<GameData>, DataError> {
        let dir = default_data_dir();
        Ok(Arc::new(GameData::load_from_dir(&dir)?))
    }

    /// Paths of the catalog files backing this registry, for status reporting.
    pub fn catalog_paths(&self) -> [(&'static str, PathBuf); 4] {
        [
            (ABILITIES_FILE, self.data_dir.join(ABILITIES_FILE)),
            (SENDS_FILE, self.data_dir.join(SENDS_FILE)),
            (TOWERS_FILE, self.data_dir.join(TOWERS_FILE)),
            (WAVES_FILE, self.data_dir.join(WAVES_FILE)),
        ]
    }
}
