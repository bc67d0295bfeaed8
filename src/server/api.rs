use std::fmt;
use std::fs;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::data::registry::GameData;
use crate::query::{self, EntityKind, LookupOutcome, LookupRequest};
use crate::reply::WaveOptions;

pub fn health_payload() -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&serde_json::json!({
        "status": "ok",
        "service": "adjutant-api",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

#[derive(Debug, Clone, Serialize)]
pub struct SendListItem {
    pub key: String,
    pub name: String,
    pub cost: u32,
}

pub fn sends_payload(data: &GameData) -> Result<String, serde_json::Error> {
    let list: Vec<SendListItem> = data
        .sends
        .iter()
        .map(|(key, send)| SendListItem {
            key: key.to_string(),
            name: send.unit.name.clone(),
            cost: send.cost,
        })
        .collect();
    serde_json::to_string_pretty(&serde_json::json!({ "sends": list }))
}

#[derive(Debug, Clone, Serialize)]
pub struct TowerListItem {
    pub key: String,
    pub name: String,
    pub builder: String,
    pub tier: String,
    pub cost: u32,
}

pub fn towers_payload(data: &GameData) -> Result<String, serde_json::Error> {
    let list: Vec<TowerListItem> = data
        .towers
        .iter()
        .map(|(key, tower)| TowerListItem {
            key: key.to_string(),
            name: tower.unit.name.clone(),
            builder: tower.builder.clone(),
            tier: tower.tier.clone(),
            cost: tower.cost,
        })
        .collect();
    serde_json::to_string_pretty(&serde_json::json!({ "towers": list }))
}

#[derive(Debug, Clone, Serialize)]
pub struct WaveListItem {
    pub index: u32,
    pub name: String,
    pub count: u32,
}

pub fn waves_payload(data: &GameData) -> Result<String, serde_json::Error> {
    let list: Vec<WaveListItem> = data
        .waves
        .iter()
        .map(|(_, wave)| WaveListItem {
            index: wave.index,
            name: wave.unit.name.clone(),
            count: wave.count,
        })
        .collect();
    serde_json::to_string_pretty(&serde_json::json!({ "waves": list }))
}

#[derive(Debug, Clone, Serialize)]
pub struct AbilityListItem {
    pub id: String,
    pub name: String,
}

pub fn abilities_payload(data: &GameData) -> Result<String, serde_json::Error> {
    let list: Vec<AbilityListItem> = data
        .abilities
        .iter()
        .map(|(id, ability)| AbilityListItem {
            id: id.to_string(),
            name: ability.name.clone(),
        })
        .collect();
    serde_json::to_string_pretty(&serde_json::json!({ "abilities": list }))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupPayloadError {
    /// Missing or malformed query parameters.
    BadRequest(String),
    /// No entity matched; carries the user-facing message.
    NotFound(String),
    /// Dangling catalog reference or serialization failure.
    Internal(String),
}

impl fmt::Display for LookupPayloadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadRequest(message) => write!(f, "bad request: {message}"),
            Self::NotFound(message) => write!(f, "{message}"),
            Self::Internal(message) => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for LookupPayloadError {}

/// Handle `/api/lookup?kind=<send|tower|wave>&q=<name>[&non_adr=1][&x1=1]`.
pub fn lookup_payload(data: &GameData, path: &str) -> Result<String, LookupPayloadError> {
    let kind_raw = query_param(path, "kind")
        .ok_or_else(|| LookupPayloadError::BadRequest("missing 'kind' parameter".to_string()))?;
    let kind = EntityKind::parse(&kind_raw)
        .ok_or_else(|| LookupPayloadError::BadRequest(format!("unknown kind '{kind_raw}'")))?;
    let raw_query = query_param(path, "q")
        .ok_or_else(|| LookupPayloadError::BadRequest("missing 'q' parameter".to_string()))?;

    let request = LookupRequest {
        kind,
        query: raw_query,
        wave_options: WaveOptions {
            non_adr: flag_param(path, "non_adr"),
            x1: flag_param(path, "x1"),
        },
    };

    match query::lookup(data, &request) {
        Ok(LookupOutcome::Found(reply)) => {
            serde_json::to_string_pretty(&serde_json::json!({ "status": "ok", "reply": reply }))
                .map_err(|err| LookupPayloadError::Internal(err.to_string()))
        }
        Ok(LookupOutcome::NotFound(message)) => Err(LookupPayloadError::NotFound(message)),
        Err(err) => Err(LookupPayloadError::Internal(err.to_string())),
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CatalogStatus {
    pub file: &'static str,
    pub entries: usize,
    /// RFC 3339 mtime of the backing file, when the file is readable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified: Option<String>,
}

pub fn data_status_payload(data: &GameData) -> Result<String, serde_json::Error> {
    let entry_counts = [
        data.abilities.len(),
        data.sends.len(),
        data.towers.len(),
        data.waves.len(),
    ];
    let catalogs: Vec<CatalogStatus> = data
        .catalog_paths()
        .into_iter()
        .zip(entry_counts)
        .map(|((file, path), entries)| CatalogStatus {
            file,
            entries,
            modified: fs::metadata(&path)
                .and_then(|meta| meta.modified())
                .ok()
                .map(|mtime| DateTime::<Utc>::from(mtime).to_rfc3339()),
        })
        .collect();

    serde_json::to_string_pretty(&serde_json::json!({
        "data_dir": data.data_dir.display().to_string(),
        "catalogs": catalogs
    }))
}

/// Value of one query-string parameter, percent-decoded.
fn query_param(path: &str, name: &str) -> Option<String> {
    let query = path.split('?').nth(1)?;
    for pair in query.split('&') {
        let mut parts = pair.splitn(2, '=');
        if parts.next() == Some(name) {
            return Some(percent_decode(parts.next().unwrap_or("")));
        }
    }
    None
}

/// True when the parameter is present as `name=1` or `name=true`.
fn flag_param(path: &str, name: &str) -> bool {
    query_param(path, name)
        .map(|value| value == "1" || value.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

fn percent_decode(raw: &str) -> String {
    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b'%' if i + 2 < bytes.len() => {
                let hex = std::str::from_utf8(&bytes[i + 1..i + 3])
                    .ok()
                    .and_then(|pair| u8::from_str_radix(pair, 16).ok());
                match hex {
                    Some(byte) => {
                        out.push(byte);
                        i += 3;
                    }
                    None => {
                        out.push(b'%');
                        i += 1;
                    }
                }
            }
            other => {
                out.push(other);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}
