//! One query end to end: pick the catalog, resolve the name, format the
//! reply. Shared by the CLI verbs and the HTTP handlers.

use tracing::error;

use crate::data::registry::GameData;
use crate::lookup;
use crate::reply::{self, LookupError, Reply, WaveOptions};

/// Which catalog a query runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Send,
    Tower,
    Wave,
}

impl EntityKind {
    /// Similarity cutoff for the fuzzy fallback. Towers tolerate rougher
    /// queries since their names are short and players abbreviate them.
    pub fn cutoff(&self) -> f64 {
        match self {
            Self::Send | Self::Wave => 0.70,
            Self::Tower => 0.55,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Send => "send",
            Self::Tower => "tower",
            Self::Wave => "wave",
        }
    }

    pub fn parse(value: &str) -> Option<EntityKind> {
        match value {
            "send" => Some(Self::Send),
            "tower" => Some(Self::Tower),
            "wave" => Some(Self::Wave),
            _ => None,
        }
    }
}

/// A single lookup: the kind, the free-text query, and the wave display
/// flags (ignored for sends and towers).
#[derive(Debug, Clone)]
pub struct LookupRequest {
    pub kind: EntityKind,
    pub query: String,
    pub wave_options: WaveOptions,
}

impl LookupRequest {
    pub fn new(kind: EntityKind, query: impl Into<String>) -> LookupRequest {
        LookupRequest {
            kind,
            query: query.into(),
            wave_options: WaveOptions::default(),
        }
    }
}

/// Outcome of a query that did not hit an internal error. NotFound is the
/// normal miss path and carries the user-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    Found(Reply),
    NotFound(String),
}

/// Resolve and format one query. `Err` means a resolved entity referenced
/// a key its catalog does not have; that is logged here because it needs a
/// data fix, not a retyped query.
pub fn lookup(data: &GameData, request: &LookupRequest) -> Result<LookupOutcome, LookupError> {
    let cutoff = request.kind.cutoff();
    let result = match request.kind {
        EntityKind::Send => lookup::resolve(&data.sends, &request.query, cutoff)
            .and_then(|key| data.sends.get(key))
            .map(|send| reply::send_reply(send, &data.abilities)),
        EntityKind::Tower => lookup::resolve(&data.towers, &request.query, cutoff)
            .and_then(|key| data.towers.get(key))
            .map(|tower| reply::tower_reply(tower, &data.towers, &data.abilities)),
        EntityKind::Wave => lookup::resolve(&data.waves, &request.query, cutoff)
            .and_then(|key| data.waves.get(key))
            .map(|wave| reply::wave_reply(wave, &data.abilities, request.wave_options)),
    };

    match result {
        Some(Ok(reply)) => Ok(LookupOutcome::Found(reply)),
        Some(Err(err)) => {
            error!(
                kind = request.kind.label(),
                query = %request.query,
                error = %err,
                "catalog reference missing while formatting reply"
            );
            Err(err)
        }
        // The not-found message names the query as typed, not normalized.
        None => Ok(LookupOutcome::NotFound(format!(
            "There is no {} named **{}**",
            request.kind.label(),
            request.query
        ))),
    }
}
