//! Game-entity lookup for Squadron TD: loads the send/tower/wave/ability
//! catalogs, resolves free-text names against them, and formats replies.

pub mod cli;
pub mod data;
pub mod lookup;
pub mod query;
pub mod reply;
pub mod server;
