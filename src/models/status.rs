//! Canonical order lifecycle states and per-exchange status tables.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::normalize::raw_status;

/// Exchange-independent order state.
///
/// Every normalized result carries one of these four. Each value is a
/// snapshot of a single raw response; nothing here tracks transitions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Accepted and waiting (open, new, live, pending).
    #[default]
    Ongoing,
    PartialFilled,
    Filled,
    Cancelled,
}

impl OrderStatus {
    /// Returns the wire-format name used in plain objects.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Ongoing => "ongoing",
            OrderStatus::PartialFilled => "partial_filled",
            OrderStatus::Filled => "filled",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One exchange's raw-status → [`OrderStatus`] table.
///
/// Keys are lowercase; lookups lower-case the raw value first.
#[derive(Debug, Clone, Copy)]
pub struct StatusVocabulary {
    entries: &'static [(&'static str, OrderStatus)],
}

impl StatusVocabulary {
    /// Wraps a static table.
    pub const fn new(entries: &'static [(&'static str, OrderStatus)]) -> Self {
        Self { entries }
    }

    /// Exact (case-insensitive) lookup without defaulting.
    pub fn lookup(&self, raw: &str) -> Option<OrderStatus> {
        let key = raw.trim().to_ascii_lowercase();
        self.find(&key).or_else(|| {
            // Bitfinex appends fill details: "EXECUTED @ 107.6(-0.2)".
            let head = key.split(" @").next()?.trim_end();
            if head.len() == key.len() {
                None
            } else {
                self.find(head)
            }
        })
    }

    fn find(&self, key: &str) -> Option<OrderStatus> {
        self.entries
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, status)| *status)
    }

    /// Maps a raw status, defaulting to `Ongoing` for anything unknown.
    pub fn map_status(&self, raw: &str) -> OrderStatus {
        self.lookup(raw).unwrap_or_default()
    }

    /// Locates the status field of a raw order response and maps it.
    ///
    /// Responses without any status field are `Ongoing`.
    pub fn status_of(&self, raw: &Value) -> OrderStatus {
        raw_status(raw)
            .map(|status| self.map_status(&status))
            .unwrap_or_default()
    }

    /// Raw names mapped to `status`.
    pub fn names_for(&self, status: OrderStatus) -> impl Iterator<Item = &'static str> + '_ {
        self.entries
            .iter()
            .filter(move |(_, mapped)| *mapped == status)
            .map(|(name, _)| *name)
    }
}

/// Maps a raw status string through an exchange's table.
pub fn map_status(raw: &str, vocabulary: &StatusVocabulary) -> OrderStatus {
    vocabulary.map_status(raw)
}
