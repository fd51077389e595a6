// ----- standard library imports
use std::collections::HashMap;
use std::time::Duration;
// ----- extra library imports
use serde::{Deserialize, Serialize};
// ----- local imports
use crate::hook::HookTimings;
use crate::sources::{default_coin_ids, DEFAULT_COIN_ID};

// ----- end imports

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// one fixed aggregator coin id
    CoinId,
    /// token address on the selected chain
    Spot,
    /// symbol -> aggregator coin id table
    Symbol,
}

/// Which price source serves a form side, per selected symbol.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceRouting {
    pub default: SourceKind,
    #[serde(default)]
    pub overrides: HashMap<String, SourceKind>,
}

impl SourceRouting {
    pub fn resolve(&self, symbol: &str) -> SourceKind {
        self.overrides
            .iter()
            .find(|(candidate, _)| candidate.eq_ignore_ascii_case(symbol))
            .map(|(_, kind)| *kind)
            .unwrap_or(self.default)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Timings {
    /// applies to spot sources only
    pub debounce_ms: u64,
    pub refresh_secs: u64,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            debounce_ms: 300,
            refresh_secs: 30,
        }
    }
}

impl Timings {
    pub fn for_kind(&self, kind: SourceKind) -> HookTimings {
        let debounce = match kind {
            SourceKind::Spot => Duration::from_millis(self.debounce_ms),
            SourceKind::CoinId | SourceKind::Symbol => Duration::ZERO,
        };
        HookTimings {
            debounce,
            refresh: Duration::from_secs(self.refresh_secs),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    pub input: SourceRouting,
    pub output: SourceRouting,
    pub timings: Timings,
    pub coin_id: String,
    /// extra symbol -> coin id entries on top of ETH and TRX
    pub symbols: HashMap<String, String>,
    /// extra network -> symbol -> address entries for the spot source
    pub address_book: HashMap<String, HashMap<String, String>>,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            input: SourceRouting {
                default: SourceKind::Symbol,
                overrides: HashMap::from([(String::from("ETH"), SourceKind::Spot)]),
            },
            output: SourceRouting {
                default: SourceKind::Symbol,
                overrides: HashMap::new(),
            },
            timings: Timings::default(),
            coin_id: String::from(DEFAULT_COIN_ID),
            symbols: HashMap::new(),
            address_book: HashMap::new(),
        }
    }
}

impl FormConfig {
    pub fn coin_ids(&self) -> HashMap<String, String> {
        default_coin_ids()
            .into_iter()
            .chain(
                self.symbols
                    .iter()
                    .map(|(symbol, coin_id)| (symbol.to_uppercase(), coin_id.clone())),
            )
            .collect()
    }
}
