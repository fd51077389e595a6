// ----- standard library imports
use std::collections::HashMap;
// ----- extra library imports
// ----- local imports

// ----- end imports

pub const DEFAULT_NETWORK: &str = "ethereum";

const SUPPORTED_NETWORKS: [(&str, &str); 13] = [
    ("ethereum", "1"),
    ("arbitrum", "42161"),
    ("avalanche", "43114"),
    ("bnb", "56"),
    ("gnosis", "100"),
    ("solana", "solana"),
    ("sonic", "146"),
    ("optimism", "10"),
    ("polygon", "137"),
    ("zksync", "324"),
    ("base", "8453"),
    ("linea", "59144"),
    ("unichain", "1301"),
];

/// Network name -> chain identifier understood by the spot price upstream.
/// Names are matched case-insensitively.
#[derive(Debug, Clone)]
pub struct NetworkTable(HashMap<String, String>);

impl NetworkTable {
    pub fn new<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let table = entries
            .into_iter()
            .map(|(name, chain_id)| (name.as_ref().to_lowercase(), chain_id.into()))
            .collect();
        Self(table)
    }

    pub fn chain_id(&self, network: &str) -> Option<&str> {
        self.0.get(&network.to_lowercase()).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for NetworkTable {
    fn default() -> Self {
        Self::new(SUPPORTED_NETWORKS)
    }
}
