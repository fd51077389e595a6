// ----- standard library imports
use std::collections::HashMap;
// ----- extra library imports
// ----- local imports

// ----- end imports

pub const NATIVE_TOKEN: &str = "0xeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeee";

const KNOWN_TOKENS: [(&str, &str, &str); 8] = [
    ("ethereum", "ETH", NATIVE_TOKEN),
    ("ethereum", "WETH", "0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2"),
    ("ethereum", "USDT", "0xdac17f958d2ee523a2206206994597c13d831ec7"),
    ("ethereum", "USDC", "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48"),
    ("arbitrum", "ETH", NATIVE_TOKEN),
    ("arbitrum", "WETH", "0x82af49447d8a07e3bd95bd0d56f35241523fbab1"),
    ("polygon", "MATIC", NATIVE_TOKEN),
    ("polygon", "WETH", "0x7ceb23fd6bc0add59e62ac25578270cff1b9f619"),
];

/// network -> token symbol -> token contract address
#[derive(Debug, Clone)]
pub struct TokenAddressBook(HashMap<String, HashMap<String, String>>);

impl TokenAddressBook {
    pub fn new<I, N, S, A>(entries: I) -> Self
    where
        I: IntoIterator<Item = (N, S, A)>,
        N: AsRef<str>,
        S: AsRef<str>,
        A: Into<String>,
    {
        let mut book: HashMap<String, HashMap<String, String>> = HashMap::new();
        for (network, symbol, address) in entries {
            book.entry(network.as_ref().to_lowercase())
                .or_default()
                .insert(symbol.as_ref().to_uppercase(), address.into());
        }
        Self(book)
    }

    /// built-in entries overlaid with `extra`
    pub fn with_overrides(extra: &HashMap<String, HashMap<String, String>>) -> Self {
        let mut book = Self::default();
        for (network, tokens) in extra {
            let slot = book.0.entry(network.to_lowercase()).or_default();
            for (symbol, address) in tokens {
                slot.insert(symbol.to_uppercase(), address.clone());
            }
        }
        book
    }

    pub fn address(&self, symbol: &str, network: &str) -> Option<&str> {
        self.0
            .get(&network.to_lowercase())?
            .get(&symbol.to_uppercase())
            .map(String::as_str)
    }
}

impl Default for TokenAddressBook {
    fn default() -> Self {
        Self::new(KNOWN_TOKENS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_ignores_case() {
        let book = TokenAddressBook::default();
        assert_eq!(book.address("eth", "Ethereum"), Some(NATIVE_TOKEN));
        assert_eq!(
            book.address("WETH", "ARBITRUM"),
            Some("0x82af49447d8a07e3bd95bd0d56f35241523fbab1")
        );
    }

    #[test]
    fn lookup_misses() {
        let book = TokenAddressBook::default();
        assert_eq!(book.address("TRX", "ethereum"), None);
        assert_eq!(book.address("ETH", "tron"), None);
    }

    #[test]
    fn overrides_extend_builtin_entries() {
        let extra = HashMap::from([(
            String::from("Base"),
            HashMap::from([(String::from("eth"), String::from(NATIVE_TOKEN))]),
        )]);
        let book = TokenAddressBook::with_overrides(&extra);
        assert_eq!(book.address("ETH", "base"), Some(NATIVE_TOKEN));
        assert_eq!(book.address("ETH", "ethereum"), Some(NATIVE_TOKEN));
    }
}
