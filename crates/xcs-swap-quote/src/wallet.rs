// ----- standard library imports
// ----- extra library imports
use serde::Deserialize;
// ----- local imports

// ----- end imports

/// Connected wallet, as far as the swap form cares.
pub trait Wallet: Send + Sync {
    fn address(&self) -> Option<String>;
    /// spendable balance of the source token, in whole units
    fn balance(&self) -> Option<f64>;
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StaticWallet {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub balance: Option<f64>,
}

impl StaticWallet {
    pub fn connected(address: impl Into<String>, balance: f64) -> Self {
        Self {
            address: Some(address.into()),
            balance: Some(balance),
        }
    }
}

impl Wallet for StaticWallet {
    fn address(&self) -> Option<String> {
        self.address.clone()
    }

    fn balance(&self) -> Option<f64> {
        self.balance
    }
}
