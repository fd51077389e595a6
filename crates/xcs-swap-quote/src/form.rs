// ----- standard library imports
use std::collections::HashMap;
use std::sync::Arc;
// ----- extra library imports
use tokio::sync::watch;
// ----- local imports
use crate::config::{FormConfig, SourceKind};
use crate::hook::{QuoteFeed, SourceFeed};
use crate::model::{PriceQuote, TokenSelection};
use crate::quote::{derive_output_amount, positive_amount, usd_value};
use crate::relay::PriceRelay;
use crate::sources::{CoinIdSource, SpotPriceSource, SymbolPriceSource, TokenAddressBook};
use crate::validation::{check_insufficient_funds, validate_amount_text};
use crate::wallet::Wallet;

// ----- end imports

/// destination prices are unit prices whatever the derived amount is
const UNIT_AMOUNT: &str = "1";

#[derive(Debug, Clone, PartialEq)]
pub enum PriceStatus {
    Fetching,
    Unavailable,
    /// USD estimate, formatted `~$x.xx`
    Estimate(String),
}

impl std::fmt::Display for PriceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PriceStatus::Fetching => write!(f, "Fetching price..."),
            PriceStatus::Unavailable => write!(f, "Price unavailable"),
            PriceStatus::Estimate(estimate) => write!(f, "{estimate}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapButton {
    ConnectWallet,
    InsufficientFunds,
    Swap { enabled: bool },
}

impl std::fmt::Display for SwapButton {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SwapButton::ConnectWallet => write!(f, "Connect Wallet"),
            SwapButton::InsufficientFunds => write!(f, "Insufficient Funds"),
            SwapButton::Swap { .. } => write!(f, "Swap"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SideView {
    pub selection: TokenSelection,
    pub price: PriceStatus,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SwapView {
    pub from: SideView,
    pub to: SideView,
    pub input_error: Option<String>,
    pub button: SwapButton,
}

/// What would be submitted; nothing is ever executed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapRequest {
    pub wallet: String,
    pub from: TokenSelection,
    pub to: TokenSelection,
}

struct Feed {
    kind: SourceKind,
    feed: Box<dyn QuoteFeed>,
    updates: watch::Receiver<PriceQuote>,
}

struct FeedFactory {
    cfg: FormConfig,
    relay: Arc<dyn PriceRelay>,
    book: TokenAddressBook,
    coin_ids: HashMap<String, String>,
}

impl FeedFactory {
    fn mount(&self, kind: SourceKind, selection: &TokenSelection) -> Feed {
        let timings = self.cfg.timings.for_kind(kind);
        let relay = self.relay.clone();
        let feed: Box<dyn QuoteFeed> = match kind {
            SourceKind::CoinId => Box::new(SourceFeed::mount(
                CoinIdSource::new(relay, self.cfg.coin_id.clone()),
                selection,
                timings,
            )),
            SourceKind::Spot => Box::new(SourceFeed::mount(
                SpotPriceSource::new(relay, self.book.clone()),
                selection,
                timings,
            )),
            SourceKind::Symbol => Box::new(SourceFeed::mount(
                SymbolPriceSource::new(relay, &self.coin_ids),
                selection,
                timings,
            )),
        };
        let updates = feed.subscribe();
        Feed {
            kind,
            feed,
            updates,
        }
    }
}

/// Headless swap box: two token selections, one price feed per side and
/// the derived destination amount.
///
/// Must be created inside a tokio runtime; feeds are torn down when the
/// form is dropped.
pub struct SwapForm {
    factory: FeedFactory,
    wallet: Arc<dyn Wallet>,
    from: TokenSelection,
    to: TokenSelection,
    input_error: Option<String>,
    input: Feed,
    output: Feed,
}

impl SwapForm {
    pub fn new(
        cfg: FormConfig,
        relay: Arc<dyn PriceRelay>,
        wallet: Arc<dyn Wallet>,
        from: TokenSelection,
        to: TokenSelection,
    ) -> Self {
        let factory = FeedFactory {
            book: TokenAddressBook::with_overrides(&cfg.address_book),
            coin_ids: cfg.coin_ids(),
            relay,
            cfg,
        };
        let from = TokenSelection {
            amount: validate_amount_text(&from.amount, ""),
            ..from
        };
        let to = TokenSelection {
            amount: String::new(),
            ..to
        };
        let input_error = check_insufficient_funds(&from.amount, wallet.balance());
        let input = factory.mount(factory.cfg.input.resolve(&from.symbol), &from);
        let output = factory.mount(factory.cfg.output.resolve(&to.symbol), &unit_probe(&to));
        Self {
            factory,
            wallet,
            from,
            to,
            input_error,
            input,
            output,
        }
    }

    pub fn from(&self) -> &TokenSelection {
        &self.from
    }

    pub fn to(&self) -> &TokenSelection {
        &self.to
    }

    pub fn input_error(&self) -> Option<&str> {
        self.input_error.as_deref()
    }

    pub fn input_quote(&self) -> PriceQuote {
        self.input.feed.quote()
    }

    pub fn output_quote(&self) -> PriceQuote {
        self.output.feed.quote()
    }

    pub fn input_source(&self) -> SourceKind {
        self.input.kind
    }

    pub fn output_source(&self) -> SourceKind {
        self.output.kind
    }

    /// Keystroke on the source amount: filter, balance guard, then retarget.
    pub fn handle_amount_change(&mut self, value: &str) {
        let validated = validate_amount_text(value, &self.from.amount);
        self.input_error = check_insufficient_funds(&validated, self.wallet.balance());
        if validated.is_empty() {
            self.to.amount.clear();
        }
        self.from.amount = validated;
        self.retarget();
        self.recompute();
    }

    pub fn select_from_token(&mut self, symbol: &str, chain: &str) {
        self.from.symbol = symbol.to_owned();
        self.from.chain = chain.to_owned();
        self.to.amount.clear();
        self.retarget();
    }

    pub fn select_to_token(&mut self, symbol: &str) {
        self.to.symbol = symbol.to_owned();
        self.to.amount.clear();
        self.retarget();
    }

    pub fn switch_direction(&mut self) {
        tracing::debug!("switching direction {:?} <-> {:?}", self.from, self.to);
        std::mem::swap(&mut self.from, &mut self.to);
        self.to.amount.clear();
        self.input_error = check_insufficient_funds(&self.from.amount, self.wallet.balance());
        self.retarget();
    }

    /// Derives the destination amount from the latest prices.
    ///
    /// Skipped while either side is loading; a side without a price yields
    /// `"0.00"`. Returns whether the destination amount changed.
    pub fn recompute(&mut self) -> bool {
        if self.from.amount.is_empty() {
            return false;
        }
        let input = self.input.feed.quote();
        let output = self.output.feed.quote();
        if input.loading || output.loading {
            return false;
        }
        let amount = derive_output_amount(
            &self.from.amount,
            input.unit_price_usd,
            output.unit_price_usd,
        );
        if amount == self.to.amount {
            return false;
        }
        tracing::debug!(
            "{} {} -> {} {}",
            self.from.amount,
            self.from.symbol,
            amount,
            self.to.symbol
        );
        self.to.amount = amount;
        true
    }

    /// Waits until either side publishes a new quote.
    pub async fn changed(&mut self) {
        tokio::select! {
            _ = next_update(&mut self.input.updates) => {},
            _ = next_update(&mut self.output.updates) => {},
        }
    }

    pub fn view(&self) -> SwapView {
        let input = self.input.feed.quote();
        let output = self.output.feed.quote();

        let from_price = if input.loading && positive_amount(&self.from.amount).is_some() {
            PriceStatus::Fetching
        } else if input.error.is_some() {
            PriceStatus::Unavailable
        } else {
            estimate(&self.from.amount, input.unit_price_usd)
        };
        let to_price = if output.loading && !self.from.amount.is_empty() {
            PriceStatus::Fetching
        } else if output.error.is_some() {
            PriceStatus::Unavailable
        } else {
            estimate(&self.to.amount, output.unit_price_usd)
        };

        let button = if self.wallet.address().is_none() {
            SwapButton::ConnectWallet
        } else if self.input_error.is_some() {
            SwapButton::InsufficientFunds
        } else {
            SwapButton::Swap {
                enabled: self.amounts_ready(),
            }
        };

        SwapView {
            from: SideView {
                selection: self.from.clone(),
                price: from_price,
            },
            to: SideView {
                selection: self.to.clone(),
                price: to_price,
            },
            input_error: self.input_error.clone(),
            button,
        }
    }

    /// The swap the button would submit, if it is enabled.
    pub fn swap_request(&self) -> Option<SwapRequest> {
        let wallet = self.wallet.address()?;
        if self.input_error.is_some() || !self.amounts_ready() {
            return None;
        }
        let request = SwapRequest {
            wallet,
            from: self.from.clone(),
            to: self.to.clone(),
        };
        tracing::info!("swap requested: {:?}", request);
        Some(request)
    }

    fn amounts_ready(&self) -> bool {
        positive_amount(&self.from.amount).is_some() && positive_amount(&self.to.amount).is_some()
    }

    fn retarget(&mut self) {
        let kind = self.factory.cfg.input.resolve(&self.from.symbol);
        if kind == self.input.kind {
            self.input.feed.track(&self.from);
        } else {
            tracing::debug!("input side moves from {:?} to {:?}", self.input.kind, kind);
            self.input = self.factory.mount(kind, &self.from);
        }

        let probe = unit_probe(&self.to);
        let kind = self.factory.cfg.output.resolve(&self.to.symbol);
        if kind == self.output.kind {
            self.output.feed.track(&probe);
        } else {
            tracing::debug!("output side moves from {:?} to {:?}", self.output.kind, kind);
            self.output = self.factory.mount(kind, &probe);
        }
    }
}

fn unit_probe(selection: &TokenSelection) -> TokenSelection {
    TokenSelection {
        amount: String::from(UNIT_AMOUNT),
        ..selection.clone()
    }
}

fn estimate(amount: &str, unit_price: Option<f64>) -> PriceStatus {
    PriceStatus::Estimate(format!("~${}", usd_value(amount, unit_price)))
}

/// a closed feed never wakes the form again
async fn next_update(updates: &mut watch::Receiver<PriceQuote>) {
    if updates.changed().await.is_err() {
        std::future::pending::<()>().await;
    }
}
