// ----- standard library imports
use std::fmt::Debug;
use std::sync::Arc;
use std::time::Duration;
// ----- extra library imports
use async_trait::async_trait;
use tokio::sync::{mpsc, watch};
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
// ----- local imports
use crate::error::Result;
use crate::model::{PriceQuote, TokenSelection};

// ----- end imports

const MIN_REFRESH: Duration = Duration::from_secs(1);

/// A way of pricing one token in USD through the relay.
#[async_trait]
pub trait PriceSource: Send + Sync + 'static {
    type Params: Clone + PartialEq + Debug + Send + Sync + 'static;
    type Request: Debug + Send + 'static;

    fn name(&self) -> &'static str;
    fn params_for(&self, selection: &TokenSelection) -> Self::Params;
    /// `Ok(None)` means nothing to price yet, `Err` fails without calling the relay.
    fn prepare(&self, params: &Self::Params) -> Result<Option<Self::Request>>;
    async fn fetch(&self, request: Self::Request) -> Result<Option<f64>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HookTimings {
    pub debounce: Duration,
    pub refresh: Duration,
}

impl Default for HookTimings {
    fn default() -> Self {
        Self {
            debounce: Duration::ZERO,
            refresh: Duration::from_secs(30),
        }
    }
}

/// Owns the timers of one price subscription.
///
/// Mounting spawns a driver task that fetches after the debounce, on every
/// parameter change (debounced again) and on every refresh tick. Dropping
/// the hook cancels the driver; fetches still in flight complete but their
/// results are discarded.
pub struct PriceHook<S: PriceSource> {
    params: watch::Sender<S::Params>,
    quote: watch::Receiver<PriceQuote>,
    cancel: CancellationToken,
}

impl<S: PriceSource> PriceHook<S> {
    pub fn mount(source: Arc<S>, params: S::Params, timings: HookTimings) -> Self {
        let (params_tx, params_rx) = watch::channel(params);
        let (quote_tx, quote_rx) = watch::channel(PriceQuote::default());
        let cancel = CancellationToken::new();
        let driver = Driver {
            source,
            timings,
            quote: quote_tx,
            cancel: cancel.clone(),
        };
        tokio::spawn(driver.run(params_rx));
        Self {
            params: params_tx,
            quote: quote_rx,
            cancel,
        }
    }

    /// reschedules a fetch only when `params` differ from the current ones
    pub fn set_params(&self, params: S::Params) {
        self.params.send_if_modified(|current| {
            if *current == params {
                return false;
            }
            *current = params;
            true
        });
    }

    pub fn params(&self) -> S::Params {
        self.params.borrow().clone()
    }

    pub fn quote(&self) -> PriceQuote {
        self.quote.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<PriceQuote> {
        self.quote.clone()
    }
}

impl<S: PriceSource> Drop for PriceHook<S> {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

type Outcome<P> = (P, Result<Option<f64>>);

struct Driver<S: PriceSource> {
    source: Arc<S>,
    timings: HookTimings,
    quote: watch::Sender<PriceQuote>,
    cancel: CancellationToken,
}

impl<S: PriceSource> Driver<S> {
    async fn run(self, mut params: watch::Receiver<S::Params>) {
        let (results_tx, mut results) = mpsc::unbounded_channel::<Outcome<S::Params>>();
        let mut current = params.borrow_and_update().clone();

        let debounce = tokio::time::sleep(self.timings.debounce);
        tokio::pin!(debounce);
        let mut pending = true;

        let period = self.timings.refresh.max(MIN_REFRESH);
        let mut refresh = tokio::time::interval_at(Instant::now() + period, period);
        refresh.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                _ = self.cancel.cancelled() => break,
                changed = params.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    current = params.borrow_and_update().clone();
                    tracing::trace!("{} price hook params now {:?}", self.source.name(), current);
                    debounce.as_mut().reset(Instant::now() + self.timings.debounce);
                    pending = true;
                    refresh.reset();
                }
                Some((fetched_for, outcome)) = results.recv() => {
                    if fetched_for != current {
                        tracing::debug!(
                            "{} price hook dropped result for {:?}",
                            self.source.name(),
                            fetched_for
                        );
                        continue;
                    }
                    self.apply(outcome);
                }
                _ = &mut debounce, if pending => {
                    pending = false;
                    self.start_fetch(&current, &results_tx);
                }
                _ = refresh.tick() => {
                    self.start_fetch(&current, &results_tx);
                }
            }
        }
        tracing::debug!("{} price hook torn down", self.source.name());
    }

    fn start_fetch(
        &self,
        params: &S::Params,
        results: &mpsc::UnboundedSender<Outcome<S::Params>>,
    ) {
        let request = match self.source.prepare(params) {
            Ok(Some(request)) => request,
            Ok(None) => {
                self.publish(PriceQuote::default());
                return;
            }
            Err(e) => {
                tracing::warn!("{} price hook: {}", self.source.name(), e);
                self.publish(PriceQuote::failed(e.to_string()));
                return;
            }
        };

        tracing::debug!("{} price hook fetching {:?}", self.source.name(), request);
        self.quote.send_if_modified(|quote| {
            let modified = !quote.loading || quote.error.is_some();
            quote.loading = true;
            quote.error = None;
            modified
        });
        let source = self.source.clone();
        let params = params.clone();
        let results = results.clone();
        tokio::spawn(async move {
            let outcome = source.fetch(request).await;
            // the driver is gone after teardown
            let _ = results.send((params, outcome));
        });
    }

    fn apply(&self, outcome: Result<Option<f64>>) {
        let next = match outcome {
            Ok(price) => PriceQuote::priced(price),
            Err(e) => {
                tracing::warn!("{} price fetch failed: {}", self.source.name(), e);
                PriceQuote::failed(e.to_string())
            }
        };
        self.publish(next);
    }

    fn publish(&self, next: PriceQuote) {
        self.quote.send_if_modified(|quote| {
            if *quote == next {
                return false;
            }
            *quote = next;
            true
        });
    }
}

/// Type-erased handle over a mounted hook, fed from a form side.
pub trait QuoteFeed: Send + Sync {
    fn track(&self, selection: &TokenSelection);
    fn quote(&self) -> PriceQuote;
    fn subscribe(&self) -> watch::Receiver<PriceQuote>;
}

pub struct SourceFeed<S: PriceSource> {
    source: Arc<S>,
    hook: PriceHook<S>,
}

impl<S: PriceSource> SourceFeed<S> {
    pub fn mount(source: S, selection: &TokenSelection, timings: HookTimings) -> Self {
        let source = Arc::new(source);
        let params = source.params_for(selection);
        let hook = PriceHook::mount(source.clone(), params, timings);
        Self { source, hook }
    }
}

impl<S: PriceSource> QuoteFeed for SourceFeed<S> {
    fn track(&self, selection: &TokenSelection) {
        self.hook.set_params(self.source.params_for(selection));
    }

    fn quote(&self) -> PriceQuote {
        self.hook.quote()
    }

    fn subscribe(&self) -> watch::Receiver<PriceQuote> {
        self.hook.subscribe()
    }
}
