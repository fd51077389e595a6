// ----- standard library imports
use std::str::FromStr;
use std::sync::Arc;
// ----- extra library imports
use tokio::signal;
use tracing_subscriber::{filter::LevelFilter, prelude::*};
use xcs_price_relay_client::PriceRelayClient;
use xcs_swap_quote::config::FormConfig;
use xcs_swap_quote::form::SwapForm;
use xcs_swap_quote::wallet::StaticWallet;
use xcs_swap_quote::TokenSelection;
// ----- local imports

// ----- end imports

#[derive(Debug, serde::Deserialize)]
struct MainConfig {
    log_level: String,
    relay_url: url::Url,
    #[serde(default)]
    form: FormConfig,
    from: TokenSelection,
    to: TokenSelection,
    amount: String,
    #[serde(default)]
    wallet: StaticWallet,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config.toml").required(false))
        .add_source(config::Environment::with_prefix("QUOTE_WATCH").separator("__"))
        .build()
        .expect("Failed to build quote watch config");

    let maincfg: MainConfig = settings
        .try_deserialize()
        .expect("Failed to parse quote watch config");

    tracing_log::LogTracer::init().expect("LogTracer init");
    let level_filter = LevelFilter::from_str(&maincfg.log_level).expect("log level");
    let stdout_log = tracing_subscriber::fmt::layer().with_filter(level_filter);
    let subscriber = tracing_subscriber::registry().with(stdout_log);
    tracing::subscriber::set_global_default(subscriber)
        .expect("tracing::subscriber::set_global_default");

    tracing::info!("Starting quote watch with config: {:#?}", maincfg);

    let MainConfig {
        relay_url,
        form,
        from,
        to,
        amount,
        wallet,
        ..
    } = maincfg;
    let relay = Arc::new(PriceRelayClient::new(relay_url));
    let mut form = SwapForm::new(form, relay, Arc::new(wallet), from, to);
    form.handle_amount_change(&amount);

    tokio::select! {
        _ = shutdown_signal() => {
            tracing::info!("Received shutdown signal, exiting watch loop.");
        },
        _ = watch_loop(&mut form) => {
            tracing::debug!("watch loop exited");
        }
    }
}

async fn watch_loop(form: &mut SwapForm) {
    loop {
        form.changed().await;
        form.recompute();
        let view = form.view();
        tracing::info!(
            "{} {} ({}) -> {} {} ({}) [{}]",
            view.from.selection.amount,
            view.from.selection.symbol,
            view.from.price,
            view.to.selection.amount,
            view.to.selection.symbol,
            view.to.price,
            view.button,
        );
        if let Some(error) = view.input_error {
            tracing::warn!("{}", error);
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
