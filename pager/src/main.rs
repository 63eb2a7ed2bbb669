//! Dex Pager terminal front end
//!
//! Reads one command per line from stdin and prints each card as it loads.

use anyhow::Context;
use dexpager::{
    Command, Config, LOAD_EFFECT, PagerAction, PagerEnvironment, PagerReducer, PagerState,
    PokeApiClient,
};
use dexpager_core::environment::ThreadRandom;
use dexpager_runtime::metrics::MetricsRecorder;
use dexpager_runtime::{Store, StoreConfig};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dexpager=info,dexpager_runtime=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env();
    tracing::info!(
        base_url = %config.api.base_url,
        initial_index = %config.initial_index,
        "Starting dex pager"
    );

    let mut recorder = MetricsRecorder::new();
    if config.metrics_enabled {
        recorder.install().context("installing metrics recorder")?;
    }

    let client = PokeApiClient::from_config(&config.api).context("building PokeAPI client")?;
    let env = PagerEnvironment::new(Arc::new(client), Arc::new(ThreadRandom));
    let store = Store::with_config(
        PagerState::at(config.initial_index),
        PagerReducer::new(),
        env,
        StoreConfig::default().with_shutdown_timeout(config.shutdown_timeout),
    );

    let printer = spawn_card_printer(&store);

    println!("Commands: n(ext), p(rev), r(andom), s(how), q(uit)");
    store.send(PagerAction::AppStarted).await?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("reading stdin")? {
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(err) => {
                println!("{err}");
                continue;
            },
        };

        match command {
            Command::Quit => break,
            Command::Show => {
                let state = store.state(Clone::clone).await;
                println!("{state}");
                println!("{}", serde_json::to_string_pretty(&state)?);
            },
            other => {
                if let Some(action) = other.action() {
                    store.send(action).await?;
                    println!("{}", store.state(ToString::to_string).await);
                }
            },
        }
    }

    tracing::info!("Shutting down");
    store.cancel(LOAD_EFFECT);
    store.shutdown_with_default_timeout().await?;
    printer.abort();

    if let Some(rendered) = recorder.render() {
        println!("{rendered}");
    }

    Ok(())
}

type PagerStore = Store<PagerState, PagerAction, PagerEnvironment, PagerReducer>;

/// Print every card whose load is applied to the store
fn spawn_card_printer(store: &PagerStore) -> tokio::task::JoinHandle<()> {
    let mut actions = store.subscribe_actions();
    let store = store.clone();

    tokio::spawn(async move {
        loop {
            match actions.recv().await {
                Ok(PagerAction::LoadCompleted { index, .. }) => {
                    let state = store.state(Clone::clone).await;
                    if state.current_index == index {
                        println!("{state}");
                    }
                },
                Ok(_) => {},
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Card printer lagged");
                },
                Err(RecvError::Closed) => break,
            }
        }
    })
}
