use std::sync::Arc;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crypto_genius::view;
use crypto_genius::{
    CannedResponder, CoinGeckoProvider, CompositeEventHandler, ConsoleEventHandler, Dashboard,
    DashboardConfig, PlanTier, SendOutcome, Tab,
};

const HELP: &str = "\
Commands:
  /market | /portfolio | /assistant | /plans   switch tab and show it
  /show                                        show the active tab again
  /hide                                        toggle balance masking
  /upgrade <free|pro|premium>                  change plan
  /hold <SYMBOL> <AMOUNT>                      track a holding at market price
  /refresh                                     fetch market data now
  /help                                        this text
  /quit                                        exit
Anything else is sent to the assistant.";

enum Flow {
    Continue,
    Quit,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = DashboardConfig::from_env().context("Failed to load configuration")?;

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .with_level(true)
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .init();

    tokio::runtime::Runtime::new()?.block_on(async {
        info!("Initializing dashboard...");
        info!("Market API: {}", config.market_api_url);
        info!("Poll interval: {}ms", config.poll_interval.as_millis());

        let provider = Arc::new(
            CoinGeckoProvider::new(&config).context("Failed to build market data client")?,
        );

        let mut handler = CompositeEventHandler::new();
        handler.add_handler(Arc::new(ConsoleEventHandler::new()));

        let dashboard = Dashboard::start(
            &config,
            provider,
            Arc::new(CannedResponder::new()),
            Arc::new(handler),
        );

        println!("{}", HELP);

        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        loop {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => break,
                line = lines.next_line() => {
                    let Some(line) = line.context("Failed to read stdin")? else {
                        break;
                    };
                    if let Flow::Quit = handle_line(&dashboard, line.trim()).await {
                        break;
                    }
                }
            }
        }

        info!("Shutting down...");
        dashboard.shutdown().await;

        Ok(())
    })
}

async fn handle_line(dashboard: &Dashboard, line: &str) -> Flow {
    if line.is_empty() {
        return Flow::Continue;
    }

    let Some(command) = line.strip_prefix('/') else {
        match dashboard.send_message(line).await {
            SendOutcome::Accepted { .. } => println!("AI is typing..."),
            SendOutcome::QuotaExceeded | SendOutcome::Ignored => {}
        }
        return Flow::Continue;
    };

    let mut parts = command.split_whitespace();
    let name = parts.next().unwrap_or_default();
    let args: Vec<&str> = parts.collect();

    match name {
        "quit" | "exit" => return Flow::Quit,
        "help" => println!("{}", HELP),
        "show" => print_active(dashboard).await,
        "hide" => {
            dashboard.toggle_balances().await;
            print_active(dashboard).await;
        }
        "refresh" => {
            if dashboard.refresh_market().await {
                print_active(dashboard).await;
            }
        }
        "upgrade" => match args.first().map(|a| a.parse::<PlanTier>()) {
            Some(Ok(tier)) => dashboard.upgrade(tier).await,
            Some(Err(e)) => warn!("{}", e),
            None => {
                dashboard.open_upgrade_prompt().await;
                dashboard.select_tab(Tab::Plans).await;
                print_active(dashboard).await;
            }
        },
        "hold" => match args.as_slice() {
            [symbol, amount] => match amount.parse::<f64>() {
                Ok(amount) => {
                    dashboard.open_position(symbol, amount).await;
                }
                Err(_) => warn!("Invalid amount '{}'", amount),
            },
            _ => warn!("Usage: /hold SYMBOL AMOUNT"),
        },
        other => match other.parse::<Tab>() {
            Ok(tab) => {
                dashboard.select_tab(tab).await;
                print_active(dashboard).await;
            }
            Err(_) => warn!("Unknown command '/{}' (try /help)", other),
        },
    }

    Flow::Continue
}

async fn print_active(dashboard: &Dashboard) {
    let state = dashboard.state().await;
    println!("{}", view::render_header(&state));
    println!("{}", view::render_active_tab(&state));
}
