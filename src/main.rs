//! Records Store - Main entry point.
//!
//! Opens (and if needed creates) the records database, then reports how many
//! rows each table holds.

use clap::Parser;
use records_store::config::Config;
use records_store::{Adapter, DataContext};
use std::sync::{Arc, Mutex};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialize the tracing subscriber for logging.
fn init_tracing(config: &Config) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    if config.json_logs {
        subscriber.with(fmt::layer().json()).init();
    } else {
        subscriber
            .with(fmt::layer().with_target(true).with_thread_ids(false))
            .init();
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::parse();
    init_tracing(&config);

    let target = config.target();
    info!(
        target_db = %target,
        read_only = target.read_only,
        "Starting records-store v{}",
        env!("CARGO_PKG_VERSION")
    );

    // A read-only database must already carry the schema.
    let context = if target.read_only {
        let mut adapter = Adapter::new();
        adapter.connect(target)?;
        DataContext::builder()
            .adapter(Arc::new(Mutex::new(adapter)))
            .build()?
    } else {
        DataContext::open(target)?
    };

    match context.table_counts() {
        Ok(counts) => {
            for (table, rows) in counts {
                info!(table, rows, "Table summary");
            }
        }
        Err(e) => {
            error!(error = %e, code = %e.code(), "Failed to count rows");
            return Err(e.into());
        }
    }

    context.close()?;
    Ok(())
}
