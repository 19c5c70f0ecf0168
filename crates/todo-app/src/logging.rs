//! Global tracing subscriber
//!
//! `RUST_LOG` filters (default `info`); output is JSON lines unless
//! `LOG_FORMAT=pretty`. Each event carries the fields of the request span
//! it was recorded in.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::{AppConfig, LogFormat};

pub fn init(config: &AppConfig) -> anyhow::Result<()> {
    if config.disable_logging {
        return Ok(());
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    match config.log_format {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(false),
            )
            .try_init()?,
        LogFormat::Pretty => registry.with(fmt::layer()).try_init()?,
    }

    Ok(())
}
