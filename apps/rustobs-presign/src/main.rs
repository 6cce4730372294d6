//! rustobs-presign - print a pre-signed `GET` URL for one object.
//!
//! # Usage
//!
//! ```text
//! rustobs-presign <object> [expires-in-secs] [--domain <host>]
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `OBS_ACCESS_KEY` | *(required)* | Access key identifier |
//! | `OBS_SECRET_KEY` | *(required)* | Secret key |
//! | `OBS_REGION` | *(required)* | Region, e.g. `cn-north-4` |
//! | `OBS_BUCKET` | *(empty)* | Bucket holding the object |
//! | `OBS_ENDPOINT` | *(unset)* | Path-style endpoint override |
//! | `LOG_LEVEL` | `info` | Log level filter |
//! | `RUST_LOG` | *(unset)* | Fine-grained tracing filter (overrides `LOG_LEVEL`) |

use anyhow::{Context, Result, bail};
use chrono::Utc;
use rustobs_core::ObsConfig;
use rustobs_http::ObsClient;
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_EXPIRES_IN: u64 = 3600;

/// Initialize the tracing subscriber on stderr, keeping stdout for the URL.
///
/// Uses `RUST_LOG` if set, otherwise falls back to the `LOG_LEVEL` config value.
fn init_tracing(log_level: &str) -> Result<()> {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::try_new(log_level)
            .with_context(|| format!("invalid log level filter: {log_level}"))?
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

#[derive(Debug)]
struct Args {
    object: String,
    expires_in: u64,
    domain: Option<String>,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Args> {
    let mut object = None;
    let mut expires_in = None;
    let mut domain = None;

    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        if arg == "--domain" {
            domain = Some(args.next().context("--domain needs a value")?);
        } else if object.is_none() {
            object = Some(arg);
        } else if expires_in.is_none() {
            expires_in = Some(
                arg.parse::<u64>()
                    .with_context(|| format!("invalid expiry seconds: {arg}"))?,
            );
        } else {
            bail!("unexpected argument: {arg}");
        }
    }

    Ok(Args {
        object: object.context("usage: rustobs-presign <object> [expires-in-secs] [--domain <host>]")?,
        expires_in: expires_in.unwrap_or(DEFAULT_EXPIRES_IN),
        domain,
    })
}

fn main() -> Result<()> {
    let args = parse_args(std::env::args().skip(1))?;
    let config = ObsConfig::from_env().context("loading OBS configuration")?;

    init_tracing(&config.log_level)?;

    let client = ObsClient::new(config).context("creating OBS client")?;
    let now = u64::try_from(Utc::now().timestamp()).context("system clock before epoch")?;
    let expires = now.saturating_add(args.expires_in);

    info!(
        object = %args.object,
        expires,
        domain = ?args.domain,
        "creating pre-signed URL"
    );

    println!(
        "{}",
        client.create_temporary_url(&args.object, expires, args.domain.as_deref())
    );
    Ok(())
}
