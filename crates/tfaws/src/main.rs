// # tfaws - provider entry point
//
// Thin integration layer: all adapter logic lives in the library crates.
//
// The binary:
// 1. Reads the provider configuration from environment variables
// 2. Initializes logging
// 3. Registers every enabled adapter
// 4. Writes the provider schema document (JSON) to stdout
//
// ## Configuration
//
// - `TFAWS_REGION` (or `AWS_REGION`): region requests are made in
// - `TFAWS_ACCOUNT_ID`: 12 digit account id
// - `TFAWS_PARTITION`: partition, default `aws`
// - `TFAWS_DNS_SUFFIX`: service DNS suffix override
// - `TFAWS_LOG_LEVEL`: trace, debug, info, warn or error (default `info`)
//
// Logs go to stderr so stdout carries only the document.
//
// ## Example
//
// ```bash
// export TFAWS_REGION=us-west-2
// export TFAWS_ACCOUNT_ID=123456789012
//
// tfaws > provider-schema.json
// ```

use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::env;
use std::io::{self, Write};
use std::process::ExitCode;
use tfaws_core::{AwsClient, ProviderConfig, ResourceRegistry, ResourceSchema};
use tracing::{Level, debug, error, info};
use tracing_subscriber::FmtSubscriber;

/// Exit codes
///
/// - 0: document written
/// - 1: configuration or startup error
/// - 2: runtime error
#[derive(Debug, Clone, Copy)]
enum TfawsExitCode {
    Success = 0,
    ConfigError = 1,
    RuntimeError = 2,
}

impl From<TfawsExitCode> for ExitCode {
    fn from(code: TfawsExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

/// Provider schema document written to stdout
#[derive(Serialize)]
struct ProviderSchemaDocument<'a> {
    provider: &'a ProviderConfig,
    dns_suffix: String,
    resource_schemas: BTreeMap<&'static str, ResourceSchema>,
}

fn parse_log_level(level: &str) -> Result<Level> {
    match level.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => anyhow::bail!(
            "TFAWS_LOG_LEVEL '{}' is not valid. \
            Valid levels: trace, debug, info, warn, error",
            level
        ),
    }
}

fn main() -> ExitCode {
    let log_level = env::var("TFAWS_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    let log_level = match parse_log_level(&log_level) {
        Ok(level) => level,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return TfawsExitCode::ConfigError.into();
        }
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return TfawsExitCode::ConfigError.into();
    }

    let config = match ProviderConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Configuration error: {}", e);
            return TfawsExitCode::ConfigError.into();
        }
    };

    // Validates the configuration the same way the host's connection would
    let conn = match AwsClient::new(&config) {
        Ok(conn) => conn,
        Err(e) => {
            error!("Configuration validation error: {}", e);
            return TfawsExitCode::ConfigError.into();
        }
    };

    info!(
        "Provider configured for account {} in {} ({})",
        conn.account_id, conn.region, conn.partition
    );

    let registry = ResourceRegistry::new();
    register_adapters(&registry);

    match write_schema_document(&registry, &config, &conn) {
        Ok(()) => TfawsExitCode::Success.into(),
        Err(e) => {
            error!("Failed to write provider schema: {:#}", e);
            TfawsExitCode::RuntimeError.into()
        }
    }
}

fn register_adapters(registry: &ResourceRegistry) {
    #[cfg(feature = "s3control")]
    {
        debug!("Registering S3 Control adapters");
        tfaws_s3control::register(registry);
    }

    #[cfg(feature = "configservice")]
    {
        debug!("Registering Config Service adapters");
        tfaws_configservice::register(registry);
    }

    #[cfg(feature = "ses")]
    {
        debug!("Registering SES adapters");
        tfaws_ses::register(registry);
    }

    info!("Registered {} resource type(s)", registry.list_resources().len());
}

fn write_schema_document(
    registry: &ResourceRegistry,
    config: &ProviderConfig,
    conn: &AwsClient,
) -> Result<()> {
    let document = ProviderSchemaDocument {
        provider: config,
        dns_suffix: conn.dns_suffix.clone(),
        resource_schemas: registry.provider_schema(),
    };

    let json = serde_json::to_string_pretty(&document).context("serializing provider schema")?;

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", json).context("writing provider schema")?;
    stdout.flush().context("flushing stdout")?;

    Ok(())
}
