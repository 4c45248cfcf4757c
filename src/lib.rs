// cargo watch -x 'fmt' -x 'run'

pub mod azure;
pub mod config;
pub mod models;
pub mod output;

use colored::Colorize;
use models::Subscription;
use std::error::Error;

/// Resolve credentials, authenticate, and collect the full account tree.
///
/// Returns `Ok(None)` when neither credential scheme is present in the
/// environment; no network call is made in that case.
pub async fn fetch_inventory() -> Result<Option<Vec<Subscription>>, Box<dyn Error>> {
    let Some(credentials) = azure::auth::resolve_credentials() else {
        log::error!(
            "{missing} credentials in environment variables: set AZ_CLIENT/AZ_SECRET/AZ_TENANT or AZ_USER/AZ_PASS",
            missing = "Missing".on_red()
        );
        return Ok(None);
    };
    log::info!("Authenticating with {} credentials", credentials.scheme());

    let http = reqwest::Client::builder()
        .user_agent(concat!("az-tree/", env!("CARGO_PKG_VERSION")))
        .build()?;
    let token = azure::auth::request_token(&http, config::AUTHORITY_HOST, &credentials).await?;
    let client = azure::MgmtClient::new(http, token);

    let tree = azure::collect(&client).await?;
    log::info!("Collected {} subscriptions", tree.len());
    Ok(Some(tree))
}

/// Write both snapshot encodings to the working directory, overwriting any
/// previous run's files.
pub fn write_snapshot(tree: &[Subscription]) -> Result<(), Box<dyn Error>> {
    let json = output::render_json(tree)?;
    std::fs::write(config::JSON_SNAPSHOT, json)
        .map_err(|e| format!("Error writing {}: {e}", config::JSON_SNAPSHOT))?;
    log::info!("Wrote {}", config::JSON_SNAPSHOT);

    let dot = output::render_dot(tree);
    std::fs::write(config::DOT_SNAPSHOT, dot)
        .map_err(|e| format!("Error writing {}: {e}", config::DOT_SNAPSHOT))?;
    log::info!("Wrote {}", config::DOT_SNAPSHOT);

    Ok(())
}

/// Initialize log4rs from `log4rs.yml`, falling back to a plain console
/// appender at info level when the file is absent.
pub fn init_logging() {
    if log4rs::init_file("log4rs.yml", Default::default()).is_err() {
        let stdout = log4rs::append::console::ConsoleAppender::builder()
            .encoder(Box::new(log4rs::encode::pattern::PatternEncoder::new(
                "{d(%H:%M:%S)} {h({l})} {m}{n}",
            )))
            .build();
        let fallback = log4rs::config::Config::builder()
            .appender(log4rs::config::Appender::builder().build("stdout", Box::new(stdout)))
            .build(
                log4rs::config::Root::builder()
                    .appender("stdout")
                    .build(log::LevelFilter::Info),
            )
            .expect("Error building fallback log config");
        log4rs::init_config(fallback).expect("Error initializing log4rs");
    }
}
