//! gitlab-mirror CLI entrypoint: dumps issues and their events as JSON
//! lines.

use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;

use gitlab_mirror::{GitLabError, GitLabMirrorConfig, RestGateway};
use ortho_config::OrthoConfig;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod cli;

/// Environment variable holding the log filter directives.
const LOG_FILTER_VAR: &str = "GITLAB_MIRROR_LOG";

#[tokio::main]
async fn main() -> ExitCode {
    init_logging();
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            if writeln!(io::stderr().lock(), "{error}").is_err() {
                return ExitCode::FAILURE;
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), GitLabError> {
    let config = load_config()?;

    let project = config.project_locator()?;
    let token = config.resolve_token()?;
    let since = config.since()?;
    let start = config.page_request()?;

    let gateway = Arc::new(RestGateway::for_token(&token, &project)?);
    let cancel = CancellationToken::new();
    let _stop_on_exit = cancel.clone().drop_guard();

    let mut stdout = io::stdout().lock();
    let summary = cli::mirror(&gateway, project, since, start, &cancel, &mut stdout).await?;
    tracing::info!(
        issues = summary.issues,
        events = summary.events,
        errors = summary.errors,
        "mirror finished"
    );
    Ok(())
}

/// Loads configuration from CLI, environment, and files.
///
/// # Errors
///
/// Returns [`GitLabError::Configuration`] when ortho-config fails to parse
/// arguments or load configuration files.
fn load_config() -> Result<GitLabMirrorConfig, GitLabError> {
    GitLabMirrorConfig::load().map_err(|error| GitLabError::Configuration {
        message: error.to_string(),
    })
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_FILTER_VAR).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}
