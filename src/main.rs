//! Bioconda comment bot entrypoint.

use std::io::{self, Write};
use std::process::ExitCode;

use bioconda_bot::{
    BotConfig, BotError, CircleCiClient, CommentResponder, CommitArtifactIntake, OctocrabGateway,
    ResponseOutcome, load_comment_context,
};
use ortho_config::OrthoConfig;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            writeln!(io::stderr().lock(), "{error}").ok();
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
        .ok();
}

async fn run() -> Result<(), BotError> {
    let config = load_config()?;

    let context = load_comment_context(&config)?;
    if !context.is_pull_request_comment() {
        info!("not triggered by a pull request comment; nothing to do");
        return Ok(());
    }

    let token = config.resolve_token()?;
    let locator = config.repository_locator()?;
    let artifacts =
        CircleCiClient::new(&config.circleci_api_base, &locator, &config.user_agent)?;
    let github =
        OctocrabGateway::for_token(&token, locator, &config.organisation, &config.user_agent)?;

    let intake = CommitArtifactIntake::new(&github, &artifacts)
        .with_workflow_title(config.workflow_title.as_str());
    let responder = CommentResponder::new(&github, intake);

    match responder.respond(&context).await? {
        ResponseOutcome::Replied {
            issue_number,
            artifact_count,
        } => info!(issue_number, artifact_count, "posted artifact reply"),
        outcome => info!(?outcome, "no reply posted"),
    }
    Ok(())
}

/// Loads configuration from CLI, environment, and files.
///
/// # Errors
///
/// Returns [`BotError::Configuration`] when ortho-config fails to parse
/// arguments or load configuration files.
fn load_config() -> Result<BotConfig, BotError> {
    BotConfig::load().map_err(|error| BotError::Configuration {
        message: error.to_string(),
    })
}
