//! External command execution.

use std::collections::HashMap;
use std::hash::BuildHasher;

use tokio::process::Command;
use tracing::debug;

use crate::github::error::BotError;

/// Runs `command` with `arguments` and waits for it to exit.
///
/// Standard streams are inherited. When `environment` is given its entries
/// are set on top of the inherited environment rather than replacing it, so
/// callers only pass the variables they want to change.
///
/// # Errors
///
/// Returns [`BotError::Io`] when the process cannot be spawned and
/// [`BotError::ExternalCommand`] when it exits unsuccessfully.
pub async fn run_external_command<S: BuildHasher>(
    command: &str,
    arguments: &[&str],
    environment: Option<&HashMap<String, String, S>>,
) -> Result<(), BotError> {
    let mut process = Command::new(command);
    process.args(arguments);
    if let Some(variables) = environment {
        process.envs(variables);
    }

    debug!(command, ?arguments, "running external command");
    let status = process
        .status()
        .await
        .map_err(|error| BotError::Io {
            message: format!("failed to start {command}: {error}"),
        })?;

    if status.success() {
        return Ok(());
    }
    Err(BotError::ExternalCommand {
        command: command.to_owned(),
        arguments: arguments.iter().map(|argument| (*argument).to_owned()).collect(),
        exit_code: status.code(),
    })
}
