//! Subprocess execution behind a trait.

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use artpipe_core::{ResolveError, ResolveResult};

/// Output of one command invocation.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub status: i32,
    pub stdout: String,
    pub stderr: String,
}

/// Runs one external command to completion and gathers its output.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(&self, program: &str, args: &[&str]) -> ResolveResult<CommandOutput>;
}

/// Production runner over tokio.
pub struct TokioCommandRunner;

#[async_trait]
impl CommandRunner for TokioCommandRunner {
    async fn run(&self, program: &str, args: &[&str]) -> ResolveResult<CommandOutput> {
        debug!(program, ?args, "executing");
        let output = Command::new(program)
            .args(args)
            // Launched tools must emit utf-8 regardless of host locale.
            .env("LC_ALL", "en_US.UTF-8")
            .output()
            .await
            .map_err(|err| {
                ResolveError::unexpected(format!(
                    "subprocess errored running {program}: {err}. Is {program} installed?"
                ))
            })?;

        Ok(CommandOutput {
            status: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_program_is_reported_not_panicked() {
        let err = TokioCommandRunner
            .run("definitely-not-a-real-binary-4a2b", &[])
            .await
            .unwrap_err();
        assert!(err.to_string().contains("definitely-not-a-real-binary-4a2b"));
    }
}
