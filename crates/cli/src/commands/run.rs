//! Run command implementation.
//!
//! Loads secrets once and spawns the given command with them added to its
//! environment. The child's exit status becomes the process exit code.

use std::process::ExitStatus;

use anyhow::{Context, Result};
use infisical_client::SecretLoader;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::cancellation::CancellationToken;

/// Environment variable names may not be empty or contain `=` or NUL.
fn is_valid_env_name(key: &str) -> bool {
    !key.is_empty() && !key.contains(['=', '\0'])
}

fn exit_status_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    1
}

pub async fn run(
    loader: &SecretLoader,
    command: &[String],
    cancel: &CancellationToken,
) -> Result<i32> {
    let (program, args) = command.split_first().context("No command given")?;
    let entries = super::load_entries(loader, cancel).await?;

    let mut child = Command::new(program);
    child.args(args);

    let mut injected = 0usize;
    for (key, value) in &entries {
        if is_valid_env_name(key) && !value.contains('\0') {
            child.env(key, value);
            injected += 1;
        } else {
            warn!(key = %key, "Skipping secret that cannot be passed as an environment variable");
        }
    }
    debug!(program = %program, injected, "Spawning command");

    // Ctrl+C reaches the child directly; this process just waits for it.
    let status = child
        .status()
        .await
        .with_context(|| format!("Failed to run '{}'", program))?;

    Ok(exit_status_code(status))
}
