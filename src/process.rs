// src/process.rs
// =============================================================================
// Runs external commands (git, cp) and waits for them.
//
// Every command line is logged before it runs. A non-zero exit becomes
// CopyError::ExternalCommand carrying the command's stderr so the user sees
// what git or cp actually complained about.
// =============================================================================

use std::process::{Output, Stdio};
use tokio::process::Command;
use tracing::{debug, info};

use crate::error::{CopyError, Result};

/// The command as a single printable line, e.g. "git clone <url> <dir>"
pub fn command_line(cmd: &Command) -> String {
    let std_cmd = cmd.as_std();
    std::iter::once(std_cmd.get_program())
        .chain(std_cmd.get_args())
        .map(|part| part.to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Spawns `cmd`, waits for it and returns its output if it exited zero
pub async fn run(cmd: &mut Command) -> Result<Output> {
    let line = command_line(cmd);
    info!("{}", line);

    let output = cmd
        .stdin(Stdio::null())
        .output()
        .await
        .map_err(|e| CopyError::ExternalCommand {
            command: line.clone(),
            stderr: e.to_string(),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        return Err(CopyError::ExternalCommand {
            command: line,
            stderr: if stderr.is_empty() {
                format!("exited with {}", output.status)
            } else {
                stderr
            },
        });
    }

    debug!(stdout = %String::from_utf8_lossy(&output.stdout).trim(), "{} finished", line);
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_line() {
        let mut cmd = Command::new("git");
        cmd.args(["clone", "https://go.googlesource.com/pkgsite", "/tmp/go_x"]);
        assert_eq!(
            command_line(&cmd),
            "git clone https://go.googlesource.com/pkgsite /tmp/go_x"
        );
    }

    #[tokio::test]
    async fn test_failure_surfaces_stderr() {
        let mut cmd = Command::new("sh");
        cmd.args(["-c", "echo boom >&2; exit 3"]);
        match run(&mut cmd).await {
            Err(CopyError::ExternalCommand { command, stderr }) => {
                assert!(command.starts_with("sh -c"));
                assert_eq!(stderr, "boom");
            }
            other => panic!("expected ExternalCommand, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_program() {
        let mut cmd = Command::new("definitely-not-a-real-program-xyz");
        assert!(matches!(
            run(&mut cmd).await,
            Err(CopyError::ExternalCommand { .. })
        ));
    }

    #[tokio::test]
    async fn test_success_returns_stdout() {
        let mut cmd = Command::new("sh");
        cmd.args(["-c", "echo hello"]);
        let output = run(&mut cmd).await.unwrap();
        assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "hello");
    }
}
