use std::process::Command;

use anyhow::{Context, Result};

use crate::registry::Host;

/// Launch an interactive SSH session to the given host.
/// Uses the system `ssh` binary with inherited stdin/stdout/stderr; blocks
/// until the session ends. The exit status is returned as-is.
pub fn connect(host: &Host, username: &str) -> Result<std::process::ExitStatus> {
    let target = format!("{}@{}", username, host.address());
    let status = Command::new("ssh")
        .arg("-p")
        .arg(host.port.to_string())
        .arg("--")
        .arg(&target)
        .stdin(std::process::Stdio::inherit())
        .stdout(std::process::Stdio::inherit())
        .stderr(std::process::Stdio::inherit())
        .status()
        .with_context(|| format!("Failed to launch ssh for '{}'", target))?;
    Ok(status)
}

/// The local username, for the `user@host` part of the ssh target.
pub fn username() -> Result<String> {
    std::env::var("USER")
        .or_else(|_| std::env::var("LOGNAME"))
        .or_else(|_| std::env::var("USERNAME"))
        .context("Could not determine username from USER, LOGNAME, or USERNAME")
}
