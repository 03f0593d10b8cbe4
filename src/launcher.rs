use std::process::ExitStatus;

use thiserror::Error;

use crate::connection;
use crate::registry::Registry;

/// What can go wrong when acting on a user-supplied identifier.
/// `HostNotFound` and `TunnelUnavailable` are user-facing conditions, not
/// program failures; only `Ssh` is worth a non-zero exit.
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("the host '{0}' could not be found")]
    HostNotFound(String),
    #[error("tunnels are not available yet")]
    TunnelUnavailable,
    #[error(transparent)]
    Ssh(#[from] anyhow::Error),
}

/// Resolves identifiers through the registry and hands matched hosts to the
/// ssh collaborator. One operation per process invocation.
#[derive(Debug)]
pub struct Launcher {
    registry: Registry,
}

impl Launcher {
    pub fn new(registry: Registry) -> Self {
        Self { registry }
    }

    /// Connect to the host matching `identifier` (nickname, FQDN, or IP).
    /// Blocks for the whole interactive session. The ssh exit status is
    /// returned but never interpreted here.
    pub fn connect(&self, identifier: &str) -> Result<ExitStatus, LaunchError> {
        let host = self
            .registry
            .lookup(identifier)
            .ok_or_else(|| LaunchError::HostNotFound(identifier.trim().to_string()))?;
        let username = connection::username()?;
        println!("Connecting to {}...\n", host.address());
        Ok(connection::connect(host, &username)?)
    }

    /// Open an SSH tunnel to the host matching `identifier`.
    /// Not implemented: always reports `TunnelUnavailable` for a known host.
    /// An unknown identifier still gets `HostNotFound` so callers can tell
    /// the two conditions apart.
    pub fn tunnel(&self, identifier: &str) -> Result<(), LaunchError> {
        self.registry
            .lookup(identifier)
            .ok_or_else(|| LaunchError::HostNotFound(identifier.trim().to_string()))?;
        Err(LaunchError::TunnelUnavailable)
    }

    /// Print the host list, one canonical name per line.
    pub fn print_host_list(&self) {
        let names = self.registry.display_names();
        if names.is_empty() {
            println!("\nNo hosts configured.\n");
            return;
        }
        println!("\nHosts to connect to:");
        for name in names {
            println!("  {}", name);
        }
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HostSpec;

    fn launcher_with_one_host() -> Launcher {
        Launcher::new(Registry::build(vec![HostSpec {
            nickname: "web".to_string(),
            fqdn: "web.example.com".to_string(),
            ip: String::new(),
            port: None,
        }]))
    }

    #[test]
    fn test_connect_unknown_host() {
        let launcher = launcher_with_one_host();
        let err = launcher.connect("  Nope  ").unwrap_err();
        assert!(matches!(err, LaunchError::HostNotFound(ref id) if id == "Nope"));
        assert_eq!(err.to_string(), "the host 'Nope' could not be found");
    }

    #[test]
    fn test_tunnel_is_unavailable_for_known_host() {
        let launcher = launcher_with_one_host();
        let err = launcher.tunnel("web").unwrap_err();
        assert!(matches!(err, LaunchError::TunnelUnavailable));
        assert_eq!(err.to_string(), "tunnels are not available yet");
    }

    #[test]
    fn test_tunnel_unknown_host_reports_not_found() {
        let launcher = launcher_with_one_host();
        let err = launcher.tunnel("mystery").unwrap_err();
        assert!(matches!(err, LaunchError::HostNotFound(_)));
    }
}
