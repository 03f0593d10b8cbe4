mod config;
mod connection;
mod launcher;
mod registry;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::{Shell, generate};

use launcher::{LaunchError, Launcher};
use registry::Registry;

#[derive(Parser)]
#[command(
    name = "hop",
    about = "Launch SSH connections to your servers.",
    long_about = "Hop keeps a small inventory of servers and connects you to any\n\
                  of them by nickname, FQDN, or IP address.\n\n\
                  Define your hosts once in ~/.hop/hosts.json, then just 'hop web1'.",
    version
)]
struct Cli {
    /// Nickname, FQDN, or IP address of the host to connect to
    #[arg(value_name = "HOST")]
    host: Option<String>,

    /// List the available hosts to connect to
    #[arg(short, long)]
    list: bool,

    /// Open an SSH tunnel to the host instead of a session
    #[arg(short, long)]
    tunnel: bool,

    /// Path to the host inventory file (default: ~/.hop/hosts.json)
    #[arg(long, value_name = "PATH")]
    config: Option<String>,

    /// Generate shell completions
    #[arg(long, value_name = "SHELL")]
    completions: Option<Shell>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Shell completions (no inventory needed)
    if let Some(shell) = cli.completions {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "hop", &mut std::io::stdout());
        return Ok(());
    }

    let registry = match config::load(cli.config.as_deref())? {
        Some(loaded) => {
            let registry = Registry::build(loaded.specs);
            for entry in registry.skipped() {
                eprintln!(
                    "Warning: skipped host {} in {}: neither fqdn nor ip is set",
                    entry.label(),
                    loaded.path.display()
                );
            }
            registry
        }
        None => {
            println!("\nNo hosts defined!");
            println!(
                "Create {} with a list of hosts to fix this problem.\n",
                config::candidate_paths()[0].display()
            );
            Cli::command().print_help()?;
            println!();
            Launcher::new(Registry::default()).print_host_list();
            return Ok(());
        }
    };

    let launcher = Launcher::new(registry);

    // No host, or an explicit --list: usage help followed by the host list
    let host = cli.host.as_deref().unwrap_or("");
    if host.is_empty() || cli.list {
        Cli::command().print_help()?;
        println!();
        launcher.print_host_list();
        return Ok(());
    }

    let result = if cli.tunnel {
        launcher.tunnel(host).map(|()| None)
    } else {
        launcher.connect(host).map(Some)
    };

    // ssh's own exit status is not propagated; only a failure to launch is.
    match result {
        Ok(_) => Ok(()),
        Err(LaunchError::HostNotFound(id)) => {
            println!("\nThe host '{}' could not be found.\n", id);
            Ok(())
        }
        Err(LaunchError::TunnelUnavailable) => {
            println!("\nThis feature is not available at this time.\n");
            Ok(())
        }
        Err(LaunchError::Ssh(e)) => Err(e),
    }
}
