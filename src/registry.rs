use std::collections::HashMap;

use crate::config::HostSpec;

/// One remote machine from the inventory.
#[derive(Debug, Clone, PartialEq)]
pub struct Host {
    /// Fully-qualified domain name, lowercased and trimmed. Empty = not set.
    pub fqdn: String,
    /// IP address, lowercased and trimmed. Empty = not set.
    pub ip: String,
    pub port: u16,
}

impl Host {
    /// The address ssh should dial: the FQDN when present, the IP otherwise.
    pub fn address(&self) -> &str {
        if !self.fqdn.is_empty() {
            &self.fqdn
        } else {
            &self.ip
        }
    }
}

/// An inventory entry that was dropped at build time because it carried
/// neither an FQDN nor an IP. Kept so the CLI can warn about it instead of
/// discarding it silently.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedEntry {
    /// Zero-based position in the configuration file.
    pub position: usize,
    /// The entry's nickname, if it had one. Empty otherwise.
    pub nickname: String,
}

impl SkippedEntry {
    /// Human-readable label for warnings: the nickname, or the entry number.
    pub fn label(&self) -> String {
        if self.nickname.is_empty() {
            format!("entry #{}", self.position + 1)
        } else {
            format!("'{}'", self.nickname)
        }
    }
}

/// The host inventory, addressable by nickname, FQDN, or IP.
///
/// Built once from the configuration list and read-only afterwards. A single
/// host can occupy up to three keys in the index; every key resolves to the
/// same record. `display` holds one canonical name per host for listing.
#[derive(Debug, Default)]
pub struct Registry {
    hosts: Vec<Host>,
    /// Normalized key -> slot in `hosts`.
    index: HashMap<String, usize>,
    display: Vec<String>,
    skipped: Vec<SkippedEntry>,
}

/// Trim surrounding whitespace and case-fold a lookup key.
fn normalize(key: &str) -> String {
    key.trim().to_lowercase()
}

impl Registry {
    /// Build the registry from the raw configuration entries, in order.
    ///
    /// Entries with neither an FQDN nor an IP contribute no keys and no
    /// display name; they land in the skipped ledger. When two entries claim
    /// the same key, the later one wins that key.
    pub fn build(specs: Vec<HostSpec>) -> Self {
        let mut registry = Registry::default();

        for (position, spec) in specs.into_iter().enumerate() {
            let nickname = normalize(&spec.nickname);
            let fqdn = normalize(&spec.fqdn);
            let ip = normalize(&spec.ip);

            if fqdn.is_empty() && ip.is_empty() {
                registry.skipped.push(SkippedEntry { position, nickname });
                continue;
            }

            let slot = registry.hosts.len();
            registry.hosts.push(Host {
                fqdn: fqdn.clone(),
                ip: ip.clone(),
                port: spec.port.unwrap_or(22),
            });

            // Key precedence also picks the display name: the first key a
            // host registers is the one it's listed under.
            let mut displayed = false;
            for key in [&nickname, &fqdn, &ip] {
                if key.is_empty() {
                    continue;
                }
                registry.index.insert(key.clone(), slot);
                if !displayed {
                    registry.display.push(key.clone());
                    displayed = true;
                }
            }
        }

        registry
    }

    /// Find a host by nickname, FQDN, or IP. Case-insensitive, ignores
    /// surrounding whitespace.
    pub fn lookup(&self, identifier: &str) -> Option<&Host> {
        self.index
            .get(&normalize(identifier))
            .map(|&slot| &self.hosts[slot])
    }

    /// Canonical display names, one per host, in configuration order.
    pub fn display_names(&self) -> &[String] {
        &self.display
    }

    /// Entries dropped at build time for lacking both FQDN and IP.
    pub fn skipped(&self) -> &[SkippedEntry] {
        &self.skipped
    }

    /// True when the inventory holds no addressable hosts.
    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }
}
