use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// A raw host entry as written in the inventory file. Every field is
/// optional; validation happens when the registry is built.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HostSpec {
    #[serde(default)]
    pub nickname: String,
    #[serde(default)]
    pub fqdn: String,
    #[serde(default)]
    pub ip: String,
    #[serde(default)]
    pub port: Option<u16>,
}

/// An inventory that was found and parsed, plus where it came from.
#[derive(Debug)]
pub struct LoadedConfig {
    pub specs: Vec<HostSpec>,
    pub path: PathBuf,
}

/// Candidate inventory locations, tried in order. The second entry is the
/// pre-0.3 filename, kept so old setups keep working.
pub fn candidate_paths() -> Vec<PathBuf> {
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    vec![
        home.join(".hop").join("hosts.json"),
        home.join(".hop").join("servers.json"),
    ]
}

/// Expand a leading `~/` against the home directory.
pub fn resolve_path(path: &str) -> Result<PathBuf> {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = dirs::home_dir().context("Could not determine home directory")?;
        Ok(home.join(rest))
    } else {
        Ok(PathBuf::from(path))
    }
}

/// Load the host inventory.
///
/// With an explicit path the candidates are ignored and the file must exist.
/// Otherwise the first candidate present on disk is used; `Ok(None)` means
/// no inventory exists anywhere and the caller should print setup help.
pub fn load(explicit: Option<&str>) -> Result<Option<LoadedConfig>> {
    if let Some(raw) = explicit {
        let path = resolve_path(raw)?;
        return read_file(&path).map(Some);
    }
    for path in candidate_paths() {
        if path.exists() {
            return read_file(&path).map(Some);
        }
    }
    Ok(None)
}

fn read_file(path: &Path) -> Result<LoadedConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read host inventory at {}", path.display()))?;
    let specs = parse(&content)
        .with_context(|| format!("Failed to parse host inventory at {}", path.display()))?;
    Ok(LoadedConfig {
        specs,
        path: path.to_path_buf(),
    })
}

/// Parse inventory content: a JSON array of host objects.
pub fn parse(content: &str) -> Result<Vec<HostSpec>> {
    let specs = serde_json::from_str(content)?;
    Ok(specs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_entry() {
        let specs = parse(
            r#"[{"nickname": "web1", "fqdn": "web1.example.com", "ip": "10.0.0.5", "port": 2222}]"#,
        )
        .unwrap();
        assert_eq!(specs.len(), 1);
        assert_eq!(specs[0].nickname, "web1");
        assert_eq!(specs[0].fqdn, "web1.example.com");
        assert_eq!(specs[0].ip, "10.0.0.5");
        assert_eq!(specs[0].port, Some(2222));
    }

    #[test]
    fn test_parse_defaults_absent_fields() {
        let specs = parse(r#"[{"fqdn": "db.example.com"}]"#).unwrap();
        assert_eq!(specs[0].nickname, "");
        assert_eq!(specs[0].ip, "");
        assert_eq!(specs[0].port, None);
    }

    #[test]
    fn test_parse_empty_array() {
        assert!(parse("[]").unwrap().is_empty());
    }

    #[test]
    fn test_parse_rejects_unknown_fields() {
        assert!(parse(r#"[{"hostname": "web1.example.com"}]"#).is_err());
    }

    #[test]
    fn test_parse_rejects_non_array() {
        assert!(parse(r#"{"nickname": "web1"}"#).is_err());
    }

    #[test]
    fn test_candidate_order_prefers_hosts_json() {
        let paths = candidate_paths();
        assert_eq!(paths.len(), 2);
        assert!(paths[0].ends_with(".hop/hosts.json"));
        assert!(paths[1].ends_with(".hop/servers.json"));
    }

    #[test]
    fn test_resolve_path_plain() {
        assert_eq!(
            resolve_path("/etc/hop/hosts.json").unwrap(),
            PathBuf::from("/etc/hop/hosts.json")
        );
    }
}
