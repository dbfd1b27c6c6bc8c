//! OpenSSH `known_hosts` output for configured host keys.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::hostname::extract_port;
use crate::processor::SshKeysByHostname;
use crate::properties::SshUriProperties;

/// Get the path to the user's known_hosts file
pub fn default_known_hosts_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".ssh").join("known_hosts"))
}

const DEFAULT_SSH_PORT: u16 = 22;

/// Host field of a `known_hosts` line: `host`, or `[host]:port` off port 22.
pub fn host_pattern(hostname: &str, props: &SshUriProperties) -> String {
    match props.uri.as_deref().and_then(extract_port) {
        Some(port) if port != DEFAULT_SSH_PORT => format!("[{hostname}]:{port}"),
        _ => hostname.to_string(),
    }
}

/// A `known_hosts` line for `hostname`, if both host key and algorithm are configured.
///
/// Entries with strict host key checking disabled are not pinned.
pub fn known_hosts_line(hostname: &str, props: &SshUriProperties) -> Option<String> {
    if !props.strict_host_key_checking {
        return None;
    }
    let key = props.host_key.as_deref()?.trim();
    let algorithm = props.host_key_algorithm.as_deref()?.trim();
    if key.is_empty() || algorithm.is_empty() {
        return None;
    }
    Some(format!("{} {algorithm} {key}", host_pattern(hostname, props)))
}

/// Render one line per host with a configured host key, sorted by hostname.
pub fn render_known_hosts(keys: &SshKeysByHostname) -> String {
    keys.hostnames()
        .into_iter()
        .filter_map(|host| keys.get(host).and_then(|props| known_hosts_line(host, props)))
        .map(|line| line + "\n")
        .collect()
}

/// Merge configured host keys into existing `known_hosts` content.
///
/// Existing lines for a configured host pattern are replaced; every other
/// line (comments, hashed entries, other hosts) is kept in place.
pub fn merge_known_hosts(existing: &str, keys: &SshKeysByHostname) -> String {
    let rendered = render_known_hosts(keys);
    let patterns: Vec<&str> = rendered
        .lines()
        .filter_map(|line| line.split_whitespace().next())
        .collect();

    let mut merged: String = existing
        .lines()
        .filter(|line| !line_matches_any(line, &patterns))
        .map(|line| format!("{line}\n"))
        .collect();
    merged.push_str(&rendered);
    merged
}

/// Whether the host field of `line` names one of `patterns`
fn line_matches_any(line: &str, patterns: &[&str]) -> bool {
    let line = line.trim_start();
    if line.starts_with('#') {
        return false;
    }
    let Some(hosts) = line.split_whitespace().next() else {
        return false;
    };
    hosts.split(',').any(|host| patterns.contains(&host))
}

/// Merge the configured host keys into the known_hosts file at `path`,
/// creating the file and its directory if needed.
///
/// Returns the number of host entries written.
pub fn write_known_hosts(keys: &SshKeysByHostname, path: &Path) -> Result<usize> {
    let existing = if path.exists() {
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?
    } else {
        String::new()
    };

    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() && !dir.exists() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
        }
    }

    let content = merge_known_hosts(&existing, keys);
    fs::write(path, &content).with_context(|| format!("Failed to write {}", path.display()))?;

    let count = render_known_hosts(keys).lines().count();
    log::info!("Wrote {count} host key(s) to {}", path.display());
    Ok(count)
}
