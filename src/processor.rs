//! Selection of SSH credentials per host.
//!
//! Walks the main repository and its additional repos, and keeps the first
//! set of SSH properties seen for each host so a transport can pick the
//! right key when connecting.

use log::debug;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::hostname::extract_hostname;
use crate::properties::SshUriProperties;

/// SSH properties keyed by the hostname of their repository URI.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SshKeysByHostname {
    by_host: HashMap<String, SshUriProperties>,
}

impl SshKeysByHostname {
    /// Build the map from a main repository and its `repos`.
    ///
    /// The main repository is considered first, then each additional repo in
    /// insertion order. Entries without a recognized SSH URI are skipped. When
    /// several entries share a host, the first one wins.
    pub fn from_properties(root: &SshUriProperties) -> Self {
        let mut by_host = HashMap::new();

        let entries = std::iter::once(("<root>", root)).chain(root.repos.iter());
        for (name, props) in entries {
            let Some(uri) = props.uri.as_deref() else {
                debug!("Skipping '{name}': no uri configured");
                continue;
            };
            let Some(host) = extract_hostname(uri) else {
                debug!("Skipping '{name}': '{uri}' is not an SSH uri");
                continue;
            };
            match by_host.entry(host.to_string()) {
                Entry::Vacant(slot) => {
                    slot.insert(props.clone());
                }
                Entry::Occupied(_) => {
                    debug!("Ignoring '{name}': credentials for '{host}' already configured");
                }
            }
        }

        Self { by_host }
    }

    /// Credentials configured for `hostname`, if any.
    pub fn get(&self, hostname: &str) -> Option<&SshUriProperties> {
        self.by_host.get(hostname)
    }

    /// Credentials for the host of `uri`, if it is an SSH uri with configured credentials.
    pub fn credentials_for_uri(&self, uri: &str) -> Option<&SshUriProperties> {
        extract_hostname(uri).and_then(|host| self.get(host))
    }

    pub fn contains(&self, hostname: &str) -> bool {
        self.by_host.contains_key(hostname)
    }

    pub fn len(&self) -> usize {
        self.by_host.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_host.is_empty()
    }

    /// Configured hostnames, sorted.
    pub fn hostnames(&self) -> Vec<&str> {
        let mut hosts: Vec<&str> = self.by_host.keys().map(String::as_str).collect();
        hosts.sort_unstable();
        hosts
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SshUriProperties)> {
        self.by_host.iter().map(|(host, props)| (host.as_str(), props))
    }

    pub fn into_inner(self) -> HashMap<String, SshUriProperties> {
        self.by_host
    }
}

impl From<&SshUriProperties> for SshKeysByHostname {
    fn from(root: &SshUriProperties) -> Self {
        Self::from_properties(root)
    }
}

/// Map each SSH host in `root` (and its repos) to the first properties configured for it.
pub fn build_hostname_map(root: &SshUriProperties) -> HashMap<String, SshUriProperties> {
    SshKeysByHostname::from_properties(root).into_inner()
}
