//! SSH connection properties for one or more git repositories.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

fn default_true() -> bool {
    true
}

fn is_true(v: &bool) -> bool {
    *v
}

/// SSH settings for a repository, plus any additional named repositories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SshUriProperties {
    /// Raw repository URI
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_key_algorithm: Option<String>,
    /// Only the credentials configured here may be used for this repository
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub ignore_local_ssh_settings: bool,
    #[serde(default = "default_true", skip_serializing_if = "is_true")]
    pub strict_host_key_checking: bool,
    /// Additional repositories beyond this one, keyed by name
    #[serde(default, skip_serializing_if = "Repos::is_empty")]
    pub repos: Repos,
}

impl Default for SshUriProperties {
    fn default() -> Self {
        Self {
            uri: None,
            private_key: None,
            host_key: None,
            host_key_algorithm: None,
            ignore_local_ssh_settings: false,
            strict_host_key_checking: true,
            repos: Repos::default(),
        }
    }
}

impl SshUriProperties {
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: Some(uri.into()),
            ..Self::default()
        }
    }

    pub fn with_private_key(mut self, private_key: impl Into<String>) -> Self {
        self.private_key = Some(private_key.into());
        self
    }

    pub fn with_host_key(mut self, host_key: impl Into<String>) -> Self {
        self.host_key = Some(host_key.into());
        self
    }

    pub fn with_host_key_algorithm(mut self, algorithm: impl Into<String>) -> Self {
        self.host_key_algorithm = Some(algorithm.into());
        self
    }

    pub fn with_ignore_local_ssh_settings(mut self, ignore: bool) -> Self {
        self.ignore_local_ssh_settings = ignore;
        self
    }

    pub fn with_strict_host_key_checking(mut self, strict: bool) -> Self {
        self.strict_host_key_checking = strict;
        self
    }

    /// Add (or replace) a named additional repository.
    pub fn add_repo(&mut self, name: impl Into<String>, repo: SshUriProperties) {
        self.repos.insert(name, repo);
    }

    /// Builder form of [`add_repo`](Self::add_repo).
    pub fn with_repo(mut self, name: impl Into<String>, repo: SshUriProperties) -> Self {
        self.add_repo(name, repo);
        self
    }
}

/// Named additional repositories, kept in insertion order.
///
/// Ordering decides which entry wins when two repos resolve to the same
/// host, so this deserializes from a mapping without losing document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Repos {
    entries: Vec<(String, SshUriProperties)>,
}

impl Repos {
    /// Insert a repo. An existing name is replaced in place.
    pub fn insert(&mut self, name: impl Into<String>, repo: SshUriProperties) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = repo,
            None => self.entries.push((name, repo)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&SshUriProperties> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, repo)| repo)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SshUriProperties)> {
        self.entries.iter().map(|(n, repo)| (n.as_str(), repo))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<N: Into<String>> FromIterator<(N, SshUriProperties)> for Repos {
    fn from_iter<I: IntoIterator<Item = (N, SshUriProperties)>>(iter: I) -> Self {
        let mut repos = Repos::default();
        for (name, repo) in iter {
            repos.insert(name, repo);
        }
        repos
    }
}

impl Serialize for Repos {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, repo) in &self.entries {
            map.serialize_entry(name, repo)?;
        }
        map.end()
    }
}

struct ReposVisitor;

impl<'de> Visitor<'de> for ReposVisitor {
    type Value = Repos;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a mapping of repository names to SSH properties")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Repos, A::Error> {
        let mut repos = Repos::default();
        while let Some((name, repo)) = access.next_entry::<String, SshUriProperties>()? {
            repos.insert(name, repo);
        }
        Ok(repos)
    }

    fn visit_unit<E: serde::de::Error>(self) -> Result<Repos, E> {
        Ok(Repos::default())
    }
}

impl<'de> Deserialize<'de> for Repos {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ReposVisitor)
    }
}
