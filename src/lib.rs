//! Per-host SSH credential selection for cloning git repositories.
//!
//! A main repository and any number of named additional repos each carry
//! SSH settings (private key, host key, host key algorithm). This crate
//! reduces them to one credential set per SSH host so a transport can pick
//! the right key when it connects.

pub mod config;
pub mod hostname;
pub mod known_hosts;
pub mod processor;
pub mod properties;
pub mod validation;

pub use hostname::{extract_hostname, extract_port, is_ssh_uri};
pub use processor::{build_hostname_map, SshKeysByHostname};
pub use properties::{Repos, SshUriProperties};
pub use validation::{ensure_valid, validate, Violation};
