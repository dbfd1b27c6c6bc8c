//! Hostname extraction from git SSH URIs.
//!
//! Two forms are recognized:
//! - scheme form: `ssh://[user@]host[:port]/path` and `git+ssh://...`
//! - SCP-like form: `[user@]host:path`
//!
//! The SCP-like form is not valid generic URI syntax, so each form has its
//! own matcher instead of going through a URI parser.

/// URI schemes that carry git over SSH
const SSH_SCHEMES: &[&str] = &["ssh://", "git+ssh://"];

/// Return the host segment of an SSH git URI, or `None` if `uri` is not one.
///
/// The host is returned exactly as written (no lower-casing, no resolution).
/// Bracketed IPv6 literals are returned without the brackets.
pub fn extract_hostname(uri: &str) -> Option<&str> {
    if has_scheme(uri) {
        scheme_authority(uri).map(|(host, _)| host)
    } else {
        scp_like_host(uri)
    }
}

/// Explicit port of a scheme-form SSH URI (`ssh://host:2222/...`).
///
/// SCP-like URIs never carry a port, so they return `None`.
pub fn extract_port(uri: &str) -> Option<u16> {
    if !has_scheme(uri) {
        return None;
    }
    let (_, port) = scheme_authority(uri)?;
    port.filter(|p| !p.is_empty())?.parse().ok()
}

/// Whether `uri` is a git URI reachable over SSH.
pub fn is_ssh_uri(uri: &str) -> bool {
    extract_hostname(uri).is_some()
}

/// `scheme://` at the start of the string, not `://` somewhere in an SCP-like path
fn has_scheme(uri: &str) -> bool {
    match uri.split_once("://") {
        Some((scheme, _)) => {
            !scheme.is_empty() && !scheme.contains(|c: char| matches!(c, '@' | ':' | '/'))
        }
        None => false,
    }
}

/// Host and raw port of a scheme-form SSH URI.
fn scheme_authority(uri: &str) -> Option<(&str, Option<&str>)> {
    let rest = SSH_SCHEMES
        .iter()
        .find_map(|scheme| uri.strip_prefix(*scheme))?;
    let authority = match rest.find('/') {
        Some(i) => &rest[..i],
        None => rest,
    };
    let host_port = match authority.rfind('@') {
        Some(i) => &authority[i + 1..],
        None => authority,
    };

    let (host, port) = match host_port.strip_prefix('[') {
        Some(bracketed) => {
            let (host, after) = bracketed.split_once(']')?;
            let port = match after {
                "" => None,
                _ => Some(after.strip_prefix(':')?),
            };
            (host, port)
        }
        None => match host_port.split_once(':') {
            Some((host, port)) => (host, Some(port)),
            None => (host_port, None),
        },
    };

    // An empty port (`host:/path`) is tolerated, anything else must be numeric
    if let Some(port) = port {
        if !port.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
    }

    is_valid_host(host).then_some((host, port))
}

fn scp_like_host(uri: &str) -> Option<&str> {
    // The user part may itself contain `:` (`user:pass@host:path`), so it
    // only counts as a user when a `host:path` follows the `@`.
    let host_path = match uri.split_once('@') {
        Some(("", _)) => return None,
        Some((_, rest)) if rest.contains(':') => rest,
        _ => uri,
    };
    let (host, path) = host_path.split_once(':')?;

    if path.is_empty() || path.starts_with("//") || starts_with_port(path) {
        return None;
    }
    if is_drive_letter(host, path) || host.contains(['[', ']']) {
        return None;
    }

    is_valid_host(host).then_some(host)
}

/// `22/repo` or `22` would read as a port, not as a path
fn starts_with_port(path: &str) -> bool {
    let digits = path.bytes().take_while(u8::is_ascii_digit).count();
    digits > 0 && matches!(path.as_bytes().get(digits).copied(), None | Some(b'/'))
}

/// `C:\repo` and `C:/repo` are local Windows paths
fn is_drive_letter(host: &str, path: &str) -> bool {
    host.len() == 1
        && host.bytes().all(|b| b.is_ascii_alphabetic())
        && (path.starts_with('\\') || path.starts_with('/'))
}

fn is_valid_host(host: &str) -> bool {
    !host.is_empty()
        && !host
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '/' | '\\' | '@' | '?' | '#'))
}
