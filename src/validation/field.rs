use std::net::{Ipv4Addr, Ipv6Addr};

/// Outcome of checking one raw field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Valid,
    Invalid,
}

impl Verdict {
    pub fn is_valid(&self) -> bool {
        matches!(self, Verdict::Valid)
    }

    fn from_bool(valid: bool) -> Self {
        if valid {
            Verdict::Valid
        } else {
            Verdict::Invalid
        }
    }
}

/// Which predicate a form field is checked with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Hostname,
    Nameserver,
    Ipv4,
    Ipv6,
    Ttl,
    Priority,
    /// Free text that must not be empty (TXT and SRV data).
    Text,
}

/// Minimum TTL accepted from a form, in seconds.
pub const MIN_TTL: u32 = 60;

impl FieldKind {
    pub fn validate(&self, raw: &str) -> Verdict {
        validate(*self, raw)
    }
}

pub fn validate(kind: FieldKind, raw: &str) -> Verdict {
    let valid = match kind {
        FieldKind::Hostname => is_hostname(raw),
        FieldKind::Nameserver => is_hostname(raw) && !raw.contains('@'),
        FieldKind::Ipv4 => is_ipv4(raw),
        FieldKind::Ipv6 => is_ipv6(raw),
        FieldKind::Ttl => is_ttl(raw),
        FieldKind::Priority => !raw.is_empty(),
        FieldKind::Text => !raw.is_empty(),
    };
    Verdict::from_bool(valid)
}

fn is_hostname(raw: &str) -> bool {
    !raw.is_empty() && !raw.chars().any(char::is_whitespace)
}

fn is_ipv4(raw: &str) -> bool {
    raw.parse::<Ipv4Addr>().is_ok()
}

/// Full IPv6 literal, optionally followed by `%<zone index>`.
fn is_ipv6(raw: &str) -> bool {
    let address = match raw.split_once('%') {
        Some((address, zone)) => {
            if zone.is_empty() || zone.chars().any(char::is_whitespace) {
                return false;
            }
            address
        }
        None => raw,
    };

    let groups_fit = address
        .split(':')
        .all(|group| group.len() <= 4 || group.contains('.'));

    groups_fit && address.parse::<Ipv6Addr>().is_ok()
}

/// Empty means "use the zone default".
fn is_ttl(raw: &str) -> bool {
    if raw.is_empty() {
        return true;
    }
    raw.parse::<u32>().map(|ttl| ttl >= MIN_TTL).unwrap_or(false)
}
