//! Query-string parsing and validation for update requests.
//!
//! The HTTP layer hands over the raw query pairs; this module turns them
//! into a validated [`UpdateRequest`] or a typed [`Error`]. Validation is
//! strict and ordered so the dispatcher can reject trivially bad input
//! with a single 400 before any remote call is made: empty fields first,
//! then the record type, then the address against that type, then the
//! record name grammar.

use crate::error::Error;
use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

lazy_static! {
    // A usual domain name: two or more labels joined by dots, each label
    // 1-63 chars starting with an alphanumeric or underscore. No single
    // words, no trailing dot.
    static ref DNS_NAME: Regex = Regex::new(
        r"^([A-Za-z0-9_][A-Za-z0-9_-]{0,62})(\.[A-Za-z0-9_][A-Za-z0-9_-]{0,62})+$"
    )
    .unwrap();
    static ref SCOPE_ID: Regex = Regex::new(r"^[0-9A-Za-z]+$").unwrap();
}

/// DNS record kinds the service manages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    /// An IPv4 address record.
    A,
    /// An IPv6 address record.
    AAAA,
}

impl RecordKind {
    /// The wire name of the record type, as the provider API expects it.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            RecordKind::A => "A",
            RecordKind::AAAA => "AAAA",
        }
    }

    /// The address family a record of this kind carries.
    #[must_use]
    pub fn address_family(self) -> &'static str {
        match self {
            RecordKind::A => "IPv4",
            RecordKind::AAAA => "IPv6",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated instruction to point `name`'s `kind` record at `addr`.
///
/// Instances only exist on the far side of [`UpdateRequest::from_query`]:
/// the address is guaranteed to be a literal of the right family and the
/// name is guaranteed to match the DNS-name grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateRequest {
    pub kind: RecordKind,
    pub name: String,
    pub token: String,
    pub addr: String,
}

impl UpdateRequest {
    /// Parses the supported query parameters (`type`, `domain`, `token`,
    /// `ip`) into a validated request. The first occurrence of each key
    /// wins and values are trimmed on both ends; `type` is uppercased
    /// and defaults to `A` when absent.
    ///
    /// # Errors
    ///
    /// Returns the first failing check: [`Error::EmptyField`],
    /// [`Error::InvalidType`], [`Error::InvalidAddress`], or
    /// [`Error::InvalidName`].
    pub fn from_query(params: &[(String, String)]) -> Result<Self, Error> {
        let kind = first_value(params, "type").trim().to_uppercase();
        let name = first_value(params, "domain").trim().to_string();
        let token = first_value(params, "token").trim().to_string();
        let addr = first_value(params, "ip").trim().to_string();

        if name.is_empty() || token.is_empty() || addr.is_empty() {
            return Err(Error::EmptyField);
        }

        let kind = match kind.as_str() {
            "" | "A" => RecordKind::A,
            "AAAA" => RecordKind::AAAA,
            _ => return Err(Error::InvalidType),
        };

        let addr_is_valid = match kind {
            RecordKind::A => is_ipv4_literal(&addr),
            RecordKind::AAAA => is_ipv6_literal(&addr),
        };
        if !addr_is_valid {
            return Err(Error::InvalidAddress(kind));
        }

        if !DNS_NAME.is_match(&name) {
            return Err(Error::InvalidName);
        }

        Ok(Self {
            kind,
            name,
            token,
            addr,
        })
    }

    /// The apex zone the record is managed under: the last two labels of
    /// the name, joined by a dot. `None` when fewer than two labels
    /// exist, which cannot happen for a parsed request.
    #[must_use]
    pub fn zone(&self) -> Option<String> {
        let labels: Vec<&str> = self.name.split('.').collect();
        match labels.as_slice() {
            [.., apex, tld] => Some(format!("{apex}.{tld}")),
            _ => None,
        }
    }
}

fn first_value<'a>(params: &'a [(String, String)], key: &str) -> &'a str {
    params
        .iter()
        .find(|(k, _)| k == key)
        .map_or("", |(_, v)| v.as_str())
}

fn is_ipv4_literal(addr: &str) -> bool {
    Ipv4Addr::from_str(addr).is_ok()
}

/// Accepts the canonical IPv6 grammar, including `::` compression and
/// embedded IPv4 tails, plus the scoped `fe80:...%zone` link-local form.
fn is_ipv6_literal(addr: &str) -> bool {
    match addr.split_once('%') {
        None => Ipv6Addr::from_str(addr).is_ok(),
        Some((base, scope)) => {
            SCOPE_ID.is_match(scope)
                && Ipv6Addr::from_str(base).is_ok_and(|ip| ip.segments()[0] == 0xfe80)
        }
    }
}
