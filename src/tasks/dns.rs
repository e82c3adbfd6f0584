//! Reverse DNS resolution over a list of IP-looking strings

use crate::abstractions::ReverseResolver;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::net::Ipv4Addr;
use tracing::{debug, trace};

/// Anchored at the start only: trailing text is tolerated and out-of-range
/// octets still count as IP-looking.
static IP_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+(?:\.[0-9]+){3}").expect("Invalid regex pattern"));

/// Whether `candidate` looks like a dotted-quad address
pub fn looks_like_ip(candidate: &str) -> bool {
    IP_REGEX.is_match(candidate)
}

/// Insertion-ordered mapping from input address to resolved hostname
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HostnameMap {
    entries: Vec<(String, Option<String>)>,
}

impl HostnameMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite; an existing key keeps its original position
    pub fn insert(&mut self, ip: String, hostname: Option<String>) {
        match self.entries.iter_mut().find(|(key, _)| *key == ip) {
            Some((_, value)) => *value = hostname,
            None => self.entries.push((ip, hostname)),
        }
    }

    /// `None` when the address was never seen, `Some(None)` when it did not resolve
    pub fn get(&self, ip: &str) -> Option<Option<&str>> {
        self.entries
            .iter()
            .find(|(key, _)| key == ip)
            .map(|(_, value)| value.as_deref())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_deref()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Map each IP-looking input to its hostname, or `None` when it cannot be resolved.
///
/// Inputs that do not look like an address are skipped. Lookup failures never
/// abort the call.
pub fn resolve_hostnames<S, R>(ip_addresses: &[S], resolver: &R) -> HostnameMap
where
    S: AsRef<str>,
    R: ReverseResolver + ?Sized,
{
    let mut hostnames = HostnameMap::new();

    for ip in ip_addresses {
        let ip = ip.as_ref();
        if !looks_like_ip(ip) {
            trace!("Skipping non-address input {:?}", ip);
            continue;
        }

        let hostname = match ip.parse::<Ipv4Addr>() {
            Ok(addr) => match resolver.reverse_lookup(addr.into()) {
                Ok(name) if !name.is_empty() => Some(name),
                Ok(_) => None,
                Err(e) => {
                    debug!("Reverse lookup failed for {}: {}", ip, e);
                    None
                }
            },
            Err(e) => {
                debug!("{} is not a routable IPv4 address: {}", ip, e);
                None
            }
        };

        hostnames.insert(ip.to_string(), hostname);
    }

    hostnames
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abstractions::MockResolver;
    use std::net::IpAddr;

    fn google_resolver() -> MockResolver {
        MockResolver::new()
            .with_host("8.8.8.8".parse().unwrap(), "dns.google")
            .with_host("8.8.4.4".parse().unwrap(), "dns.google")
    }

    #[test]
    fn test_resolves_known_hosts() {
        let result = resolve_hostnames(&["8.8.8.8", "8.8.4.4"], &google_resolver());
        assert_eq!(result.get("8.8.8.8"), Some(Some("dns.google")));
        assert_eq!(result.get("8.8.4.4"), Some(Some("dns.google")));
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn test_out_of_range_octets_map_to_none() {
        let resolver = google_resolver();
        let result = resolve_hostnames(&["256.256.256.256"], &resolver);
        assert_eq!(result.get("256.256.256.256"), Some(None));
        // never reaches the resolver
        assert!(resolver.looked_up().is_empty());
    }

    #[test]
    fn test_leading_zero_octets_map_to_none() {
        let resolver = MockResolver::new().with_host("10.0.0.1".parse().unwrap(), "gateway");
        let result = resolve_hostnames(&["010.0.0.1", "10.0.0.1"], &resolver);

        // octal-looking octets are ambiguous and are not reinterpreted
        assert_eq!(result.get("010.0.0.1"), Some(None));
        assert_eq!(result.get("10.0.0.1"), Some(Some("gateway")));
        assert_eq!(resolver.looked_up(), vec!["10.0.0.1".parse::<IpAddr>().unwrap()]);
    }

    #[test]
    fn test_empty_input() {
        let result = resolve_hostnames::<&str, _>(&[], &google_resolver());
        assert!(result.is_empty());
    }

    #[test]
    fn test_preserves_input_order() {
        let result = resolve_hostnames(&["1.1.1.1", "2.2.2.2"], &google_resolver());
        assert_eq!(result.keys().collect::<Vec<_>>(), vec!["1.1.1.1", "2.2.2.2"]);
        assert!(result.iter().all(|(_, host)| host.is_none()));
    }

    #[test]
    fn test_skips_non_address_input() {
        let result = resolve_hostnames(&["localhost", "8.8.8", "8.8.8.8"], &google_resolver());
        assert_eq!(result.keys().collect::<Vec<_>>(), vec!["8.8.8.8"]);
    }

    #[test]
    fn test_prefix_match_keeps_trailing_text() {
        let resolver = google_resolver();
        let result = resolve_hostnames(&["8.8.8.8/32"], &resolver);
        assert_eq!(result.get("8.8.8.8/32"), Some(None));
        assert!(resolver.looked_up().is_empty());
    }

    #[test]
    fn test_duplicates_keep_first_position() {
        let result = resolve_hostnames(&["8.8.8.8", "1.1.1.1", "8.8.8.8"], &google_resolver());
        assert_eq!(result.keys().collect::<Vec<_>>(), vec!["8.8.8.8", "1.1.1.1"]);
    }

    #[test]
    fn test_empty_hostname_is_absent() {
        let addr: IpAddr = "10.1.2.3".parse().unwrap();
        let resolver = MockResolver::new().with_host(addr, "");
        let result = resolve_hostnames(&["10.1.2.3"], &resolver);
        assert_eq!(result.get("10.1.2.3"), Some(None));
    }
}
