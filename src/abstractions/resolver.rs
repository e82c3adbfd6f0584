//! Reverse DNS abstraction layer
//!
//! Provides a trait-based seam over the system resolver so hostname
//! lookups can be tested without network access.

use std::collections::HashMap;
use std::io;
use std::net::IpAddr;
use std::sync::Mutex;

/// Trait for reverse DNS lookups
pub trait ReverseResolver: Send + Sync {
    /// Resolve an address back to its host name
    fn reverse_lookup(&self, addr: IpAddr) -> io::Result<String>;
}

/// Resolver backed by the operating system's `getnameinfo`
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemResolver;

impl SystemResolver {
    pub fn new() -> Self {
        Self
    }
}

impl ReverseResolver for SystemResolver {
    fn reverse_lookup(&self, addr: IpAddr) -> io::Result<String> {
        dns_lookup::lookup_addr(&addr)
    }
}

/// Mock implementation of ReverseResolver for testing
pub struct MockResolver {
    /// Known address to hostname entries; anything else fails to resolve
    pub entries: HashMap<IpAddr, String>,
    /// Track looked up addresses for verification
    pub lookups: Mutex<Vec<IpAddr>>,
}

impl MockResolver {
    /// Create a new MockResolver with no known hosts
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            lookups: Mutex::new(Vec::new()),
        }
    }

    /// Register a hostname for an address
    pub fn with_host(mut self, addr: IpAddr, hostname: &str) -> Self {
        self.entries.insert(addr, hostname.to_string());
        self
    }

    /// Get the list of addresses that were looked up
    pub fn looked_up(&self) -> Vec<IpAddr> {
        self.lookups
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

impl Default for MockResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl ReverseResolver for MockResolver {
    fn reverse_lookup(&self, addr: IpAddr) -> io::Result<String> {
        if let Ok(mut lookups) = self.lookups.lock() {
            lookups.push(addr);
        }

        self.entries.get(&addr).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("Unknown host for address {}", addr),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_resolver_known_and_unknown() {
        let google: IpAddr = "8.8.8.8".parse().unwrap();
        let other: IpAddr = "10.0.0.1".parse().unwrap();
        let mock = MockResolver::new().with_host(google, "dns.google");

        assert_eq!(mock.reverse_lookup(google).unwrap(), "dns.google");
        let err = mock.reverse_lookup(other).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);

        assert_eq!(mock.looked_up(), vec![google, other]);
    }
}
