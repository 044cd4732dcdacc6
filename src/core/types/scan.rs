//! Pattern scan results

use super::Address;
use serde::{Deserialize, Serialize};

/// Outcome of a successful pattern scan.
///
/// `Single` is only produced when exactly one match was required and found;
/// a scan asked for multiple results always yields `Multiple`, even when it
/// holds one address. The two modes are never conflated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScanResult {
    Single(Address),
    Multiple(Vec<Address>),
}

impl ScanResult {
    /// The single address, if this was a single-result scan
    pub fn single(&self) -> Option<Address> {
        match self {
            ScanResult::Single(addr) => Some(*addr),
            ScanResult::Multiple(_) => None,
        }
    }

    /// All matched addresses, regardless of mode
    pub fn addresses(&self) -> Vec<Address> {
        match self {
            ScanResult::Single(addr) => vec![*addr],
            ScanResult::Multiple(addrs) => addrs.clone(),
        }
    }

    /// Number of matches carried
    pub fn len(&self) -> usize {
        match self {
            ScanResult::Single(_) => 1,
            ScanResult::Multiple(addrs) => addrs.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_accessors() {
        let result = ScanResult::Single(Address::new(0x1000));
        assert_eq!(result.single(), Some(Address::new(0x1000)));
        assert_eq!(result.addresses(), vec![Address::new(0x1000)]);
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn test_multiple_is_not_single() {
        // one element in multiple mode stays multiple
        let result = ScanResult::Multiple(vec![Address::new(0x1000)]);
        assert_eq!(result.single(), None);
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn test_multiple_addresses() {
        let addrs = vec![Address::new(0x1000), Address::new(0x2000)];
        let result = ScanResult::Multiple(addrs.clone());
        assert_eq!(result.addresses(), addrs);
        assert!(!result.is_empty());
    }
}
