//! Loaded module information

use super::Address;
use serde::{Deserialize, Serialize};

/// Information about a module loaded in the target process
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleInfo {
    pub name: String,
    pub base_address: Address,
    pub size: usize,
}

impl ModuleInfo {
    pub fn new(name: impl Into<String>, base_address: Address, size: usize) -> Self {
        ModuleInfo {
            name: name.into(),
            base_address,
            size,
        }
    }

    /// First address past the module image
    pub fn end_address(&self) -> Address {
        self.base_address.offset(self.size as isize)
    }

    /// Checks if an address falls within the module image
    pub fn contains_address(&self, address: Address) -> bool {
        address >= self.base_address && address < self.end_address()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_bounds() {
        let module = ModuleInfo::new("client.exe", Address::new(0x40_0000), 0x1000);
        assert_eq!(module.end_address(), Address::new(0x40_1000));
        assert!(module.contains_address(Address::new(0x40_0800)));
        assert!(!module.contains_address(Address::new(0x40_1000)));
        assert!(!module.contains_address(Address::new(0x3F_FFFF)));
    }
}
