//! Virtual memory region metadata

use super::Address;
use serde::{Deserialize, Serialize};

/// MEM_COMMIT state flag
pub const MEM_COMMIT: u32 = 0x1000;

/// PAGE_READONLY protection
pub const PAGE_READONLY: u32 = 0x02;
/// PAGE_READWRITE protection
pub const PAGE_READWRITE: u32 = 0x04;
/// PAGE_EXECUTE_READ protection
pub const PAGE_EXECUTE_READ: u32 = 0x20;
/// PAGE_EXECUTE_READWRITE protection
pub const PAGE_EXECUTE_READWRITE: u32 = 0x40;

/// A contiguous range of the target's address space with uniform protection
/// and commit state. Produced by a region query and consumed immediately by
/// the scanner; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryRegion {
    pub base: Address,
    pub size: usize,
    pub protect: u32,
    pub state: u32,
}

impl MemoryRegion {
    pub fn new(base: Address, size: usize, protect: u32, state: u32) -> Self {
        MemoryRegion {
            base,
            size,
            protect,
            state,
        }
    }

    /// First address past this region, where the scan cursor resumes
    pub fn next(&self) -> Address {
        self.base.offset(self.size as isize)
    }

    /// Whether the scanner may read this region's bytes.
    ///
    /// Uncommitted regions and protections outside the readable set would
    /// fault on a bulk read, so they are skipped without being touched.
    pub fn is_scannable(&self) -> bool {
        self.state == MEM_COMMIT
            && matches!(
                self.protect,
                PAGE_EXECUTE_READ | PAGE_EXECUTE_READWRITE | PAGE_READWRITE | PAGE_READONLY
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_next() {
        let region = MemoryRegion::new(Address::new(0x1000), 0x2000, PAGE_READWRITE, MEM_COMMIT);
        assert_eq!(region.next(), Address::new(0x3000));
    }

    #[test]
    fn test_scannable_protections() {
        for protect in [
            PAGE_READONLY,
            PAGE_READWRITE,
            PAGE_EXECUTE_READ,
            PAGE_EXECUTE_READWRITE,
        ] {
            let region = MemoryRegion::new(Address::new(0x1000), 0x1000, protect, MEM_COMMIT);
            assert!(region.is_scannable(), "0x{:X} should be scannable", protect);
        }
    }

    #[test]
    fn test_guarded_and_noaccess_skipped() {
        // PAGE_NOACCESS and PAGE_GUARD|PAGE_READWRITE are outside the set
        for protect in [0x01, 0x104, 0x08, 0x10] {
            let region = MemoryRegion::new(Address::new(0x1000), 0x1000, protect, MEM_COMMIT);
            assert!(!region.is_scannable(), "0x{:X} should be skipped", protect);
        }
    }

    #[test]
    fn test_uncommitted_skipped() {
        // MEM_FREE and MEM_RESERVE are never read
        let free = MemoryRegion::new(Address::new(0x1000), 0x1000, PAGE_READWRITE, 0x10000);
        assert!(!free.is_scannable());

        let reserved = MemoryRegion::new(Address::new(0x1000), 0x1000, PAGE_READWRITE, 0x2000);
        assert!(!reserved.is_scannable());
    }
}
