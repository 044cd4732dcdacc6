//! Simulated process backend shared by the integration tests

// not every suite exercises every helper
#![allow(dead_code)]

use memwalker::core::types::{
    Address, MemoryError, MemoryRegion, MemoryResult, ModuleInfo, MEM_COMMIT, PAGE_READWRITE,
};
use memwalker::ProcessMemory;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

const MEM_FREE: u32 = 0x10000;
const PAGE_NOACCESS: u32 = 0x01;
const ALLOC_BASE: usize = 0x7000_0000;

/// Routes the library's debug output through the test writer, filtered by
/// RUST_LOG. Safe to call from every suite; later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

struct FakePage {
    region: MemoryRegion,
    bytes: Vec<u8>,
}

/// An in-memory address space standing in for a target process.
///
/// Regions are kept sorted by base; gaps between them are reported as free
/// pages by `query_region`, the way a real region walk sees them.
pub struct FakeProcess {
    pages: Mutex<Vec<FakePage>>,
    modules: Mutex<Vec<ModuleInfo>>,
    running: AtomicBool,
    queries: Mutex<Vec<usize>>,
    next_alloc: AtomicUsize,
}

impl FakeProcess {
    pub fn new() -> Self {
        init_tracing();
        FakeProcess {
            pages: Mutex::new(Vec::new()),
            modules: Mutex::new(Vec::new()),
            running: AtomicBool::new(true),
            queries: Mutex::new(Vec::new()),
            next_alloc: AtomicUsize::new(ALLOC_BASE),
        }
    }

    /// Adds a committed region with the given protection and backing bytes
    pub fn add_region(&self, base: usize, protect: u32, bytes: Vec<u8>) {
        let region = MemoryRegion::new(Address::new(base), bytes.len(), protect, MEM_COMMIT);
        let mut pages = self.pages.lock().unwrap();
        pages.push(FakePage { region, bytes });
        pages.sort_by_key(|page| page.region.base);
    }

    /// Adds a committed read-write region
    pub fn add_rw_region(&self, base: usize, bytes: Vec<u8>) {
        self.add_region(base, PAGE_READWRITE, bytes);
    }

    /// Adds a committed region the scanner must skip without reading
    pub fn add_noaccess_region(&self, base: usize, size: usize) {
        self.add_region(base, PAGE_NOACCESS, vec![0u8; size]);
    }

    pub fn add_module(&self, name: &str, base: usize, size: usize) {
        self.modules
            .lock()
            .unwrap()
            .push(ModuleInfo::new(name, Address::new(base), size));
    }

    /// Flips the simulated liveness state
    pub fn set_running(&self, running: bool) {
        self.running.store(running, Ordering::SeqCst);
    }

    /// Addresses passed to `query_region`, in call order
    pub fn queried_addresses(&self) -> Vec<usize> {
        self.queries.lock().unwrap().clone()
    }

    pub fn has_region_at(&self, base: usize) -> bool {
        self.pages
            .lock()
            .unwrap()
            .iter()
            .any(|page| page.region.base.as_usize() == base)
    }
}

impl ProcessMemory for FakeProcess {
    fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    fn read(&self, address: usize, buf: &mut [u8]) -> MemoryResult<()> {
        let pages = self.pages.lock().unwrap();
        for page in pages.iter() {
            let base = page.region.base.as_usize();
            if address >= base && address + buf.len() <= base + page.bytes.len() {
                if page.region.protect == PAGE_NOACCESS {
                    return Err(MemoryError::read_failed(address));
                }
                let offset = address - base;
                buf.copy_from_slice(&page.bytes[offset..offset + buf.len()]);
                return Ok(());
            }
        }
        Err(MemoryError::read_failed(address))
    }

    fn write(&self, address: usize, data: &[u8]) -> MemoryResult<()> {
        let mut pages = self.pages.lock().unwrap();
        for page in pages.iter_mut() {
            let base = page.region.base.as_usize();
            if address >= base && address + data.len() <= base + page.bytes.len() {
                if page.region.protect == PAGE_NOACCESS {
                    return Err(MemoryError::write_failed(address));
                }
                let offset = address - base;
                page.bytes[offset..offset + data.len()].copy_from_slice(data);
                return Ok(());
            }
        }
        Err(MemoryError::write_failed(address))
    }

    fn query_region(&self, address: usize) -> MemoryResult<MemoryRegion> {
        self.queries.lock().unwrap().push(address);

        let pages = self.pages.lock().unwrap();
        for page in pages.iter() {
            let base = page.region.base.as_usize();
            if address >= base && address < base + page.region.size {
                return Ok(page.region);
            }
            if address < base {
                // gap before the next mapped region reports as free pages
                return Ok(MemoryRegion::new(
                    Address::new(address),
                    base - address,
                    0,
                    MEM_FREE,
                ));
            }
        }
        Err(MemoryError::InvalidAddress(format!("0x{:X}", address)))
    }

    fn base_module(&self) -> MemoryResult<ModuleInfo> {
        self.modules
            .lock()
            .unwrap()
            .first()
            .cloned()
            .ok_or_else(|| MemoryError::ModuleNotFound("base module".to_string()))
    }

    fn module_by_name(&self, name: &str) -> MemoryResult<ModuleInfo> {
        self.modules
            .lock()
            .unwrap()
            .iter()
            .find(|module| module.name.eq_ignore_ascii_case(name))
            .cloned()
            .ok_or_else(|| MemoryError::ModuleNotFound(name.to_string()))
    }

    fn allocate(&self, size: usize) -> MemoryResult<usize> {
        // allocations land well above the mapped test regions
        let base = self.next_alloc.fetch_add(size.max(0x1000), Ordering::SeqCst);
        self.add_rw_region(base, vec![0u8; size]);
        Ok(base)
    }

    fn free(&self, address: usize) -> MemoryResult<()> {
        let mut pages = self.pages.lock().unwrap();
        let before = pages.len();
        pages.retain(|page| page.region.base.as_usize() != address);
        if pages.len() == before {
            return Err(MemoryError::InvalidAddress(format!("0x{:X}", address)));
        }
        Ok(())
    }
}
