//! Pattern scanning across a process's address space

use super::pattern::Pattern;
use super::reader::read_exact;
use crate::core::types::{Address, MemoryError, MemoryResult, ModuleInfo, ScanResult};
use crate::process::ProcessMemory;
use std::sync::Arc;
use tokio::task;
use tracing::debug;

/// Upper bound for whole-process scans: the user-space ceiling of a 48-bit
/// x86-64 address space. Targets with a different layout must derive their
/// own bound instead of reusing this one.
pub const USER_SPACE_CEILING: usize = 0x7FFF_FFFF_0000;

/// Walks virtual memory regions and searches their bytes for a pattern.
///
/// The whole walk, including the bulk region reads and the match step, runs
/// on the blocking worker pool so large scans never stall the scheduler.
pub struct MemoryScanner<P: ProcessMemory> {
    process: Arc<P>,
}

impl<P: ProcessMemory> Clone for MemoryScanner<P> {
    fn clone(&self) -> Self {
        MemoryScanner {
            process: Arc::clone(&self.process),
        }
    }
}

impl<P: ProcessMemory> MemoryScanner<P> {
    /// Creates a scanner over an already-attached process
    pub fn new(process: Arc<P>) -> Self {
        MemoryScanner { process }
    }

    /// Scans for `pattern` and applies the result policy.
    ///
    /// With `module` set, only that module's image range is walked, always in
    /// full. Without it, the walk starts at the base module and advances
    /// region by region toward [`USER_SPACE_CEILING`], stopping at the first
    /// region that yields a match unless `return_multiple` is set.
    ///
    /// Zero matches fail with [`MemoryError::PatternNotFound`]; more than one
    /// when a single result was requested fails with
    /// [`MemoryError::PatternAmbiguous`].
    pub async fn pattern_scan(
        &self,
        pattern: &Pattern,
        module: Option<&str>,
        return_multiple: bool,
    ) -> MemoryResult<ScanResult> {
        let process = Arc::clone(&self.process);
        let pattern = pattern.clone();
        let module = module.map(str::to_owned);

        let (pattern, found) = task::spawn_blocking(move || -> MemoryResult<(Pattern, Vec<Address>)> {
            let found = match module {
                Some(name) => {
                    let module = process.module_by_name(&name)?;
                    scan_module(&*process, &module, &pattern)?
                }
                None => {
                    let base = process.base_module()?.base_address;
                    scan_all_from(&*process, base, &pattern, return_multiple)?
                }
            };
            Ok((pattern, found))
        })
        .await??;

        debug!(results = found.len(), %pattern, "pattern scan finished");

        let count = found.len();
        if count == 0 {
            Err(MemoryError::PatternNotFound(pattern.to_string()))
        } else if return_multiple {
            Ok(ScanResult::Multiple(found))
        } else if count > 1 {
            Err(MemoryError::pattern_ambiguous(pattern.to_string(), count))
        } else {
            Ok(ScanResult::Single(found[0]))
        }
    }
}

/// Searches one region, returning the cursor for the next region and any
/// matches. Regions that are uncommitted or lack a readable protection are
/// skipped without touching their bytes.
fn scan_region<P: ProcessMemory>(
    process: &P,
    cursor: Address,
    pattern: &Pattern,
) -> MemoryResult<Option<(Address, Vec<Address>)>> {
    let region = match process.query_region(cursor.as_usize()) {
        Ok(region) => region,
        // past the last mapped region
        Err(_) => return Ok(None),
    };

    let next = region.next();
    if next <= cursor {
        return Ok(None);
    }

    if !region.is_scannable() {
        return Ok(Some((next, Vec::new())));
    }

    let bytes = read_exact(process, region.base.as_usize(), region.size)?;

    let mut found = Vec::new();
    for offset in pattern.find_all(&bytes) {
        let address = region.base.offset(offset as isize);
        debug!(%address, %pattern, region = %region.base, "pattern match");
        found.push(address);
    }

    Ok(Some((next, found)))
}

/// Whole-process walk from `start` up to the user-space ceiling
fn scan_all_from<P: ProcessMemory>(
    process: &P,
    start: Address,
    pattern: &Pattern,
    return_multiple: bool,
) -> MemoryResult<Vec<Address>> {
    let mut cursor = start;
    let mut found = Vec::new();

    while cursor.as_usize() < USER_SPACE_CEILING {
        let (next, region_found) = match scan_region(process, cursor, pattern)? {
            Some(step) => step,
            None => break,
        };
        found.extend(region_found);

        // single-result scans stop at the first region that matched to
        // bound cost; ambiguity within that region is still reported
        if !return_multiple && !found.is_empty() {
            break;
        }

        cursor = next;
    }

    Ok(found)
}

/// Module walk over the full image range, regardless of result mode
fn scan_module<P: ProcessMemory>(
    process: &P,
    module: &ModuleInfo,
    pattern: &Pattern,
) -> MemoryResult<Vec<Address>> {
    let mut cursor = module.base_address;
    let end = module.end_address();
    let mut found = Vec::new();

    while cursor < end {
        let (next, region_found) = match scan_region(process, cursor, pattern)? {
            Some(step) => step,
            None => break,
        };
        found.extend(region_found);
        cursor = next;
    }

    Ok(found)
}
