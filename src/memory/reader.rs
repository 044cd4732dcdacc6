//! Asynchronous byte-level and typed memory access

use crate::core::types::{Address, MemoryError, MemoryResult, TypedValue, ValueType};
use crate::process::ProcessMemory;
use std::sync::Arc;
use tokio::task;
use tracing::debug;

/// Reads exactly `size` bytes, classifying a failure as [`MemoryError::ClientClosed`]
/// when the process has exited and [`MemoryError::ReadFailed`] otherwise.
///
/// Liveness is checked only after the syscall has failed; a pre-check would
/// double syscall volume on every access.
pub(crate) fn read_exact<P: ProcessMemory>(
    process: &P,
    address: usize,
    size: usize,
) -> MemoryResult<Vec<u8>> {
    let mut buffer = vec![0u8; size];
    match process.read(address, &mut buffer) {
        Ok(()) => Ok(buffer),
        Err(_) => {
            if process.is_running() {
                Err(MemoryError::read_failed(address))
            } else {
                Err(MemoryError::ClientClosed)
            }
        }
    }
}

/// Write-side counterpart of [`read_exact`]
pub(crate) fn write_exact<P: ProcessMemory>(
    process: &P,
    address: usize,
    data: &[u8],
) -> MemoryResult<()> {
    match process.write(address, data) {
        Ok(()) => Ok(()),
        Err(_) => {
            if process.is_running() {
                Err(MemoryError::write_failed(address))
            } else {
                Err(MemoryError::ClientClosed)
            }
        }
    }
}

/// Reads and writes the target process's memory without blocking the
/// scheduler: every syscall is submitted to the blocking worker pool and the
/// calling task suspends until it completes.
pub struct MemoryReader<P: ProcessMemory> {
    process: Arc<P>,
}

impl<P: ProcessMemory> Clone for MemoryReader<P> {
    fn clone(&self) -> Self {
        MemoryReader {
            process: Arc::clone(&self.process),
        }
    }
}

impl<P: ProcessMemory> MemoryReader<P> {
    /// Creates a reader over an already-attached process
    pub fn new(process: Arc<P>) -> Self {
        MemoryReader { process }
    }

    /// The underlying process backend
    pub fn process(&self) -> &Arc<P> {
        &self.process
    }

    /// Whether the target process is still running. Diagnostic only; I/O
    /// paths classify failures reactively instead of calling this first.
    pub fn is_running(&self) -> bool {
        self.process.is_running()
    }

    /// Reads `size` bytes starting at `address`. All-or-nothing.
    pub async fn read_bytes(&self, address: Address, size: usize) -> MemoryResult<Vec<u8>> {
        debug!(%address, size, "reading bytes");
        let process = Arc::clone(&self.process);
        task::spawn_blocking(move || read_exact(&*process, address.as_usize(), size)).await?
    }

    /// Writes all of `bytes` at `address`. All-or-nothing.
    pub async fn write_bytes(&self, address: Address, bytes: Vec<u8>) -> MemoryResult<()> {
        debug!(%address, size = bytes.len(), "writing bytes");
        let process = Arc::clone(&self.process);
        task::spawn_blocking(move || write_exact(&*process, address.as_usize(), &bytes)).await?
    }

    /// Reads a value of the named type at `address`.
    ///
    /// Fails with [`MemoryError::InvalidType`] before any I/O when the name
    /// is not in the type table.
    pub async fn read_typed(&self, address: Address, type_name: &str) -> MemoryResult<TypedValue> {
        let ty = ValueType::from_name(type_name)
            .ok_or_else(|| MemoryError::InvalidType(type_name.to_string()))?;

        let data = self.read_bytes(address, ty.size()).await?;
        TypedValue::from_bytes(&data, ty)
            .ok_or_else(|| MemoryError::read_failed(address.as_usize()))
    }

    /// Writes `value` at `address`, encoded per the named type.
    ///
    /// Fails with [`MemoryError::InvalidType`] before any I/O when the name
    /// is unknown or disagrees with the value's own tag, so a bad type name
    /// can never cause a partial write.
    pub async fn write_typed(
        &self,
        address: Address,
        value: TypedValue,
        type_name: &str,
    ) -> MemoryResult<()> {
        let ty = ValueType::from_name(type_name)
            .ok_or_else(|| MemoryError::InvalidType(type_name.to_string()))?;

        if value.value_type() != ty {
            return Err(MemoryError::InvalidType(format!(
                "value of type {} does not match {}",
                value.value_type(),
                ty
            )));
        }

        self.write_bytes(address, value.to_bytes()).await
    }

    /// Allocates committed read-write memory in the target process
    pub async fn allocate(&self, size: usize) -> MemoryResult<Address> {
        let process = Arc::clone(&self.process);
        let address = task::spawn_blocking(move || process.allocate(size)).await??;
        Ok(Address::new(address))
    }

    /// Frees a previous [`MemoryReader::allocate`] allocation
    pub async fn free(&self, address: Address) -> MemoryResult<()> {
        let process = Arc::clone(&self.process);
        task::spawn_blocking(move || process.free(address.as_usize())).await?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{MemoryRegion, ModuleInfo};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Backend that fails every operation and counts I/O attempts
    struct FailingProcess {
        running: bool,
        io_calls: AtomicUsize,
    }

    impl FailingProcess {
        fn new(running: bool) -> Self {
            FailingProcess {
                running,
                io_calls: AtomicUsize::new(0),
            }
        }
    }

    impl ProcessMemory for FailingProcess {
        fn is_running(&self) -> bool {
            self.running
        }

        fn read(&self, address: usize, _buf: &mut [u8]) -> MemoryResult<()> {
            self.io_calls.fetch_add(1, Ordering::SeqCst);
            Err(MemoryError::read_failed(address))
        }

        fn write(&self, address: usize, _data: &[u8]) -> MemoryResult<()> {
            self.io_calls.fetch_add(1, Ordering::SeqCst);
            Err(MemoryError::write_failed(address))
        }

        fn query_region(&self, address: usize) -> MemoryResult<MemoryRegion> {
            Err(MemoryError::InvalidAddress(format!("0x{:X}", address)))
        }

        fn base_module(&self) -> MemoryResult<ModuleInfo> {
            Err(MemoryError::ModuleNotFound("base module".to_string()))
        }

        fn module_by_name(&self, name: &str) -> MemoryResult<ModuleInfo> {
            Err(MemoryError::ModuleNotFound(name.to_string()))
        }

        fn allocate(&self, _size: usize) -> MemoryResult<usize> {
            Err(MemoryError::WindowsApi("allocation failed".to_string()))
        }

        fn free(&self, address: usize) -> MemoryResult<()> {
            Err(MemoryError::InvalidAddress(format!("0x{:X}", address)))
        }
    }

    #[tokio::test]
    async fn test_invalid_type_performs_no_io() {
        let process = Arc::new(FailingProcess::new(true));
        let reader = MemoryReader::new(Arc::clone(&process));

        let err = reader
            .read_typed(Address::new(0x1000), "quaternion")
            .await
            .unwrap_err();
        assert!(matches!(err, MemoryError::InvalidType(_)));

        let err = reader
            .write_typed(Address::new(0x1000), TypedValue::U32(1), "quaternion")
            .await
            .unwrap_err();
        assert!(matches!(err, MemoryError::InvalidType(_)));

        assert_eq!(process.io_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_mismatched_tag_performs_no_io() {
        let process = Arc::new(FailingProcess::new(true));
        let reader = MemoryReader::new(Arc::clone(&process));

        let err = reader
            .write_typed(Address::new(0x1000), TypedValue::U32(1), "f64")
            .await
            .unwrap_err();
        assert!(matches!(err, MemoryError::InvalidType(_)));
        assert_eq!(process.io_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_failure_classification_running() {
        let process = Arc::new(FailingProcess::new(true));
        let reader = MemoryReader::new(process);

        let err = reader
            .read_bytes(Address::new(0x4000), 4)
            .await
            .unwrap_err();
        assert!(matches!(err, MemoryError::ReadFailed { address: 0x4000 }));

        let err = reader
            .write_bytes(Address::new(0x5000), vec![1, 2])
            .await
            .unwrap_err();
        assert!(matches!(err, MemoryError::WriteFailed { address: 0x5000 }));
    }

    #[tokio::test]
    async fn test_failure_classification_exited() {
        let process = Arc::new(FailingProcess::new(false));
        let reader = MemoryReader::new(process);

        let err = reader
            .read_bytes(Address::new(0x4000), 4)
            .await
            .unwrap_err();
        assert!(matches!(err, MemoryError::ClientClosed));

        let err = reader
            .write_bytes(Address::new(0x5000), vec![1, 2])
            .await
            .unwrap_err();
        assert!(matches!(err, MemoryError::ClientClosed));
    }
}
