//! In-memory byte storage with failure injection.

use maze_core::{ByteStorage, StorageError};

/// EEPROM-like storage backed by a `Vec<u8>`.
///
/// Starts erased (every byte `0xFF`). Counts writes so tests can check
/// that unchanged bytes are not rewritten.
#[derive(Clone, Debug)]
pub struct MemoryStorage {
    bytes: Vec<u8>,
    writes: usize,
    fail_reads: bool,
    fail_writes_after: Option<usize>,
}

impl MemoryStorage {
    /// Erased storage of `capacity` bytes.
    pub fn new(capacity: usize) -> Self {
        Self {
            bytes: vec![0xFF; capacity],
            writes: 0,
            fail_reads: false,
            fail_writes_after: None,
        }
    }

    /// Every read fails with [`StorageError::Unavailable`].
    pub fn failing_reads(mut self) -> Self {
        self.fail_reads = true;
        self
    }

    /// Writes succeed `n` times, then fail with
    /// [`StorageError::Unavailable`].
    pub fn failing_writes_after(mut self, n: usize) -> Self {
        self.fail_writes_after = Some(n);
        self
    }

    /// Raw contents.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Overwrite a byte directly, bypassing counters and failures.
    pub fn poke(&mut self, addr: usize, byte: u8) {
        self.bytes[addr] = byte;
    }

    /// Successful writes so far.
    pub fn write_count(&self) -> usize {
        self.writes
    }

    fn check(&self, addr: usize) -> Result<(), StorageError> {
        if addr >= self.bytes.len() {
            return Err(StorageError::OutOfRange {
                addr,
                capacity: self.bytes.len(),
            });
        }
        Ok(())
    }
}

impl ByteStorage for MemoryStorage {
    fn read_byte(&mut self, addr: usize) -> Result<u8, StorageError> {
        if self.fail_reads {
            return Err(StorageError::Unavailable { addr });
        }
        self.check(addr)?;
        Ok(self.bytes[addr])
    }

    fn write_byte(&mut self, addr: usize, byte: u8) -> Result<(), StorageError> {
        if self.fail_writes_after.is_some_and(|n| self.writes >= n) {
            return Err(StorageError::Unavailable { addr });
        }
        self.check(addr)?;
        self.bytes[addr] = byte;
        self.writes += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_erased() {
        let mut s = MemoryStorage::new(4);
        assert_eq!(s.read_byte(3), Ok(0xFF));
    }

    #[test]
    fn out_of_range_is_reported() {
        let mut s = MemoryStorage::new(4);
        assert_eq!(
            s.write_byte(4, 0),
            Err(StorageError::OutOfRange {
                addr: 4,
                capacity: 4
            })
        );
    }

    #[test]
    fn write_failure_after_budget() {
        let mut s = MemoryStorage::new(4).failing_writes_after(2);
        assert!(s.write_byte(0, 1).is_ok());
        assert!(s.write_byte(1, 1).is_ok());
        assert_eq!(s.write_byte(2, 1), Err(StorageError::Unavailable { addr: 2 }));
        assert_eq!(s.write_count(), 2);
    }
}
