//! Persisted wall map: one flag byte plus one byte per cell.
//!
//! Byte format: each cell is stored as its [`WallMask`] bits (bit0 North,
//! bit1 East, bit2 South, bit3 West), row-major from `(0, 0)`. The map is
//! only trusted when the flag byte holds [`VALID_FLAG`].
//!
//! Writes use update semantics: a byte equal to what is already stored is
//! not rewritten. The flag is cleared before a changed map is written and
//! set again last, so an interrupted save never leaves a valid flag over a
//! partial map.

use maze_core::{ByteStorage, StorageError, WallMask};
use maze_grid::{check_reciprocity, GridMap};
use serde::Deserialize;
use std::ops::Range;
use tracing::debug;

/// Flag byte marking a complete persisted map.
pub const VALID_FLAG: u8 = 0xA5;

/// Flag byte written while a map is being replaced.
const INVALID_FLAG: u8 = 0x00;

// ── StorageLayout ──────────────────────────────────────────────────

/// Where the flag and the map live in byte storage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StorageLayout {
    /// Address of the validity flag. Default: 0.
    pub flag_addr: usize,
    /// Address of the first map byte. Default: 1.
    pub map_addr: usize,
}

impl Default for StorageLayout {
    fn default() -> Self {
        Self {
            flag_addr: 0,
            map_addr: 1,
        }
    }
}

impl StorageLayout {
    /// Addresses occupied by the map of a `side * side` grid.
    pub fn map_range(&self, side: u32) -> Range<usize> {
        let len = (side as usize) * (side as usize);
        self.map_addr..self.map_addr + len
    }

    /// Whether the flag byte falls inside the map.
    pub fn overlaps(&self, side: u32) -> bool {
        self.map_range(side).contains(&self.flag_addr)
    }

    /// Smallest storage capacity that holds both flag and map.
    pub fn required_capacity(&self, side: u32) -> usize {
        self.map_range(side).end.max(self.flag_addr + 1)
    }
}

// ── MapStore ───────────────────────────────────────────────────────

/// Saves and loads the wall masks of a fixed-size grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MapStore {
    layout: StorageLayout,
    side: u32,
}

impl MapStore {
    /// Store for grids of `side` cells with the given layout.
    pub fn new(layout: StorageLayout, side: u32) -> Self {
        Self { layout, side }
    }

    /// The layout in use.
    pub fn layout(&self) -> StorageLayout {
        self.layout
    }

    /// Persist every wall mask of `grid`, then mark the map valid.
    ///
    /// Returns the number of bytes actually written; 0 when storage
    /// already held this exact map.
    ///
    /// # Errors
    ///
    /// Any storage error, or [`StorageError::Corrupt`] if `grid` does not
    /// have the side this store was created for.
    pub fn save<S: ByteStorage + ?Sized>(
        &self,
        storage: &mut S,
        grid: &GridMap,
    ) -> Result<usize, StorageError> {
        if grid.side() != self.side {
            return Err(StorageError::Corrupt {
                reason: format!("grid side {} does not match store side {}", grid.side(), self.side),
            });
        }

        let range = self.layout.map_range(self.side);
        let mut stale = Vec::new();
        for (addr, mask) in range.zip(grid.walls()) {
            if storage.read_byte(addr)? != mask.bits() {
                stale.push((addr, mask.bits()));
            }
        }
        let flag = storage.read_byte(self.layout.flag_addr)?;
        if stale.is_empty() && flag == VALID_FLAG {
            debug!("persisted map already up to date");
            return Ok(0);
        }

        let mut written = 0;
        if flag != INVALID_FLAG && !stale.is_empty() {
            storage.write_byte(self.layout.flag_addr, INVALID_FLAG)?;
            written += 1;
        }
        for &(addr, byte) in &stale {
            storage.write_byte(addr, byte)?;
            written += 1;
        }
        storage.write_byte(self.layout.flag_addr, VALID_FLAG)?;
        written += 1;
        debug!(changed = stale.len(), written, "persisted map saved");
        Ok(written)
    }

    /// Load a previously saved map.
    ///
    /// Returns `Ok(None)` when the flag is not [`VALID_FLAG`]. A loaded
    /// map is OR-merged over a fresh grid (so border walls are always
    /// present) and must satisfy the wall invariants.
    ///
    /// # Errors
    ///
    /// Any storage error, or [`StorageError::Corrupt`] if a byte carries
    /// bits outside the wall mask or the walls are not reciprocal.
    pub fn load<S: ByteStorage + ?Sized>(
        &self,
        storage: &mut S,
    ) -> Result<Option<GridMap>, StorageError> {
        let flag = storage.read_byte(self.layout.flag_addr)?;
        if flag != VALID_FLAG {
            debug!(flag, "no valid persisted map");
            return Ok(None);
        }

        let mut grid = GridMap::new(self.side).map_err(|e| StorageError::Corrupt {
            reason: e.to_string(),
        })?;
        for (index, addr) in self.layout.map_range(self.side).enumerate() {
            let byte = storage.read_byte(addr)?;
            let cell = grid.cell_at(index);
            if byte & !WallMask::ALL.bits() != 0 {
                return Err(StorageError::Corrupt {
                    reason: format!("byte {byte:#04x} for cell {cell} has bits outside the wall mask"),
                });
            }
            grid.set_walls(cell, WallMask::from_bits(byte));
        }
        check_reciprocity(&grid).map_err(|v| StorageError::Corrupt {
            reason: v.to_string(),
        })?;
        debug!(wall_bits = grid.wall_bit_count(), "persisted map loaded");
        Ok(Some(grid))
    }
}
