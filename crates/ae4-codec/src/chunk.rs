//! Chunked tile-grid addressing.
//!
//! World maps store tiles row-major over a padded row width (the chunk
//! width), which is the smallest power-of-two multiple of 128 that covers
//! the logical width. Only the first `width` cells of each row carry tiles.

use crate::cursor::ByteCursor;
use crate::error::{CodecError, Result};

/// Base chunk unit in cells.
pub const CHUNK_UNIT: u32 = 128;

/// Logical widths up to this many tiles fit one chunk.
const TILES_PER_UNIT: u32 = 32;

/// Padded row geometry for a map width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkLayout {
    pub multiplier: u32,
    pub chunk_width: u32,
}

impl ChunkLayout {
    pub fn for_width(width: u32) -> Self {
        if width <= TILES_PER_UNIT {
            return Self {
                multiplier: 1,
                chunk_width: CHUNK_UNIT,
            };
        }
        let chunks = width.div_ceil(TILES_PER_UNIT);
        let multiplier = chunks.next_power_of_two();
        Self {
            multiplier,
            chunk_width: multiplier * CHUNK_UNIT,
        }
    }
}

/// Tile grid of a known logical size stored over a padded row width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileGrid {
    pub width: u32,
    pub height: u32,
    pub chunk_width: u32,
}

impl TileGrid {
    /// Number of cells written for this grid, `None` when it overflows.
    pub fn stored_cells(&self) -> Option<usize> {
        let (w, h, cw) = (
            self.width as usize,
            self.height as usize,
            self.chunk_width as usize,
        );
        let last_row = h.saturating_sub(1).checked_mul(cw)?.checked_add(w)?;
        Some(cw.checked_mul(h)?.max(last_row))
    }

    /// Stored cell count as written in the file header word.
    fn stored_count(&self, offset: usize) -> Result<u32> {
        self.stored_cells()
            .and_then(|count| u32::try_from(count).ok())
            .ok_or(CodecError::GridTooLarge {
                offset,
                width: self.width,
                height: self.height,
                chunk_width: self.chunk_width,
            })
    }

    /// Whether storage index `index` holds a logical tile.
    pub fn is_logical(&self, index: usize) -> bool {
        let cw = self.chunk_width.max(1) as usize;
        index % cw < self.width as usize && index / cw < self.height as usize
    }

    /// Read the cell count and cells, keeping logical tiles in row order.
    ///
    /// The file must store at least the cells its dimensions address.
    pub fn read(&self, cur: &mut ByteCursor) -> Result<Vec<u32>> {
        let offset = cur.position();
        let expected = self.stored_count(offset)?;
        let count = cur.read_u32()?;
        if count < expected {
            return Err(CodecError::mismatch(offset, "tile cell count", expected, count));
        }
        let count = count as usize;
        let mut tiles =
            Vec::with_capacity((self.width as usize).saturating_mul(self.height as usize).min(cur.remaining()));
        let mut padding = 0usize;
        for index in 0..count {
            let cell = cur.read_u32()?;
            if self.is_logical(index) {
                tiles.push(cell);
            } else {
                padding += 1;
            }
        }
        tracing::trace!(count, kept = tiles.len(), padding, "read tile grid");
        Ok(tiles)
    }

    /// Logical tile stored at `index`; the latest row wins where rows overlap.
    fn tile_at(&self, index: usize, tiles: &[u32]) -> u32 {
        let (w, h, cw) = (
            self.width as usize,
            self.height as usize,
            self.chunk_width as usize,
        );
        let Some(last) = h.checked_sub(1) else {
            return 0;
        };
        let y = match cw {
            0 => last,
            _ => (index / cw).min(last),
        };
        let x = index - y * cw;
        if x >= w {
            return 0;
        }
        y.checked_mul(w)
            .and_then(|row| tiles.get(row + x))
            .copied()
            .unwrap_or(0)
    }

    /// Expand `tiles` back onto the padded grid, zero-filling padding.
    pub fn write(&self, cur: &mut ByteCursor, tiles: &[u32]) -> Result<()> {
        let count = self.stored_count(cur.position())?;
        cur.write_u32(count)?;
        for index in 0..count as usize {
            cur.write_u32(self.tile_at(index, tiles))?;
        }
        Ok(())
    }
}
