//! Packed cell values: tile id plus orientation flags in one word

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Orientation bits stored in the top three bits of a cell word,
    /// following the TMX global-tile-id convention.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct FlipFlags: u32 {
        const HORIZONTAL = 1 << 31;
        const VERTICAL = 1 << 30;
        const DIAGONAL = 1 << 29;
    }
}

/// One stored grid entry in a tile layer.
///
/// The low 29 bits hold a tile id (0 means "no tile"); the top three bits
/// hold [`FlipFlags`]. The decoded (id, flags) pair is never stored, only
/// computed on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cell(pub u32);

impl Cell {
    /// The "no tile" cell.
    pub const EMPTY: Cell = Cell(0);

    /// Mask that clears the flag bits, leaving the bare tile id.
    pub const ID_MASK: u32 = !FlipFlags::all().bits();

    /// Pack a tile id and flags into a cell word.
    pub fn new(tile_id: u32, flags: FlipFlags) -> Self {
        Cell((tile_id & Self::ID_MASK) | flags.bits())
    }

    /// The bare tile id with all flag bits cleared. 0 means "no tile".
    pub fn tile_id(self) -> u32 {
        self.0 & Self::ID_MASK
    }

    /// The orientation flags, ignoring the id bits.
    pub fn flags(self) -> FlipFlags {
        FlipFlags::from_bits_truncate(self.0)
    }

    /// True if no tile is present, regardless of flag bits.
    pub fn is_empty(self) -> bool {
        self.tile_id() == 0
    }

    pub fn flipped_horizontally(self) -> bool {
        self.flags().contains(FlipFlags::HORIZONTAL)
    }

    pub fn flipped_vertically(self) -> bool {
        self.flags().contains(FlipFlags::VERTICAL)
    }

    pub fn flipped_diagonally(self) -> bool {
        self.flags().contains(FlipFlags::DIAGONAL)
    }
}

impl From<u32> for Cell {
    fn from(raw: u32) -> Self {
        Cell(raw)
    }
}
