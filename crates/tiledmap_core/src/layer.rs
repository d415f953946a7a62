//! Tile layers: row-major grids of packed cells

use crate::cell::Cell;
use crate::error::MapError;
use serde::{Deserialize, Serialize};

/// A single full-map grid of cells, one among several stacked layers.
///
/// The cell buffer is row-major: index = `x + y * width`, with exactly
/// `width * height` entries. Coordinate queries are bounds-checked and
/// return [`MapError::OutOfBounds`] rather than reading a neighbouring row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TileLayer {
    pub name: String,
    width: u32,
    height: u32,
    pub opacity: f32,
    pub visible: bool,
    cells: Vec<Cell>,
}

impl TileLayer {
    /// Create an empty layer of the given dimensions.
    pub fn new(name: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            name: name.into(),
            width,
            height,
            opacity: 1.0,
            visible: true,
            cells: vec![Cell::EMPTY; (width * height) as usize],
        }
    }

    /// Create a layer from an already-filled cell buffer.
    ///
    /// Fails unless the buffer holds exactly `width * height` cells.
    pub fn from_cells(
        name: impl Into<String>,
        width: u32,
        height: u32,
        cells: Vec<Cell>,
    ) -> Result<Self, MapError> {
        let expected = (width * height) as usize;
        if cells.len() != expected {
            return Err(MapError::LayerSizeMismatch {
                expected,
                actual: cells.len(),
            });
        }
        Ok(Self {
            name: name.into(),
            width,
            height,
            opacity: 1.0,
            visible: true,
            cells,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    fn index(&self, x: u32, y: u32) -> Result<usize, MapError> {
        if x >= self.width || y >= self.height {
            return Err(MapError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok((x + y * self.width) as usize)
    }

    /// The raw cell at `(x, y)`, flags included.
    pub fn cell_at(&self, x: u32, y: u32) -> Result<Cell, MapError> {
        Ok(self.cells[self.index(x, y)?])
    }

    /// Overwrite the cell at `(x, y)`.
    pub fn set_cell(&mut self, x: u32, y: u32, cell: Cell) -> Result<(), MapError> {
        let idx = self.index(x, y)?;
        self.cells[idx] = cell;
        Ok(())
    }

    /// The bare tile id at `(x, y)` with flag bits cleared. 0 means "no tile".
    pub fn tile_id_at(&self, x: u32, y: u32) -> Result<u32, MapError> {
        Ok(self.cell_at(x, y)?.tile_id())
    }

    pub fn is_flipped_horizontally(&self, x: u32, y: u32) -> Result<bool, MapError> {
        Ok(self.cell_at(x, y)?.flipped_horizontally())
    }

    pub fn is_flipped_vertically(&self, x: u32, y: u32) -> Result<bool, MapError> {
        Ok(self.cell_at(x, y)?.flipped_vertically())
    }

    pub fn is_flipped_diagonally(&self, x: u32, y: u32) -> Result<bool, MapError> {
        Ok(self.cell_at(x, y)?.flipped_diagonally())
    }
}
