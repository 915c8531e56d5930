use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::{DurationClass, InstrumentId, PlantColor, SelectedPreset, MAX_BOARD_SIZE};

/// Moore neighborhood offsets as `(row, column)` in scan order NW, N, NE, E,
/// SE, S, SW, W.
const NEIGHBOR_OFFSETS: [(i64, i64); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
];

/// Stable identifier of a grid cell, preserved across every transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellId(u32);

impl CellId {
    /// Creates a new cell identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Location of a single grid cell expressed as row and column indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    row: u32,
    column: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }
}

/// Plant state and musical attributes of one grid position.
///
/// Cells are values: every transition produces a replacement cell that keeps
/// the original [`CellId`], so renderers can key on it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    id: CellId,
    coord: CellCoord,
    has_plant: bool,
    age: f32,
    duration_class: DurationClass,
    color: PlantColor,
    instrument: InstrumentId,
}

impl Cell {
    /// Creates an empty cell at the provided coordinate.
    #[must_use]
    pub const fn empty(
        id: CellId,
        coord: CellCoord,
        instrument: InstrumentId,
        color: PlantColor,
    ) -> Self {
        Self {
            id,
            coord,
            has_plant: false,
            age: 0.0,
            duration_class: DurationClass::Whole,
            color,
            instrument,
        }
    }

    /// Stable identifier of the cell.
    #[must_use]
    pub const fn id(&self) -> CellId {
        self.id
    }

    /// Grid coordinate of the cell.
    #[must_use]
    pub const fn coord(&self) -> CellCoord {
        self.coord
    }

    /// Zero-based row index.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.coord.row()
    }

    /// Zero-based column index.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.coord.column()
    }

    /// Reports whether a plant grows in the cell.
    #[must_use]
    pub const fn has_plant(&self) -> bool {
        self.has_plant
    }

    /// Age of the plant in frames; meaningless without a plant.
    #[must_use]
    pub const fn age(&self) -> f32 {
        self.age
    }

    /// Duration class the cell emits notes with.
    #[must_use]
    pub const fn duration_class(&self) -> DurationClass {
        self.duration_class
    }

    /// Color token painted on the cell.
    #[must_use]
    pub const fn color(&self) -> PlantColor {
        self.color
    }

    /// Instrument voicing the cell's notes.
    #[must_use]
    pub const fn instrument(&self) -> InstrumentId {
        self.instrument
    }

    /// Reports whether the cell holds a plant at least `maturity_age` old.
    #[must_use]
    pub fn is_mature(&self, maturity_age: f32) -> bool {
        self.has_plant && self.age >= maturity_age
    }

    /// Returns the cell with a freshly planted seedling of the given preset.
    #[must_use]
    pub const fn planted(self, preset: SelectedPreset) -> Self {
        Self {
            has_plant: true,
            age: 0.0,
            duration_class: preset.duration_class,
            color: preset.color,
            instrument: preset.instrument,
            ..self
        }
    }

    /// Returns the cell brought to life with inherited attributes.
    #[must_use]
    pub const fn born(
        self,
        age: f32,
        duration_class: DurationClass,
        color: PlantColor,
        instrument: InstrumentId,
    ) -> Self {
        Self {
            has_plant: true,
            age,
            duration_class,
            color,
            instrument,
            ..self
        }
    }

    /// Returns the cell with its plant removed and painted `dead_color`.
    #[must_use]
    pub const fn withered(self, dead_color: PlantColor) -> Self {
        Self {
            has_plant: false,
            age: 0.0,
            color: dead_color,
            ..self
        }
    }

    /// Returns the cell aged by `delta` frames when it holds a plant.
    #[must_use]
    pub fn aged(self, delta: f32) -> Self {
        if !self.has_plant {
            return self;
        }
        Self {
            age: self.age + delta,
            ..self
        }
    }
}

/// Fixed `N×N` board stored in row-major order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    size: u32,
    cells: Vec<Cell>,
}

impl Grid {
    /// Creates an all-empty square grid with `size` rows and columns.
    ///
    /// Sizes above [`MAX_BOARD_SIZE`] are clamped to it.
    #[must_use]
    pub fn new(size: u32, instrument: InstrumentId, dead_color: PlantColor) -> Self {
        let size = size.min(MAX_BOARD_SIZE);
        let capacity = usize::try_from(u64::from(size) * u64::from(size)).unwrap_or(0);
        let mut cells = Vec::with_capacity(capacity);
        for row in 0..size {
            for column in 0..size {
                let id = CellId::new(row * size + column);
                cells.push(Cell::empty(
                    id,
                    CellCoord::new(row, column),
                    instrument,
                    dead_color,
                ));
            }
        }
        Self { size, cells }
    }

    /// Number of rows, equal to the number of columns.
    #[must_use]
    pub const fn size(&self) -> u32 {
        self.size
    }

    /// Returns the cell at the provided indices, or `None` outside the board.
    #[must_use]
    pub fn cell_at(&self, row: i64, column: i64) -> Option<&Cell> {
        self.index(row, column).and_then(|index| self.cells.get(index))
    }

    /// Returns the cell whose center lies nearest the pixel position.
    #[must_use]
    pub fn cell_at_position(&self, position: Vec2, patch_size: f32) -> Option<&Cell> {
        if !position.is_finite() || patch_size.is_nan() || patch_size <= 0.0 {
            return None;
        }
        let row = (position.y / patch_size).round();
        let column = (position.x / patch_size).round();
        self.cell_at(row as i64, column as i64)
    }

    /// Returns the planted Moore neighbors of a coordinate in scan order.
    ///
    /// Neighbors beyond the board edge are absent; lookups never wrap.
    #[must_use]
    pub fn live_neighbors(&self, coord: CellCoord) -> Vec<&Cell> {
        let row = i64::from(coord.row());
        let column = i64::from(coord.column());
        NEIGHBOR_OFFSETS
            .iter()
            .filter_map(|(row_offset, column_offset)| {
                self.cell_at(row + row_offset, column + column_offset)
            })
            .filter(|cell| cell.has_plant())
            .collect()
    }

    /// Iterator over all cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Number of cells currently holding a plant.
    #[must_use]
    pub fn plant_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.has_plant()).count()
    }

    /// Produces a new grid by transforming every cell.
    ///
    /// The closure must return a cell with the same identity; replacements
    /// are written back to the slot of the original cell.
    #[must_use]
    pub fn map_cells<F>(&self, transform: F) -> Self
    where
        F: FnMut(&Cell) -> Cell,
    {
        Self {
            size: self.size,
            cells: self.cells.iter().map(transform).collect(),
        }
    }

    /// Returns the grid with the cell at `cell.coord()` replaced.
    #[must_use]
    pub fn with_cell(mut self, cell: Cell) -> Self {
        self.replace_cell(cell);
        self
    }

    /// Overwrites the cell at `cell.coord()` in place; off-board cells are ignored.
    pub fn replace_cell(&mut self, cell: Cell) {
        let coord = cell.coord();
        if let Some(slot) = self
            .index(i64::from(coord.row()), i64::from(coord.column()))
            .and_then(|index| self.cells.get_mut(index))
        {
            *slot = cell;
        }
    }

    fn index(&self, row: i64, column: i64) -> Option<usize> {
        let size = i64::from(self.size);
        if row < 0 || column < 0 || row >= size || column >= size {
            return None;
        }
        usize::try_from(row * size + column).ok()
    }
}
