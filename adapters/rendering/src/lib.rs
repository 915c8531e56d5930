#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for garden adapters.
//!
//! Adapters never inspect the world directly. They derive a [`Scene`] from a
//! snapshot once per frame and hand it to a [`Presenter`].

use anyhow::Result as AnyResult;
use garden_core::{CellId, GardenConfig, PlantColor};
use garden_world::{query, WorldState};
use glam::Vec2;

/// Widest border drawn around a freshly planted seedling, in pixels.
pub const SEEDLING_BORDER_MAX: f32 = 14.0;
/// Amount active tiles are lightened by while their note sounds.
pub const ACTIVE_HIGHLIGHT: f32 = 0.35;

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Returns a new color lightened towards white by the provided amount.
    #[must_use]
    pub fn lighten(self, amount: f32) -> Self {
        let amount = amount.clamp(0.0, 1.0);

        Self {
            red: lighten_channel(self.red, amount),
            green: lighten_channel(self.green, amount),
            blue: lighten_channel(self.blue, amount),
            alpha: self.alpha,
        }
    }
}

impl From<PlantColor> for Color {
    fn from(color: PlantColor) -> Self {
        Self::from_rgb_u8(color.red(), color.green(), color.blue())
    }
}

fn lighten_channel(channel: f32, amount: f32) -> f32 {
    channel + (1.0 - channel) * amount
}

/// Visual state of one board cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TilePresentation {
    /// Stable identifier renderers may key on.
    pub id: CellId,
    /// Zero-based row index.
    pub row: u32,
    /// Zero-based column index.
    pub column: u32,
    /// Fill color, lightened while the tile sounds.
    pub color: Color,
    /// Whether a plant grows in the tile.
    pub has_plant: bool,
    /// Progress toward maturity in `[0, 1]`; zero without a plant.
    pub growth: f32,
    /// Border thickness in pixels hiding an immature plant.
    pub seedling_border: f32,
    /// Whether the tile's plant sounds on the current beat.
    pub active: bool,
    /// Whether the gardener stands over the tile.
    pub outlined: bool,
}

/// One selectable preset in the nursery panel.
#[derive(Clone, Debug, PartialEq)]
pub struct NurserySlot {
    /// Note-value label such as `1/4`.
    pub label: String,
    /// Swatch color.
    pub color: Color,
    /// Whether the slot is the current selection.
    pub selected: bool,
}

/// Instrument group row of the nursery panel.
#[derive(Clone, Debug, PartialEq)]
pub struct NurseryRow {
    /// Group name shown before the slots.
    pub name: String,
    /// Presets in catalog order.
    pub slots: Vec<NurserySlot>,
}

/// Scene description combining the board, the gardener and the nursery panel.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Number of rows and columns.
    pub board_size: u32,
    /// Side length of one tile in pixels.
    pub patch_size: f32,
    /// Tiles in row-major order.
    pub tiles: Vec<TilePresentation>,
    /// Gardener position in pixels.
    pub gardener: Vec2,
    /// Nursery panel rows.
    pub nursery: Vec<NurseryRow>,
    /// Beat the scene was captured on.
    pub beat: u64,
}

impl Scene {
    /// Derives the scene presented for the provided snapshot.
    #[must_use]
    pub fn from_state(state: &WorldState, config: &GardenConfig) -> Self {
        let maturity_age = config.maturity_age();
        let outlined = query::cell_at_gardener(state, config).map(|cell| cell.id());
        let beat = state.beat();

        let tiles = state
            .grid()
            .iter()
            .map(|cell| {
                let growth = if cell.has_plant() {
                    (cell.age() / maturity_age).clamp(0.0, 1.0)
                } else {
                    0.0
                };
                let active = cell.is_mature(maturity_age)
                    && cell.duration_class().fires_on_beat(beat);
                let base = Color::from(cell.color());
                TilePresentation {
                    id: cell.id(),
                    row: cell.row(),
                    column: cell.column(),
                    color: if active {
                        base.lighten(ACTIVE_HIGHLIGHT)
                    } else {
                        base
                    },
                    has_plant: cell.has_plant(),
                    growth,
                    seedling_border: if cell.has_plant() {
                        SEEDLING_BORDER_MAX * (1.0 - growth)
                    } else {
                        0.0
                    },
                    active,
                    outlined: outlined == Some(cell.id()),
                }
            })
            .collect();

        let nursery = state
            .nursery()
            .groups()
            .iter()
            .enumerate()
            .map(|(instrument_index, group)| NurseryRow {
                name: group.name.clone(),
                slots: group
                    .options
                    .iter()
                    .enumerate()
                    .map(|(plant_index, option)| NurserySlot {
                        label: option.duration_class.to_string(),
                        color: Color::from(option.color),
                        selected: instrument_index == state.selected_instrument_index()
                            && plant_index == state.selected_plant_index(),
                    })
                    .collect(),
            })
            .collect();

        Self {
            board_size: state.grid().size(),
            patch_size: config.patch_size,
            tiles,
            gardener: state.actor().position,
            nursery,
            beat,
        }
    }

    /// Returns the tile at the provided indices.
    #[must_use]
    pub fn tile(&self, row: u32, column: u32) -> Option<&TilePresentation> {
        if row >= self.board_size || column >= self.board_size {
            return None;
        }
        let index = u64::from(row) * u64::from(self.board_size) + u64::from(column);
        let index = usize::try_from(index).ok()?;
        self.tiles.get(index)
    }

    /// Iterator over the board rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[TilePresentation]> {
        let width = usize::try_from(self.board_size).unwrap_or(0).max(1);
        self.tiles.chunks(width)
    }

    /// Side length of the board in pixels.
    #[must_use]
    pub fn extent(&self) -> f32 {
        self.board_size as f32 * self.patch_size
    }
}

/// Output surface capable of displaying garden scenes.
pub trait Presenter {
    /// Presents one frame.
    fn present(&mut self, scene: &Scene) -> AnyResult<()>;
}
