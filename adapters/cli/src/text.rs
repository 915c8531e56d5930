use std::io::Write;

use anyhow::{Context, Result};
use garden_rendering::{Presenter, Scene, TilePresentation};

/// Presenter printing the board as one line of glyphs per row.
///
/// `@` marks the gardener, `.` bare soil, `,` a seedling, `o` a mature plant
/// and `*` a plant sounding on the current beat. The nursery follows with the
/// selected slot in brackets.
#[derive(Debug)]
pub(crate) struct TextPresenter<W> {
    out: W,
}

impl<W: Write> TextPresenter<W> {
    pub(crate) fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> Presenter for TextPresenter<W> {
    fn present(&mut self, scene: &Scene) -> Result<()> {
        for row in scene.rows() {
            let line: String = row.iter().map(glyph).collect();
            writeln!(self.out, "{line}").context("failed to write board")?;
        }

        for group in &scene.nursery {
            let slots: Vec<String> = group
                .slots
                .iter()
                .map(|slot| {
                    if slot.selected {
                        format!("[{}]", slot.label)
                    } else {
                        format!(" {} ", slot.label)
                    }
                })
                .collect();
            writeln!(self.out, "{:<8}{}", group.name, slots.join(""))
                .context("failed to write nursery")?;
        }
        writeln!(self.out, "beat {}", scene.beat).context("failed to write beat")?;
        Ok(())
    }
}

fn glyph(tile: &TilePresentation) -> char {
    if tile.outlined {
        '@'
    } else if !tile.has_plant {
        '.'
    } else if tile.active {
        '*'
    } else if tile.growth < 1.0 {
        ','
    } else {
        'o'
    }
}
