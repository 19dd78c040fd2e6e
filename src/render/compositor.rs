use crate::drawing::entry::DrawingEntry;
use crate::foundation::error::FramemarkResult;
use crate::render::paint::{Ghost, Painter};
use crate::render::raster::{BaseRaster, FrameRGBA};

/// Opacity applied to every layer of an uncommitted shape.
pub const GHOST_OPACITY: f32 = 0.5;

/// Composite `entries` over `base`, in order, from a clean copy of the base.
///
/// Output depends only on the inputs: rendering the same base and entries twice yields
/// identical bytes.
#[tracing::instrument(
    level = "debug",
    skip_all,
    fields(width = base.width, height = base.height, entries = entries.len())
)]
pub fn render_full(base: &BaseRaster, entries: &[DrawingEntry]) -> FramemarkResult<FrameRGBA> {
    let mut frame = FrameRGBA::from_base(base);
    let mut painter = Painter::new(&mut frame, 1.0);
    for entry in entries {
        painter.paint_entry(entry)?;
    }
    Ok(frame)
}

/// Paint `ghost` over an already composited frame at [`GHOST_OPACITY`].
pub fn paint_ghost(frame: &mut FrameRGBA, ghost: &Ghost) -> FramemarkResult<()> {
    Painter::new(frame, GHOST_OPACITY).paint_ghost(ghost)
}

/// Display surface of an editing session.
///
/// Until a base raster has been supplied there is nothing to draw on, so every redraw is
/// a no-op.
#[derive(Clone, Debug, Default)]
pub struct Stage {
    base: Option<BaseRaster>,
    frame: Option<FrameRGBA>,
}

impl Stage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base(base: BaseRaster) -> Self {
        Self {
            base: Some(base),
            frame: None,
        }
    }

    /// Install the decoded frame. The surface stays blank until the next redraw.
    pub fn set_base(&mut self, base: BaseRaster) {
        self.base = Some(base);
        self.frame = None;
    }

    pub fn base(&self) -> Option<&BaseRaster> {
        self.base.as_ref()
    }

    pub fn frame(&self) -> Option<&FrameRGBA> {
        self.frame.as_ref()
    }

    pub fn redraw(&mut self, entries: &[DrawingEntry]) -> FramemarkResult<()> {
        let Some(base) = self.base.as_ref() else {
            return Ok(());
        };
        self.frame = Some(render_full(base, entries)?);
        Ok(())
    }

    /// Redraw the committed scene, then lay the ghost over it.
    ///
    /// The ghost never reaches the entries, so the next redraw erases it.
    pub fn preview(&mut self, entries: &[DrawingEntry], ghost: &Ghost) -> FramemarkResult<()> {
        self.redraw(entries)?;
        match self.frame.as_mut() {
            Some(frame) => paint_ghost(frame, ghost),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
