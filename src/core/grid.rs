#[allow(unused_imports)]
use crate::core::prelude::*;

use crate::util::gb_float;
use itertools::iproduct;

/// Renders the lattice spanned by a basis pair (v1, v2) as draw
/// primitives: for every visible lattice point, two line segments along
/// the basis directions, plus numeric labels and origin markers where the
/// lattice crosses the coordinate axes.
///
/// The visible extent is found by mapping all four screen corners to world
/// space and pulling them back into lattice-index space through the
/// inverse of M = [v1 | v2]. A singular basis spans no area, so there is
/// nothing to draw; that case is a logged no-op, never a crash.
#[derive(Debug, Copy, Clone)]
pub struct GridRenderer {
    /// Spacing is always an integer power of this base.
    pub spacing_base: f64,
    /// Minimum desired on-screen distance between adjacent lattice lines.
    pub min_pixel_spacing: f64,
    /// Upper bound on lattice cells per call; the index ranges are clamped
    /// about their centre beyond this.
    pub max_cells: i64,
}

impl Default for GridRenderer {
    fn default() -> Self {
        Self {
            spacing_base: GRID_SPACING_BASE,
            min_pixel_spacing: MIN_GRID_PIXEL_SPACING,
            max_cells: MAX_GRID_CELLS,
        }
    }
}

impl GridRenderer {
    /// The lattice spacing for a given view scale: the smallest power of
    /// [`spacing_base`](GridRenderer::spacing_base) whose on-screen size is
    /// at least [`min_pixel_spacing`](GridRenderer::min_pixel_spacing).
    /// Restricting spacing to powers of the base keeps zooming from
    /// continuously jittering the grid density.
    #[must_use]
    pub fn spacing(&self, view_scale: f64) -> f64 {
        let exponent =
            gb_float::log_base(self.min_pixel_spacing / view_scale, self.spacing_base).ceil();
        self.spacing_base.powf(exponent)
    }

    /// Emits the grid for the lattice spanned by (v1, v2) into `canvas`.
    pub fn draw(
        &self,
        canvas: &mut Canvas,
        viewport: &Viewport,
        v1: Vec2,
        v2: Vec2,
        colour: Colour,
        width: f64,
    ) {
        let m = Mat2::from_columns(v1, v2);
        let m_inv = match m.inverse() {
            Ok(m_inv) => m_inv,
            Err(e) => {
                warn!("skipping grid for basis {v1}, {v2}: {e}");
                return;
            }
        };

        let spacing = self.spacing(viewport.scale());
        let corners = viewport.world_corners().map(|c| m_inv * c);
        let x_min = corners.iter().map(|c| c.x).fold(f64::INFINITY, f64::min);
        let x_max = corners.iter().map(|c| c.x).fold(f64::NEG_INFINITY, f64::max);
        let y_min = corners.iter().map(|c| c.y).fold(f64::INFINITY, f64::min);
        let y_max = corners.iter().map(|c| c.y).fold(f64::NEG_INFINITY, f64::max);

        // snap outward to spacing multiples, padding the low side by one
        // step so partially visible cells still get their edges drawn
        let mut ix_min = ((x_min / spacing).floor() as i64).saturating_sub(1);
        let mut ix_max = (x_max / spacing).ceil() as i64;
        let mut iy_min = ((y_min / spacing).floor() as i64).saturating_sub(1);
        let mut iy_max = (y_max / spacing).ceil() as i64;

        let cells = span(ix_min, ix_max) * span(iy_min, iy_max);
        if cells > i128::from(self.max_cells) {
            warn!(
                "grid extent of {cells} cells exceeds the budget of {} \
                 (near-singular basis?); clamping",
                self.max_cells
            );
            let max_span = (self.max_cells as f64).sqrt() as i64;
            (ix_min, ix_max) = clamp_span(ix_min, ix_max, max_span);
            (iy_min, iy_max) = clamp_span(iy_min, iy_max, max_span);
        }

        // cell edge directions in screen space (y flipped)
        let d1 = Vec2 { x: v1.x, y: -v1.y } * (viewport.scale() * spacing);
        let d2 = Vec2 { x: v2.x, y: -v2.y } * (viewport.scale() * spacing);
        let label_offset = Vec2 {
            x: AXIS_LABEL_OFFSET.0,
            y: AXIS_LABEL_OFFSET.1,
        };
        for (ix, iy) in iproduct!(ix_min..=ix_max, iy_min..=iy_max) {
            let lattice = Vec2 {
                x: ix as f64 * spacing,
                y: iy as f64 * spacing,
            };
            let screen = viewport.world_to_screen(m * lattice);
            canvas.line(screen, screen + d1, width, colour);
            canvas.line(screen, screen + d2, width, colour);

            // the lattice lines crossing the origin axes carry the scale
            // markers the viewer reads the grid by
            if ix == 0 || iy == 0 {
                let value = if ix == 0 { lattice.y } else { lattice.x };
                canvas.text(screen + label_offset, self.format_label(value, spacing), colour);
                canvas.circle(screen, ORIGIN_MARKER_RADIUS, colour);
            }
        }
    }

    /// Formats an axis label with exactly as many decimals as the spacing
    /// needs: integer spacings label as integers, spacing 0.2 labels with
    /// one decimal, and so on. Keeps accumulated float error out of the
    /// label text.
    fn format_label(&self, value: f64, spacing: f64) -> String {
        let exponent = gb_float::log_base(spacing, self.spacing_base).round() as i32;
        let decimals = (-exponent).max(0) as usize;
        format!("{value:.decimals$}")
    }
}

fn span(min: i64, max: i64) -> i128 {
    i128::from(max) - i128::from(min) + 1
}

fn clamp_span(min: i64, max: i64, max_span: i64) -> (i64, i64) {
    if span(min, max) <= i128::from(max_span) {
        return (min, max);
    }
    let mid = min / 2 + max / 2;
    (
        mid.saturating_sub(max_span / 2),
        mid.saturating_add(max_span / 2),
    )
}
