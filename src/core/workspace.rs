#[allow(unused_imports)]
use crate::core::prelude::*;

use crate::core::ensure_finite;
use num_traits::Zero;
use serde::{Deserialize, Serialize};

/// Default stroke colours for a rendered frame. The rendering collaborator
/// may substitute its own; these mirror the reference UI scheme.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Palette {
    pub base_grid: Colour,
    pub image_grid: Colour,
    pub basis: Colour,
    pub image: Colour,
    pub eigen: Colour,
    pub probe: Colour,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            base_grid: Colour::white(),
            image_grid: Colour::from_bytes(0x7c, 0x98, 0xff, 0xff),
            basis: Colour::white(),
            image: Colour::from_bytes(0x7c, 0x98, 0xff, 0xff),
            eigen: Colour::from_bytes(0x7c, 0xff, 0x98, 0xff),
            probe: Colour::from_bytes(0xff, 0x98, 0x7c, 0xff),
        }
    }
}

/// The derived algebraic properties of the current matrix, recomputed from
/// scratch on every tick and handed to the UI collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatrixProperties {
    pub determinant: f64,
    pub trace: f64,
    /// 0, 1 or 2.
    pub rank: u8,
    pub characteristic_polynomial: CharPoly,
    pub eigenvalues: Eigenvalues,
    /// Unit eigenvectors in the same order as the eigenvalues; `None` when
    /// the eigenvalues are complex.
    pub eigenvectors: Option<(Vec2, Vec2)>,
}

/// The single owner of the visualizer's mutable state: the live matrix,
/// the basis pair defining the displayed lattice, and the probe vector.
/// Every other component receives this state by argument per call; there
/// is no ambient shared state.
///
/// Inputs arrive pre-parsed from the form collaborator but are still
/// validated: a non-finite value is rejected with [`InvalidInputError`]
/// before any part of the update is applied.
#[derive(Debug, Clone)]
pub struct Workspace {
    matrix: Mat2,
    basis: (Vec2, Vec2),
    probe: Vec2,
    palette: Palette,
    grid: GridRenderer,
}

impl Default for Workspace {
    fn default() -> Self {
        Self {
            matrix: Mat2::one(),
            basis: (Vec2::right(), Vec2::up()),
            probe: Vec2::one(),
            palette: Palette::default(),
            grid: GridRenderer::default(),
        }
    }
}

impl Workspace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn matrix(&self) -> Mat2 {
        self.matrix
    }
    pub fn basis(&self) -> (Vec2, Vec2) {
        self.basis
    }
    pub fn probe(&self) -> Vec2 {
        self.probe
    }

    /// Replaces all four matrix entries at once (one edit of the matrix
    /// input form). Validates every entry before assigning any.
    pub fn set_matrix(
        &mut self,
        a11: f64,
        a12: f64,
        a21: f64,
        a22: f64,
    ) -> Result<(), InvalidInputError> {
        let xx = ensure_finite("a11", a11)?;
        let xy = ensure_finite("a12", a12)?;
        let yx = ensure_finite("a21", a21)?;
        let yy = ensure_finite("a22", a22)?;
        self.matrix = Mat2 { xx, xy, yx, yy };
        Ok(())
    }

    /// Replaces the lattice basis pair, validated component-wise.
    pub fn set_basis(&mut self, e1: Vec2, e2: Vec2) -> Result<(), InvalidInputError> {
        let e1 = Vec2 {
            x: ensure_finite("e1.x", e1.x)?,
            y: ensure_finite("e1.y", e1.y)?,
        };
        let e2 = Vec2 {
            x: ensure_finite("e2.x", e2.x)?,
            y: ensure_finite("e2.y", e2.y)?,
        };
        self.basis = (e1, e2);
        Ok(())
    }

    pub fn set_probe(&mut self, v: Vec2) -> Result<(), InvalidInputError> {
        self.probe = Vec2 {
            x: ensure_finite("v.x", v.x)?,
            y: ensure_finite("v.y", v.y)?,
        };
        Ok(())
    }

    /// Inverts the live matrix in place (the "invert" button). A singular
    /// matrix leaves the state untouched and reports the error for the UI
    /// to display.
    pub fn invert(&mut self) -> Result<(), SingularMatrixError> {
        self.matrix.invert()
    }

    /// Transposes the live matrix in place (the "transpose" button).
    pub fn transpose(&mut self) {
        self.matrix.transpose();
    }

    /// Restores the matrix to the identity and the basis to the standard
    /// basis (the "r" keypress). The probe vector is left as-is.
    pub fn reset(&mut self) {
        self.matrix = Mat2::one();
        self.basis = (Vec2::right(), Vec2::up());
        info!("workspace reset to identity");
    }

    /// Recomputes every derived property of the current matrix.
    #[must_use]
    pub fn properties(&self) -> MatrixProperties {
        let eigenvalues = self.matrix.eigenvalues();
        let eigenvectors = match eigenvalues {
            Eigenvalues::Real(l1, l2) => Some((
                self.matrix.eigenvector(l1),
                self.matrix.eigenvector(l2),
            )),
            Eigenvalues::Complex { .. } => None,
        };
        MatrixProperties {
            determinant: self.matrix.det(),
            trace: self.matrix.trace(),
            rank: self.matrix.rank(),
            characteristic_polynomial: self.matrix.characteristic_polynomial(),
            eigenvalues,
            eigenvectors,
        }
    }

    /// Emits one frame of draw primitives: the untransformed lattice, its
    /// image under the matrix, the basis vectors and their images, the
    /// eigenvector rays (when the eigenvalues are real) with their
    /// eigenvalue-scaled images, and the probe vector with its image.
    ///
    /// A singular matrix has no image grid; that grid is skipped with a
    /// warning and the rest of the frame still renders.
    pub fn render_frame(&self, viewport: &Viewport, canvas: &mut Canvas) {
        canvas.clear();
        let (e1, e2) = self.basis;
        let m = self.matrix;
        let (me1, me2) = (m * e1, m * e2);

        self.grid
            .draw(canvas, viewport, e1, e2, self.palette.base_grid, 0.5);
        self.grid
            .draw(canvas, viewport, me1, me2, self.palette.image_grid, 1.0);

        self.draw_vector(canvas, viewport, e1, self.palette.basis, 2.0);
        self.draw_vector(canvas, viewport, e2, self.palette.basis, 2.0);
        self.draw_vector(canvas, viewport, me1, self.palette.image, 4.0);
        self.draw_vector(canvas, viewport, me2, self.palette.image, 4.0);

        if let Eigenvalues::Real(l1, l2) = m.eigenvalues() {
            let u1 = m.eigenvector(l1);
            let u2 = m.eigenvector(l2);
            self.draw_vector(canvas, viewport, u1, self.palette.eigen, 3.0);
            self.draw_vector(canvas, viewport, u2, self.palette.eigen, 3.0);
            // the scaled copies show how far the transform stretches each
            // eigendirection
            self.draw_vector(canvas, viewport, u1 * l1, self.palette.eigen, 1.0);
            self.draw_vector(canvas, viewport, u2 * l2, self.palette.eigen, 1.0);
        }

        self.draw_vector(canvas, viewport, self.probe, self.palette.probe, 3.0);
        self.draw_vector(canvas, viewport, m * self.probe, self.palette.probe, 1.0);
    }

    /// Draws a world-space vector as an arrowed line from the origin. The
    /// arrowhead is a pair of wings swept back from the tip, sized in
    /// screen pixels so it stays legible at any zoom.
    fn draw_vector(
        &self,
        canvas: &mut Canvas,
        viewport: &Viewport,
        v: Vec2,
        colour: Colour,
        width: f64,
    ) {
        let start = viewport.world_to_screen(Vec2::zero());
        let end = viewport.world_to_screen(v);
        canvas.line(start, end, width, colour);

        let dir = end - start;
        if dir.is_zero() {
            return;
        }
        let dir = dir.normed();
        let wing = 3.0 * std::f64::consts::FRAC_PI_4;
        canvas.line(end, end + dir.rotated(wing) * ARROWHEAD_SIZE, width, colour);
        canvas.line(end, end + dir.rotated(-wing) * ARROWHEAD_SIZE, width, colour);
    }
}
