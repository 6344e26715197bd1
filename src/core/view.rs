#[allow(unused_imports)]
use crate::core::prelude::*;

use crate::core::ensure_finite;
use serde::{Deserialize, Serialize};

/// The live view transform owned by the rendering collaborator: a scale in
/// pixels per world unit, a world-space pan offset, and the surface size in
/// pixels. Read-only to the engine.
///
/// World coordinates have y growing upward; screen coordinates have y
/// growing downward with the origin at the top-left. [`world_to_screen`]
/// and [`screen_to_world`] encode that flip exactly and are mutual
/// inverses.
///
/// [`world_to_screen`]: Viewport::world_to_screen
/// [`screen_to_world`]: Viewport::screen_to_world
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    scale: f64,
    offset: Vec2,
    width: f64,
    height: f64,
}

impl Viewport {
    /// Creates a viewport, rejecting non-finite parameters and
    /// non-positive scales with [`InvalidInputError`].
    pub fn new(width: f64, height: f64, scale: f64, offset: Vec2) -> Result<Self, InvalidInputError> {
        let width = ensure_finite("width", width)?;
        let height = ensure_finite("height", height)?;
        let scale = ensure_finite("scale", scale)?;
        let offset = Vec2 {
            x: ensure_finite("offset.x", offset.x)?,
            y: ensure_finite("offset.y", offset.y)?,
        };
        if scale <= 0.0 {
            return Err(InvalidInputError {
                name: "scale",
                value: scale,
            });
        }
        Ok(Self {
            scale,
            offset,
            width,
            height,
        })
    }

    /// A viewport of the given size at [`DEFAULT_VIEW_SCALE`], centred on
    /// the origin.
    pub fn with_size(width: f64, height: f64) -> Result<Self, InvalidInputError> {
        Self::new(width, height, DEFAULT_VIEW_SCALE, Vec2::zero())
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }
    pub fn offset(&self) -> Vec2 {
        self.offset
    }
    pub fn width(&self) -> f64 {
        self.width
    }
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Maps a world-space point to screen pixels.
    #[must_use]
    pub fn world_to_screen(&self, p: Vec2) -> Vec2 {
        Vec2 {
            x: (p.x + self.offset.x) * self.scale + self.width / 2.0,
            y: -(p.y + self.offset.y) * self.scale + self.height / 2.0,
        }
    }

    /// Maps a screen-pixel position back to world space. Exact inverse of
    /// [`world_to_screen`](Viewport::world_to_screen) up to floating-point
    /// tolerance.
    #[must_use]
    pub fn screen_to_world(&self, q: Vec2) -> Vec2 {
        Vec2 {
            x: (q.x - self.width / 2.0) / self.scale - self.offset.x,
            y: -(q.y - self.height / 2.0) / self.scale - self.offset.y,
        }
    }

    /// The four screen corners mapped to world space, in
    /// top-left, top-right, bottom-left, bottom-right order.
    #[must_use]
    pub fn world_corners(&self) -> [Vec2; 4] {
        [
            self.screen_to_world(Vec2::zero()),
            self.screen_to_world(Vec2 {
                x: self.width,
                y: 0.0,
            }),
            self.screen_to_world(Vec2 {
                x: 0.0,
                y: self.height,
            }),
            self.screen_to_world(Vec2 {
                x: self.width,
                y: self.height,
            }),
        ]
    }
}
