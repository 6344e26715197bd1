#[allow(unused_imports)]
use crate::core::prelude::*;

use serde::{Deserialize, Serialize};

/// One immediate-mode draw command. All coordinates are screen-space
/// pixels; rasterization is the rendering collaborator's job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Primitive {
    Line {
        start: Vec2,
        end: Vec2,
        colour: Colour,
        width: f64,
    },
    Circle {
        centre: Vec2,
        radius: f64,
        colour: Colour,
    },
    Text {
        position: Vec2,
        text: String,
        colour: Colour,
    },
}

/// Collects the draw primitives for one frame, in emission order. The
/// order is compatible with straightforward immediate-mode drawing: later
/// primitives paint over earlier ones.
#[derive(Debug, Default, Clone)]
pub struct Canvas {
    primitives: Vec<Primitive>,
}

impl Canvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn line(&mut self, start: Vec2, end: Vec2, width: f64, colour: Colour) {
        self.primitives.push(Primitive::Line {
            start,
            end,
            colour,
            width,
        });
    }

    pub fn circle(&mut self, centre: Vec2, radius: f64, colour: Colour) {
        self.primitives.push(Primitive::Circle {
            centre,
            radius,
            colour,
        });
    }

    pub fn text(&mut self, position: Vec2, text: impl Into<String>, colour: Colour) {
        self.primitives.push(Primitive::Text {
            position,
            text: text.into(),
            colour,
        });
    }

    pub fn clear(&mut self) {
        self.primitives.clear();
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    /// Hands the frame's primitives to the rendering collaborator, leaving
    /// the canvas empty for the next tick.
    pub fn take(&mut self) -> Vec<Primitive> {
        std::mem::take(&mut self.primitives)
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }
}
