//! Layer domain model

use super::ids::LayerId;
use serde::{Deserialize, Serialize};

/// Pixel rectangle of a layer inside its document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerBounds {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl LayerBounds {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Whether the rectangle covers no pixels
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// A layer resolved inside a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layer {
    pub id: LayerId,
    pub name: String,
    pub bounds: LayerBounds,
}

impl Layer {
    pub fn new(id: LayerId, name: impl Into<String>, bounds: LayerBounds) -> Self {
        Self {
            id,
            name: name.into(),
            bounds,
        }
    }
}
