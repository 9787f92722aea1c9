use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A rectangle anchored at the canvas's top-left origin.
///
/// Serialized as `[x, y, width, height]`. Fractional values are accepted and
/// truncated toward zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "[f64; 4]", into = "[i32; 4]")]
pub struct LayoutBox {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl LayoutBox {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Result<Self> {
        if width <= 0 || height <= 0 {
            return Err(Error::EmptyBox { width, height });
        }
        Ok(Self { x, y, width, height })
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }
}

impl TryFrom<[f64; 4]> for LayoutBox {
    type Error = Error;

    fn try_from(values: [f64; 4]) -> Result<Self> {
        if let Some(bad) = values.iter().copied().find(|v| !v.is_finite()) {
            return Err(Error::NonFinite(bad));
        }
        let [x, y, width, height] = values.map(|v| v.trunc() as i32);
        Self::new(x, y, width, height)
    }
}

impl From<LayoutBox> for [i32; 4] {
    fn from(b: LayoutBox) -> Self {
        [b.x, b.y, b.width, b.height]
    }
}

/// Horizontal placement of a line inside its box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    #[default]
    Left,
    Center,
    /// Stretch inter-word gaps to fill the box; the paragraph's last line stays left.
    Justified,
}
