use crate::graphics::Color;

/// A single page of a [`Document`](crate::Document): one snowman wearing a
/// muffler of the given color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Page {
    muffler: Color,
    scale: f64,
}

impl Page {
    /// `scale` is the effective size of the snowman relative to the longer
    /// page edge, i.e. already multiplied by the standard scale.
    pub(crate) fn new(muffler: Color, scale: f64) -> Self {
        Self { muffler, scale }
    }

    pub fn muffler(&self) -> Color {
        self.muffler
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }
}
