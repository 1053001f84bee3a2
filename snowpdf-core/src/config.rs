//! Generation settings shared by the document façade and the writer.

use crate::graphics::Color;

/// Millimetres to PDF points (1/72 inch).
pub const POINTS_PER_MM: f64 = 72.0 / 25.4;

/// Default PDF version written to the header.
pub const DEFAULT_PDF_VERSION: &str = "1.4";

/// Size of the snowman relative to the longer page edge at scale 1.
pub const STANDARD_SCALE: f64 = 0.6;

/// Settings that would otherwise be package-level constants.
///
/// A `PdfConfig` is passed explicitly to [`Document`](crate::Document) and
/// [`PdfWriter`](crate::PdfWriter), so tests and callers can override any of
/// them without touching global state.
///
/// ```rust
/// use snowpdf::{Color, PdfConfig};
///
/// let config = PdfConfig::default()
///     .with_version("1.5")
///     .with_muffler(Color::blue())
///     .with_compress(false);
/// assert_eq!(config.version, "1.5");
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PdfConfig {
    /// PDF version, such as "1.4"
    pub version: String,
    /// Whether content streams are deflate-compressed when it pays off
    pub compress: bool,
    /// Default page width in points
    pub page_width: f64,
    /// Default page height in points
    pub page_height: f64,
    /// Muffler color of the page added to documents that have none
    pub muffler: Color,
    /// Snowman size relative to the longer page edge at scale 1
    pub standard_scale: f64,
    /// Default `/Producer` entry
    pub producer: String,
    /// Default `/Creator` entry
    pub creator: String,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            version: DEFAULT_PDF_VERSION.to_string(),
            compress: cfg!(feature = "compression"),
            page_width: 210.0 * POINTS_PER_MM,
            page_height: 294.0 * POINTS_PER_MM,
            muffler: Color::red(),
            standard_scale: STANDARD_SCALE,
            producer: format!("snowpdf-{}", crate::VERSION),
            creator: "snowpdf".to_string(),
        }
    }
}

impl PdfConfig {
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Enable or disable stream compression.
    ///
    /// Without the `compression` feature streams are always written raw.
    pub fn with_compress(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    pub fn with_page_size(mut self, width: f64, height: f64) -> Self {
        self.page_width = width;
        self.page_height = height;
        self
    }

    pub fn with_muffler(mut self, muffler: Color) -> Self {
        self.muffler = muffler;
        self
    }

    pub fn with_producer(mut self, producer: impl Into<String>) -> Self {
        self.producer = producer.into();
        self
    }

    pub fn with_creator(mut self, creator: impl Into<String>) -> Self {
        self.creator = creator.into();
        self
    }
}
