//! # snowpdf
//!
//! An ultra-simple PDF generation library for all snowman comedians.
//!
//! To keep things simple, the content of a document is limited to the
//! essentials, that is, snowman pictures. You can choose the color of the
//! muffler each snowman wears, the size of the snowman, and the page size.
//!
//! ## Features
//!
//! - **Single-pass writer**: objects go straight to the output sink; only
//!   their byte offsets are kept for the cross-reference table
//! - **Stream compression**: Flate compression when it actually saves space
//!   (`compression` feature, on by default)
//! - **Document information**: title, author, subject, producer, creator and
//!   creation date, with UTF-16 strings for non-ASCII text
//! - **PDF dates**: formatting and parsing of `D:YYYYMMDDHHmmSSOHH'mm'`
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use snowpdf::{Color, Document, Result};
//!
//! # fn main() -> Result<()> {
//! let mut doc = Document::new();
//! doc.set_title("Essential")?;
//! doc.add_page(Color::red())?;
//! doc.add_page_scaled(Color::rgb8(0, 128, 255), 1.4)?;
//! doc.save("essential.pdf")?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`document`] - the document façade
//! - [`writer`] - low-level PDF writing (objects, streams, pages, xref, trailer)
//! - [`artwork`] - page content producers, including the snowman
//! - [`graphics`] - colors and number formatting
//! - [`date`] - PDF date strings
//! - [`objects`] - object identifiers and string encoding

pub mod artwork;
#[cfg(feature = "compression")]
pub mod compression;
pub mod config;
pub mod date;
pub mod document;
pub mod error;
pub mod graphics;
pub mod metadata;
pub mod objects;
pub mod page;
pub mod writer;

pub use artwork::{Artwork, Snowman};
pub use config::PdfConfig;
pub use date::{check_representable, format_pdf_date, format_pdf_date_naive, parse_pdf_date};
pub use document::Document;
pub use error::{ContractViolation, PdfError, Result};
pub use graphics::Color;
pub use metadata::DocInfo;
pub use objects::{encode_text_string, ObjectId};
pub use page::Page;
pub use writer::PdfWriter;

/// Current version of snowpdf
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Supported PDF versions
pub mod pdf_version {
    /// Versions the writer's output is valid for. The flat cross-reference
    /// table and plain Flate streams exist since PDF 1.2.
    pub const SUPPORTED_VERSIONS: &[&str] = &["1.2", "1.3", "1.4", "1.5", "1.6", "1.7", "2.0"];

    pub fn is_supported(version: &str) -> bool {
        SUPPORTED_VERSIONS.contains(&version)
    }
}
