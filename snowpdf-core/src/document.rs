use crate::artwork::{Artwork, Snowman};
use crate::config::PdfConfig;
use crate::date::{check_representable, format_pdf_date, parse_pdf_date};
use crate::error::{PdfError, Result};
use crate::graphics::{format_real, Color};
use crate::metadata::DocInfo;
use crate::page::Page;
use crate::writer::PdfWriter;
use chrono::{DateTime, TimeZone};
use std::collections::HashMap;
use std::fmt;
use std::io::Write;
use std::path::Path;

/// Resources shared by every page: plain PDF drawing operators only.
const PAGE_RESOURCES: &[u8] = b"<</ProcSet[/PDF]>>\n";

/// A snowman PDF document.
///
/// Every page shows one snowman; pages differ only in the muffler color and
/// the size of the snowman. Once the document has been written it is frozen
/// and refuses further modification.
///
/// # Example
///
/// ```rust
/// use snowpdf::{Color, Document};
///
/// # fn main() -> snowpdf::Result<()> {
/// let mut doc = Document::new();
/// doc.set_title("Essential")?;
/// doc.add_page(Color::blue())?;
/// doc.add_page_scaled(Color::gray(0.5), 1.5)?;
///
/// let bytes = doc.to_bytes()?;
/// assert!(bytes.starts_with(b"%PDF-1.4\n"));
/// assert!(doc.is_frozen());
/// # Ok(())
/// # }
/// ```
pub struct Document {
    width: f64,
    height: f64,
    pages: Vec<Page>,
    frozen: bool,
    info: HashMap<String, String>,
    config: PdfConfig,
    artwork: Box<dyn Artwork + Send + Sync>,
}

impl Document {
    /// Creates a new empty document with the default configuration.
    pub fn new() -> Self {
        Self::with_config(PdfConfig::default())
    }

    pub fn with_config(config: PdfConfig) -> Self {
        Self {
            width: 0.0,
            height: 0.0,
            pages: Vec::new(),
            frozen: false,
            info: HashMap::new(),
            config,
            artwork: Box::new(Snowman),
        }
    }

    /// Creates a new document with the given page size in points.
    pub fn with_size(width: f64, height: f64) -> Result<Self> {
        let mut doc = Self::new();
        doc.set_page_size(width, height)?;
        Ok(doc)
    }

    pub fn config(&self) -> &PdfConfig {
        &self.config
    }

    /// Replaces the snowman with another page content producer.
    pub fn set_artwork(&mut self, artwork: impl Artwork + Send + Sync + 'static) -> Result<()> {
        self.ensure_mutable()?;
        self.artwork = Box::new(artwork);
        Ok(())
    }

    /// Sets the page size in points. Both lengths must be positive.
    pub fn set_page_size(&mut self, width: f64, height: f64) -> Result<()> {
        self.ensure_mutable()?;
        check_page_size(width, height)?;
        self.width = width;
        self.height = height;
        Ok(())
    }

    /// The page size in points; the configured default until one is set.
    pub fn page_size(&self) -> (f64, f64) {
        if self.width == 0.0 && self.height == 0.0 {
            (self.config.page_width, self.config.page_height)
        } else {
            (self.width, self.height)
        }
    }

    /// Adds a page whose snowman wears a muffler of the given color.
    pub fn add_page(&mut self, muffler: Color) -> Result<()> {
        self.add_page_scaled(muffler, 1.0)
    }

    /// Adds a page with the snowman scaled relative to its standard size.
    pub fn add_page_scaled(&mut self, muffler: Color, scale: f64) -> Result<()> {
        self.ensure_mutable()?;
        check_scale(scale)?;
        let effective = scale * self.config.standard_scale;
        check_scale(effective)?;
        muffler.validate()?;
        self.pages.push(Page::new(muffler, effective));
        Ok(())
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Gets the number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Replaces the document information.
    ///
    /// Recognised keys:
    ///
    /// - `version`: PDF version, such as "1.5" (default: "1.4")
    /// - `title` / `author` / `subject`: with obvious meanings (default: empty)
    /// - `producer`: software that produced the PDF (default: "snowpdf-<version>")
    /// - `creator`: software that created the document (default: "snowpdf")
    /// - `creationDate`: in the form "D:20180808120000+09'00'" (default: now)
    pub fn set_doc_info(&mut self, info: &HashMap<String, String>) -> Result<()> {
        self.ensure_mutable()?;
        if let Some(date) = info.get("creationDate") {
            parse_pdf_date(date)?;
        }
        self.info = info.clone();
        Ok(())
    }

    /// Sets the document title.
    pub fn set_title(&mut self, title: impl Into<String>) -> Result<()> {
        self.set_info("title", title.into())
    }

    /// Sets the document author.
    pub fn set_author(&mut self, author: impl Into<String>) -> Result<()> {
        self.set_info("author", author.into())
    }

    /// Sets the document subject.
    pub fn set_subject(&mut self, subject: impl Into<String>) -> Result<()> {
        self.set_info("subject", subject.into())
    }

    /// Sets the document creator (software that created the original document).
    pub fn set_creator(&mut self, creator: impl Into<String>) -> Result<()> {
        self.set_info("creator", creator.into())
    }

    /// Sets the document producer (software that produced the PDF).
    pub fn set_producer(&mut self, producer: impl Into<String>) -> Result<()> {
        self.set_info("producer", producer.into())
    }

    /// Sets the document creation date.
    ///
    /// The date must fit the PDF date format: a year from 0 to 9999 and a
    /// UTC offset in whole minutes.
    pub fn set_creation_date<Tz: TimeZone>(&mut self, date: &DateTime<Tz>) -> Result<()> {
        check_representable(date)?;
        self.set_info("creationDate", format_pdf_date(date))
    }

    /// Document information as currently set.
    pub fn doc_info(&self) -> &HashMap<String, String> {
        &self.info
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Generates the PDF and writes it to `sink`, returning the number of
    /// bytes written.
    ///
    /// A PDF file without pages is not allowed, so a default page (a snowman
    /// with the configured muffler, red unless changed) is added when the
    /// document has none. Afterwards the document is frozen.
    ///
    /// # Errors
    ///
    /// Returns an error before anything is written if the page size or a
    /// page scale coming from the configuration is not positive. Returns an
    /// error if writing to `sink` fails; bytes already written are not
    /// rolled back.
    pub fn write_to<W: Write>(&mut self, sink: W) -> Result<u64> {
        let (width, height) = self.page_size();
        check_page_size(width, height)?;
        self.width = width;
        self.height = height;
        if self.pages.is_empty() {
            self.add_page(self.config.muffler)?;
        }
        self.frozen = true;

        tracing::debug!(pages = self.pages.len(), width, height, "writing document");

        let info = DocInfo::from_map(&self.info, &self.config);
        let mut writer = PdfWriter::open(sink, info, &self.config)?;

        let resources = writer.allocate_id();
        writer.write_object(resources, PAGE_RESOURCES)?;

        let media_box = format!("/MediaBox[0 0 {} {}]", format_real(width), format_real(height));
        for page in &self.pages {
            let content = self
                .artwork
                .content(width, height, page.scale(), &page.muffler());
            let contents = writer.allocate_id();
            writer.write_stream(contents, content.as_bytes())?;
            let page_id = writer.allocate_id();
            writer.write_page(page_id, contents, resources, media_box.as_bytes())?;
        }

        writer.finish()
    }

    /// Generates the PDF and returns its bytes.
    ///
    /// The same notes as for [`Document::write_to`] apply.
    pub fn to_bytes(&mut self) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        self.write_to(&mut buffer)?;
        Ok(buffer)
    }

    /// Saves the document to a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or written.
    pub fn save(&mut self, path: impl AsRef<Path>) -> Result<u64> {
        let file = std::fs::File::create(path)?;
        self.write_to(file)
    }

    fn set_info(&mut self, key: &str, value: String) -> Result<()> {
        self.ensure_mutable()?;
        self.info.insert(key.to_string(), value);
        Ok(())
    }

    fn ensure_mutable(&self) -> Result<()> {
        if self.frozen {
            return Err(PdfError::DocumentFrozen);
        }
        Ok(())
    }
}

fn check_page_size(width: f64, height: f64) -> Result<()> {
    if !(width > 0.0 && height > 0.0) || !width.is_finite() || !height.is_finite() {
        return Err(PdfError::InvalidPageSize(width, height));
    }
    Ok(())
}

fn check_scale(scale: f64) -> Result<()> {
    if !(scale > 0.0) || !scale.is_finite() {
        return Err(PdfError::InvalidScale(scale));
    }
    Ok(())
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Document {
    /// Dumps the document state, e.g. `Doc*(595.276x833.386)[rg(1,0,0)*0.6]`.
    /// The `*` marks a frozen document.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Doc")?;
        if self.frozen {
            write!(f, "*")?;
        }
        write!(f, "({}x{})[", format_real(self.width), format_real(self.height))?;
        for (i, page) in self.pages.iter().enumerate() {
            if i > 0 {
                write!(f, ";")?;
            }
            write!(f, "{}*{}", page.muffler(), format_real(page.scale()))?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_new() {
        let doc = Document::new();
        assert_eq!(doc.page_count(), 0);
        assert!(!doc.is_frozen());
        assert!(doc.doc_info().is_empty());
        let (w, h) = doc.page_size();
        assert!((w - 595.2756).abs() < 1e-3);
        assert!((h - 833.3858).abs() < 1e-3);
    }

    #[test]
    fn test_with_size() {
        let doc = Document::with_size(300.0, 400.0).unwrap();
        assert_eq!(doc.page_size(), (300.0, 400.0));
        assert!(matches!(
            Document::with_size(0.0, 400.0),
            Err(PdfError::InvalidPageSize(..))
        ));
    }

    #[test]
    fn test_set_page_size_rejects_non_positive() {
        let mut doc = Document::new();
        for (w, h) in [(0.0, 1.0), (1.0, 0.0), (-1.0, 1.0), (1.0, -5.0), (f64::NAN, 1.0)] {
            assert!(doc.set_page_size(w, h).is_err(), "accepted {w}x{h}");
        }
        assert_eq!(doc.page_size(), (doc.config().page_width, doc.config().page_height));
    }

    #[test]
    fn test_add_page_applies_standard_scale() {
        let mut doc = Document::new();
        doc.add_page(Color::blue()).unwrap();
        doc.add_page_scaled(Color::green(), 0.5).unwrap();
        assert_eq!(doc.pages()[0].scale(), 0.6);
        assert_eq!(doc.pages()[1].scale(), 0.3);
        assert_eq!(doc.pages()[1].muffler(), Color::green());
    }

    #[test]
    fn test_add_page_validation() {
        let mut doc = Document::new();
        assert!(matches!(
            doc.add_page_scaled(Color::red(), 0.0),
            Err(PdfError::InvalidScale(_))
        ));
        assert!(matches!(
            doc.add_page_scaled(Color::red(), -2.0),
            Err(PdfError::InvalidScale(_))
        ));
        assert!(matches!(
            doc.add_page(Color::Rgb(2.0, 0.0, 0.0)),
            Err(PdfError::InvalidColor(_))
        ));
        assert_eq!(doc.page_count(), 0);
    }

    #[test]
    fn test_set_doc_info_validates_creation_date() {
        let mut doc = Document::new();
        let mut info = HashMap::new();
        info.insert("creationDate".to_string(), "yesterday".to_string());
        assert!(matches!(
            doc.set_doc_info(&info),
            Err(PdfError::InvalidDate(_))
        ));

        info.insert("creationDate".to_string(), "D:2018".to_string());
        doc.set_doc_info(&info).unwrap();
        assert_eq!(doc.doc_info().get("creationDate").unwrap(), "D:2018");
    }

    #[test]
    fn test_frozen_after_write() {
        let mut doc = Document::new();
        doc.to_bytes().unwrap();
        assert!(doc.is_frozen());
        assert_eq!(doc.page_count(), 1);

        assert!(matches!(doc.add_page(Color::red()), Err(PdfError::DocumentFrozen)));
        assert!(matches!(doc.set_page_size(1.0, 1.0), Err(PdfError::DocumentFrozen)));
        assert!(matches!(doc.set_title("late"), Err(PdfError::DocumentFrozen)));
        assert!(matches!(
            doc.set_doc_info(&HashMap::new()),
            Err(PdfError::DocumentFrozen)
        ));
        assert!(matches!(doc.set_artwork(Snowman), Err(PdfError::DocumentFrozen)));

        // writing again is still allowed
        assert!(doc.to_bytes().is_ok());
    }

    #[test]
    fn test_display() {
        let mut doc = Document::with_size(100.0, 200.0).unwrap();
        assert_eq!(doc.to_string(), "Doc(100x200)[]");
        doc.add_page(Color::red()).unwrap();
        doc.add_page_scaled(Color::gray(0.5), 2.0).unwrap();
        assert_eq!(doc.to_string(), "Doc(100x200)[rg(1,0,0)*0.6;g(0.5)*1.2]");
        doc.to_bytes().unwrap();
        assert!(doc.to_string().starts_with("Doc*("));
    }

    #[test]
    fn test_setters_fill_info_map() {
        let mut doc = Document::new();
        doc.set_title("t").unwrap();
        doc.set_author("a").unwrap();
        doc.set_subject("s").unwrap();
        doc.set_creator("c").unwrap();
        doc.set_producer("p").unwrap();
        let info = doc.doc_info();
        assert_eq!(info["title"], "t");
        assert_eq!(info["author"], "a");
        assert_eq!(info["subject"], "s");
        assert_eq!(info["creator"], "c");
        assert_eq!(info["producer"], "p");
    }
}
