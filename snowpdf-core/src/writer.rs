//! Low-level, single-pass PDF writer.
//!
//! Objects are written to the sink as soon as they are requested, in the
//! order the caller asks for them. The writer only remembers where each
//! object starts so that [`PdfWriter::finish`] can emit the page tree, the
//! catalog, the document information, the cross-reference table and the
//! trailer.
//!
//! ```rust
//! use snowpdf::{DocInfo, PdfConfig, PdfWriter};
//!
//! # fn main() -> snowpdf::Result<()> {
//! let config = PdfConfig::default();
//! let mut buffer = Vec::new();
//! let mut writer = PdfWriter::open(&mut buffer, DocInfo::from_config(&config), &config)?;
//!
//! let resources = writer.allocate_id();
//! writer.write_object(resources, b"<</ProcSet[/PDF]>>")?;
//! let contents = writer.allocate_id();
//! writer.write_stream(contents, b"0 0 m 100 100 l S")?;
//! let page = writer.allocate_id();
//! writer.write_page(page, contents, resources, b"/MediaBox[0 0 200 200]")?;
//! writer.finish()?;
//!
//! assert!(buffer.ends_with(b"%%EOF\n"));
//! # Ok(())
//! # }
//! ```

use crate::config::PdfConfig;
use crate::date::format_pdf_date;
use crate::error::{ContractViolation, PdfError, Result};
use crate::metadata::DocInfo;
use crate::objects::{encode_text_string, ObjectId};
use chrono::Local;
use std::borrow::Cow;
use std::fmt::Write as _;
use std::io::{BufWriter, Write};

/// Comment line with high-bit bytes so that transfer tools treat the file as
/// binary.
const BINARY_MARKER: &[u8] = b"%\xC5\xDD\xC4\xB6\n";

/// The `Kids` array of the page tree breaks its line once it grows past
/// this many characters.
const KIDS_LINE_WIDTH: usize = 70;

pub struct PdfWriter<W: Write> {
    writer: BufWriter<W>,
    position: u64,
    /// Byte offset of every allocated object, indexed by object number.
    /// Slot 0 stands for the head of the free list and is never filled.
    offsets: Vec<Option<u64>>,
    pages: Vec<ObjectId>,
    pages_id: ObjectId,
    info: DocInfo,
    compress: bool,
    aborted: bool,
}

impl<W: Write> PdfWriter<W> {
    /// Starts a new PDF file on `sink` and writes the file header.
    ///
    /// The page tree root is allocated here, so it always gets object
    /// number 1.
    pub fn open(sink: W, info: DocInfo, config: &PdfConfig) -> Result<Self> {
        let mut writer = Self {
            writer: BufWriter::new(sink),
            position: 0,
            offsets: vec![None],
            pages: Vec::new(),
            pages_id: ObjectId::new(0),
            info,
            compress: config.compress,
            aborted: false,
        };
        writer.pages_id = writer.allocate_id();
        if !crate::pdf_version::is_supported(&writer.info.version) {
            tracing::warn!(
                version = %writer.info.version,
                "PDF version outside the supported range, writing it anyway"
            );
        }

        let header = format!("%PDF-{}\n", writer.info.version);
        writer.write_bytes(header.as_bytes())?;
        writer.write_bytes(BINARY_MARKER)?;
        Ok(writer)
    }

    /// Hands out the next object number.
    pub fn allocate_id(&mut self) -> ObjectId {
        let id = ObjectId::new(self.offsets.len() as u32);
        self.offsets.push(None);
        id
    }

    /// Records the current position as the start of object `id` and writes
    /// its `obj` line. The caller writes the rest of the object.
    pub fn begin_object(&mut self, id: ObjectId) -> Result<()> {
        self.run(|w| w.start_object(id))
    }

    /// Writes a complete object whose body is `body`, typically a dictionary.
    pub fn write_object(&mut self, id: ObjectId, body: &[u8]) -> Result<()> {
        self.run(|w| w.put_object(id, body))
    }

    /// Writes a stream object holding `data`.
    ///
    /// With compression enabled the data is deflated, but the compressed
    /// form is only used when it is at least
    /// [`MIN_SAVINGS`](crate::compression::MIN_SAVINGS) bytes shorter.
    pub fn write_stream(&mut self, id: ObjectId, data: &[u8]) -> Result<()> {
        self.run(|w| {
            w.start_object(id)?;
            let (data, filter) = w.encode_stream(data)?;
            let dict = format!("<</Length {}{}>>\nstream\n", data.len(), filter);
            w.write_bytes(dict.as_bytes())?;
            w.write_bytes(&data)?;
            w.write_newline_after(&data)?;
            w.write_bytes(b"endstream\nendobj\n")?;
            tracing::debug!(
                object = id.number(),
                length = data.len(),
                filtered = !filter.is_empty(),
                "wrote stream"
            );
            Ok(())
        })
    }

    /// Writes a page object and appends it to the page tree.
    ///
    /// `extra` is spliced into the page dictionary verbatim; it usually
    /// carries the `/MediaBox`.
    pub fn write_page(
        &mut self,
        id: ObjectId,
        contents: ObjectId,
        resources: ObjectId,
        extra: &[u8],
    ) -> Result<()> {
        self.run(|w| {
            w.check_allocated(contents)?;
            w.check_allocated(resources)?;
            w.start_object(id)?;
            w.pages.push(id);
            let dict = format!(
                "<</Type/Page/Contents {}/Resources {}/Parent {}\n",
                contents, resources, w.pages_id
            );
            w.write_bytes(dict.as_bytes())?;
            w.write_bytes(extra)?;
            w.write_bytes(b">>\nendobj\n")?;
            tracing::debug!(object = id.number(), page = w.pages.len(), "wrote page");
            Ok(())
        })
    }

    /// Writes the page tree, catalog, document information, cross-reference
    /// table and trailer, then flushes the sink.
    ///
    /// Returns the total number of bytes written.
    pub fn finish(mut self) -> Result<u64> {
        self.run(|w| w.finish_document())
    }

    /// Number of bytes written so far.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// The page tree root every page points to as its parent.
    pub fn pages_id(&self) -> ObjectId {
        self.pages_id
    }

    /// Number of objects allocated so far.
    pub fn object_count(&self) -> usize {
        self.offsets.len() - 1
    }

    /// Pages written so far, in document order.
    pub fn pages(&self) -> &[ObjectId] {
        &self.pages
    }

    fn run<T>(&mut self, op: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        if self.aborted {
            return Err(ContractViolation::WriterAborted.into());
        }
        let result = op(self);
        if let Err(error) = &result {
            self.aborted = true;
            if error.is_contract_violation() {
                tracing::error!(%error, "PDF writer misused, aborting");
            } else {
                tracing::warn!(%error, position = self.position, "PDF generation aborted");
            }
        }
        result
    }

    fn check_allocated(&self, id: ObjectId) -> Result<()> {
        id.check_range()?;
        if id.number() as usize >= self.offsets.len() {
            return Err(ContractViolation::UnallocatedObject(id.number()).into());
        }
        Ok(())
    }

    fn start_object(&mut self, id: ObjectId) -> Result<()> {
        self.check_allocated(id)?;
        let slot = &mut self.offsets[id.number() as usize];
        if slot.is_some() {
            return Err(ContractViolation::ObjectAlreadyStarted(id.number()).into());
        }
        *slot = Some(self.position);
        tracing::trace!(object = id.number(), offset = self.position, "begin object");

        let header = format!("{} 0 obj\n", id.number());
        self.write_bytes(header.as_bytes())
    }

    fn put_object(&mut self, id: ObjectId, body: &[u8]) -> Result<()> {
        self.start_object(id)?;
        self.write_bytes(body)?;
        self.write_newline_after(body)?;
        self.write_bytes(b"endobj\n")
    }

    #[cfg(feature = "compression")]
    fn encode_stream<'a>(&self, data: &'a [u8]) -> Result<(Cow<'a, [u8]>, &'static str)> {
        if self.compress {
            if let Some(compressed) = crate::compression::compress_if_worthwhile(data)? {
                return Ok((Cow::Owned(compressed), "/Filter/FlateDecode"));
            }
        }
        Ok((Cow::Borrowed(data), ""))
    }

    #[cfg(not(feature = "compression"))]
    fn encode_stream<'a>(&self, data: &'a [u8]) -> Result<(Cow<'a, [u8]>, &'static str)> {
        Ok((Cow::Borrowed(data), ""))
    }

    fn finish_document(&mut self) -> Result<u64> {
        // page tree
        let pages_id = self.pages_id;
        self.start_object(pages_id)?;
        let tree = format!(
            "<</Type/Pages/Count {}/Kids\n{}>>\nendobj\n",
            self.pages.len(),
            kids_array(&self.pages)
        );
        self.write_bytes(tree.as_bytes())?;

        // catalog
        let catalog_id = self.allocate_id();
        let catalog = format!("<</Type/Catalog/Pages {}>>", pages_id);
        self.put_object(catalog_id, catalog.as_bytes())?;

        // document information
        let creation_date = self
            .info
            .creation_date
            .take()
            .unwrap_or_else(|| format_pdf_date(&Local::now()));
        let info_id = self.allocate_id();
        let info = &self.info;
        let mut dict = String::from("<<");
        for (key, value) in [
            ("Title", info.title.as_str()),
            ("Author", info.author.as_str()),
            ("Subject", info.subject.as_str()),
            ("Producer", info.producer.as_str()),
            ("Creator", info.creator.as_str()),
            ("CreationDate", creation_date.as_str()),
            ("ModDate", creation_date.as_str()),
        ] {
            if !value.is_empty() {
                let _ = writeln!(dict, "/{}{}", key, encode_text_string(value));
            }
        }
        dict.push_str("/Trapped/False>>\nendobj\n");
        self.start_object(info_id)?;
        self.write_bytes(dict.as_bytes())?;

        // cross-reference table
        let xref_position = self.position;
        let size = self.offsets.len();
        let mut xref = format!("xref\n0 {size}\n{:010} {:05} f \n", 0, 65535);
        for (number, offset) in self.offsets.iter().enumerate().skip(1) {
            let offset = offset.ok_or(ContractViolation::MissingOffset(number as u32))?;
            let _ = write!(xref, "{:010} {:05} n \n", offset, 0);
        }
        self.write_bytes(xref.as_bytes())?;

        // trailer
        let id = document_id(&creation_date, &self.info.title, xref_position);
        let trailer = format!(
            "trailer\n<</Size {size}/Root {catalog_id}/Info {info_id}\n/ID[<{id}><{id}>]>>\nstartxref\n{xref_position}\n%%EOF\n"
        );
        self.write_bytes(trailer.as_bytes())?;
        self.writer.flush()?;

        tracing::info!(
            objects = size - 1,
            pages = self.pages.len(),
            bytes = self.position,
            "finished PDF"
        );
        Ok(self.position)
    }

    fn write_newline_after(&mut self, data: &[u8]) -> Result<()> {
        if data.ends_with(b"\n") {
            return Ok(());
        }
        self.write_bytes(b"\n")
    }

    fn write_bytes(&mut self, data: &[u8]) -> Result<()> {
        self.writer.write_all(data).map_err(PdfError::Io)?;
        self.position += data.len() as u64;
        Ok(())
    }
}

/// Lays out page references as a PDF array, breaking the line whenever it
/// has grown past [`KIDS_LINE_WIDTH`] characters. A reference is never
/// split.
pub fn kids_array(pages: &[ObjectId]) -> String {
    let mut kids = String::from("[");
    let mut line_start = 0;
    for id in pages {
        let _ = write!(kids, "{id}");
        if kids.len() > line_start + KIDS_LINE_WIDTH {
            kids.push('\n');
            line_start = kids.len();
        } else {
            kids.push(' ');
        }
    }
    if !pages.is_empty() {
        kids.pop();
    }
    kids.push(']');
    kids
}

/// The file identifier written twice into the trailer's `/ID`: the MD5 of
/// `creation_date/title/xref_position` in upper-case hex.
pub fn document_id(creation_date: &str, title: &str, xref_position: u64) -> String {
    let digest = md5::compute(format!("{creation_date}/{title}/{xref_position}"));
    hex::encode_upper(digest.0)
}
