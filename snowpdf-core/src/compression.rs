//! Compression utilities for PDF streams

use crate::error::{PdfError, Result};

/// A compressed stream must be at least this many bytes shorter than the raw
/// data, otherwise the `/Filter` entry costs more than it saves.
pub const MIN_SAVINGS: usize = 32;

/// Compress data using Flate/Zlib compression
pub fn compress(data: &[u8]) -> Result<Vec<u8>> {
    use flate2::write::ZlibEncoder;
    use flate2::Compression;
    use std::io::Write;

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(data)
        .map_err(|e| PdfError::CompressionError(e.to_string()))?;
    encoder
        .finish()
        .map_err(|e| PdfError::CompressionError(e.to_string()))
}

/// Decompress data using Flate/Zlib decompression
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    use flate2::read::ZlibDecoder;
    use std::io::Read;

    let mut decoder = ZlibDecoder::new(data);
    let mut decompressed = Vec::new();
    decoder
        .read_to_end(&mut decompressed)
        .map_err(|e| PdfError::CompressionError(e.to_string()))?;
    Ok(decompressed)
}

/// Compresses `data` and returns the result only when it pays off, that is
/// when `compressed.len() <= data.len() - MIN_SAVINGS`.
pub fn compress_if_worthwhile(data: &[u8]) -> Result<Option<Vec<u8>>> {
    let compressed = compress(data)?;
    let worthwhile = compressed.len() + MIN_SAVINGS <= data.len();
    tracing::trace!(
        raw = data.len(),
        compressed = compressed.len(),
        worthwhile,
        "deflate"
    );
    Ok(worthwhile.then_some(compressed))
}
