use thiserror::Error;

#[derive(Error, Debug)]
pub enum PdfError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Contract violation: {0}")]
    ContractViolation(#[from] ContractViolation),

    #[error("Invalid page size: {0}x{1}")]
    InvalidPageSize(f64, f64),

    #[error("Invalid scale value: {0}")]
    InvalidScale(f64),

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Invalid PDF date format: {0:?}")]
    InvalidDate(String),

    #[error("Document is frozen")]
    DocumentFrozen,

    #[error("Compression error: {0}")]
    CompressionError(String),
}

impl PdfError {
    /// Returns `true` for programming errors in the use of the low-level
    /// writer, as opposed to environmental or input failures.
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, PdfError::ContractViolation(_))
    }
}

/// Misuse of the single-pass writer protocol.
///
/// These are never retried. The writer that reported one refuses any
/// further call.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContractViolation {
    #[error("object number {0} is outside 1..=65535")]
    ObjectIdOutOfRange(u32),

    #[error("object {0} was never allocated")]
    UnallocatedObject(u32),

    #[error("object {0} has already been started")]
    ObjectAlreadyStarted(u32),

    #[error("object {0} was allocated but never written")]
    MissingOffset(u32),

    #[error("writer was aborted by an earlier error")]
    WriterAborted,
}

pub type Result<T> = std::result::Result<T, PdfError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error as IoError, ErrorKind};

    #[test]
    fn test_pdf_error_display() {
        let error = PdfError::InvalidPageSize(0.0, 842.0);
        assert_eq!(error.to_string(), "Invalid page size: 0x842");

        let error = PdfError::InvalidDate("D:2018x".to_string());
        assert_eq!(error.to_string(), "Invalid PDF date format: \"D:2018x\"");
    }

    #[test]
    fn test_pdf_error_from_io_error() {
        let io_error = IoError::new(ErrorKind::NotFound, "file not found");
        let pdf_error = PdfError::from(io_error);

        match pdf_error {
            PdfError::Io(ref err) => {
                assert_eq!(err.kind(), ErrorKind::NotFound);
            }
            _ => panic!("Expected IO error variant"),
        }
        assert!(!pdf_error.is_contract_violation());
    }

    #[test]
    fn test_contract_violation_is_distinct() {
        let error = PdfError::from(ContractViolation::ObjectAlreadyStarted(3));
        assert!(error.is_contract_violation());
        assert_eq!(
            error.to_string(),
            "Contract violation: object 3 has already been started"
        );

        match error {
            PdfError::ContractViolation(v) => {
                assert_eq!(v, ContractViolation::ObjectAlreadyStarted(3))
            }
            _ => panic!("Expected contract violation"),
        }
    }

    #[test]
    fn test_all_variants_display() {
        let errors = vec![
            PdfError::InvalidScale(-1.0),
            PdfError::InvalidColor("component 1.5 out of range".to_string()),
            PdfError::DocumentFrozen,
            PdfError::CompressionError("deflate failed".to_string()),
            PdfError::from(ContractViolation::ObjectIdOutOfRange(65536)),
            PdfError::from(ContractViolation::UnallocatedObject(9)),
            PdfError::from(ContractViolation::MissingOffset(4)),
            PdfError::from(ContractViolation::WriterAborted),
        ];

        for error in errors {
            assert!(!error.to_string().is_empty());
        }
    }

    #[test]
    fn test_error_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PdfError>();
        assert_send_sync::<ContractViolation>();
    }
}
