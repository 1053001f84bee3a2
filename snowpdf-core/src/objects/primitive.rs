use crate::error::ContractViolation;
use std::fmt;

/// Highest object number this writer will emit.
pub const MAX_OBJECT_NUMBER: u32 = 65535;

/// Handle to an indirect object, handed out by
/// [`PdfWriter::allocate_id`](crate::writer::PdfWriter::allocate_id).
///
/// Every object is written with generation 0, so the handle is just the
/// object number. It renders in reference syntax, e.g. `3 0 R`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(u32);

impl ObjectId {
    pub(crate) fn new(number: u32) -> Self {
        Self(number)
    }

    pub fn number(&self) -> u32 {
        self.0
    }

    /// Checks `0 < number <= 65535`.
    pub fn check_range(&self) -> Result<(), ContractViolation> {
        if self.0 == 0 || self.0 > MAX_OBJECT_NUMBER {
            return Err(ContractViolation::ObjectIdOutOfRange(self.0));
        }
        Ok(())
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} 0 R", self.0)
    }
}
