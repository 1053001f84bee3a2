//! Object-level building blocks shared by the writer.

mod primitive;
mod string;

pub use primitive::{ObjectId, MAX_OBJECT_NUMBER};
pub use string::encode_text_string;
