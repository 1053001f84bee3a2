use crate::config::PdfConfig;
use std::collections::HashMap;

/// Document information resolved for the writer.
///
/// Empty strings are left out of the `/Info` dictionary. A missing
/// `creation_date` is replaced by the current time when the document is
/// finished.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DocInfo {
    pub version: String,
    pub title: String,
    pub author: String,
    pub subject: String,
    pub producer: String,
    pub creator: String,
    pub creation_date: Option<String>,
}

impl DocInfo {
    /// Information with every field at its default.
    pub fn from_config(config: &PdfConfig) -> Self {
        Self {
            version: config.version.clone(),
            title: String::new(),
            author: String::new(),
            subject: String::new(),
            producer: config.producer.clone(),
            creator: config.creator.clone(),
            creation_date: None,
        }
    }

    /// Resolves the recognised keys of `info` on top of the defaults:
    /// `version`, `title`, `author`, `subject`, `producer`, `creator` and
    /// `creationDate`. Other keys are ignored. A key that is present with an
    /// empty value overrides the default with the empty string.
    pub fn from_map(info: &HashMap<String, String>, config: &PdfConfig) -> Self {
        let mut doc_info = Self::from_config(config);
        for (key, value) in info {
            match key.as_str() {
                "version" => doc_info.version = value.clone(),
                "title" => doc_info.title = value.clone(),
                "author" => doc_info.author = value.clone(),
                "subject" => doc_info.subject = value.clone(),
                "producer" => doc_info.producer = value.clone(),
                "creator" => doc_info.creator = value.clone(),
                "creationDate" => doc_info.creation_date = Some(value.clone()),
                other => tracing::debug!(key = other, "ignoring unknown document info key"),
            }
        }
        doc_info
    }
}
