use std::fmt;

pub const PDF_SUFFIX: &str = ".pdf";

/// Key of a PDF object inside the bucket, always ending in `.pdf`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentId(String);

impl DocumentId {
    /// Appends `.pdf` unless the name already ends with it in any case.
    /// Returns `None` for an empty name.
    pub fn normalize(raw: &str) -> Option<Self> {
        if raw.is_empty() {
            return None;
        }
        if has_pdf_suffix(raw) {
            Some(Self(raw.to_string()))
        } else {
            Some(Self(format!("{}{}", raw, PDF_SUFFIX)))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

pub fn has_pdf_suffix(name: &str) -> bool {
    name.to_lowercase().ends_with(PDF_SUFFIX)
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for DocumentId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Outcome of one successful fetch-and-extract run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedDocument {
    pub filename: DocumentId,
    pub url: String,
    pub text: String,
    pub page_count: usize,
}
