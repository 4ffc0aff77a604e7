use serde::Deserialize;

/// Raw query pairs in request order. A repeated `filename` keeps its first
/// value instead of failing to deserialize.
#[derive(Debug, Default, Deserialize)]
#[serde(transparent)]
pub struct GetPdfQuery {
    params: Vec<(String, String)>,
}

impl GetPdfQuery {
    pub fn new(params: Vec<(String, String)>) -> Self {
        Self { params }
    }

    /// The first supplied filename, treating an empty value as absent.
    pub fn filename(&self) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| key == "filename")
            .map(|(_, value)| value.as_str())
            .filter(|f| !f.is_empty())
    }
}
