//! HTML viewer for a fetched PDF
//!
//! Embeds the document in an iframe behind a loading indicator and always
//! offers "open" and "download" links, so the file stays reachable when the
//! browser refuses to embed it.

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::models::FetchedDocument;

/// Load state of the embedded document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Loading,
    /// Terminal. `failed` records whether the embed reported an error.
    Settled { failed: bool },
}

impl LoadState {
    /// Applies the embed's load or error signal. Only the first signal counts.
    pub fn settle(self, failed: bool) -> Self {
        match self {
            LoadState::Loading => LoadState::Settled { failed },
            settled => settled,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }
}

#[derive(Debug, Clone)]
pub struct PdfViewer {
    pub pdf_url: String,
    pub paragraph_text: String,
    pub filename: String,
    state: LoadState,
}

impl PdfViewer {
    pub fn new(
        pdf_url: impl Into<String>,
        paragraph_text: impl Into<String>,
        filename: impl Into<String>,
    ) -> Self {
        Self {
            pdf_url: pdf_url.into(),
            paragraph_text: paragraph_text.into(),
            filename: filename.into(),
            state: LoadState::Loading,
        }
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn on_load(&mut self) {
        self.state = self.state.settle(false);
    }

    pub fn on_error(&mut self) {
        self.state = self.state.settle(true);
    }

    /// Full HTML page. The inline script mirrors `LoadState` in the browser.
    pub fn render_page(&self) -> String {
        format!(
            concat!(
                "<!DOCTYPE html>\n",
                "<html lang=\"en\">\n",
                "<head>\n",
                "<meta charset=\"utf-8\">\n",
                "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n",
                "<title>{title}</title>\n",
                "<style>{style}</style>\n",
                "</head>\n",
                "<body>\n{widget}\n",
                "<script>{script}</script>\n",
                "</body>\n",
                "</html>\n"
            ),
            title = encode_text(&self.filename),
            style = STYLE,
            widget = self.render(),
            script = SCRIPT,
        )
    }

    /// The viewer fragment on its own.
    pub fn render(&self) -> String {
        let url = encode_double_quoted_attribute(&self.pdf_url);
        let name_attr = encode_double_quoted_attribute(&self.filename);
        let mut html = String::new();

        html.push_str("<div class=\"pdf-widget\">\n");
        html.push_str(&format!(
            "  <div class=\"pdf-header\">\n    <span class=\"pdf-filename\">{}</span>\n    \
             <a class=\"pdf-open\" href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">Open in New Tab</a>\n  </div>\n",
            encode_text(&self.filename),
            url
        ));

        if !self.paragraph_text.is_empty() {
            html.push_str(&format!(
                "  <div class=\"pdf-text\"><p>{}</p></div>\n",
                encode_text(&self.paragraph_text)
            ));
        }

        html.push_str("  <div class=\"pdf-frame\">\n");
        if self.state.is_loading() {
            html.push_str(
                "    <div class=\"pdf-loading\" id=\"pdf-loading\">\n      <div class=\"spinner\"></div>\n      \
                 <p>Loading PDF...</p>\n    </div>\n",
            );
        }
        html.push_str(&format!(
            "    <iframe id=\"pdf-embed\" src=\"{}\" title=\"{}\"></iframe>\n  </div>\n",
            url, name_attr
        ));

        html.push_str(&format!(
            "  <div class=\"pdf-download\">\n    <a href=\"{}\" download=\"{}\">Download PDF</a>\n  </div>\n",
            url, name_attr
        ));
        html.push_str("</div>");

        html
    }
}

impl From<&FetchedDocument> for PdfViewer {
    fn from(doc: &FetchedDocument) -> Self {
        Self::new(doc.url.clone(), doc.text.clone(), doc.filename.as_str())
    }
}

const STYLE: &str = "\
body{font-family:system-ui,sans-serif;background:#f3f4f6;margin:0}\
.pdf-widget{max-width:42rem;margin:1rem auto;padding:1.5rem;background:#fff;border:1px solid #e5e7eb;border-radius:.5rem}\
.pdf-header{display:flex;justify-content:space-between;align-items:center;margin-bottom:1rem}\
.pdf-filename{font-weight:600;font-size:.875rem}\
.pdf-open{font-size:.75rem;color:#2563eb}\
.pdf-text p{line-height:1.6;white-space:pre-wrap}\
.pdf-frame{position:relative;min-height:600px;background:#f3f4f6;border-radius:.5rem;overflow:hidden}\
.pdf-frame iframe{width:100%;min-height:600px;border:none}\
.pdf-loading{position:absolute;inset:0;display:flex;flex-direction:column;align-items:center;justify-content:center}\
.spinner{width:3rem;height:3rem;border-radius:50%;border-bottom:2px solid #111827;animation:spin 1s linear infinite}\
@keyframes spin{to{transform:rotate(360deg)}}\
.pdf-download{margin-top:1rem;text-align:center}";

// Load and error both settle the embed; the first one wins.
const SCRIPT: &str = "\
(function(){\
var frame=document.getElementById('pdf-embed');\
var settled=false;\
function settle(){if(settled){return;}settled=true;\
var el=document.getElementById('pdf-loading');if(el){el.remove();}}\
frame.addEventListener('load',settle);\
frame.addEventListener('error',settle);\
})();";
