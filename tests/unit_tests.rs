//! Unit tests for individual components

use std::collections::HashMap;

use axum::http::StatusCode;
use pdf_relay::{
    config::{Config, StorageConfig, DEFAULT_BUCKET},
    error::AppError,
    models::{DocumentId, DownloadFailureDetails, FetchedDocument, GetPdfQuery, GetPdfResponse},
    services::PdfProcessor,
    storage::{encode_key, ObjectStore, SupabaseStorage},
    viewer::{LoadState, PdfViewer},
};

fn config_from(vars: &[(&str, &str)]) -> anyhow::Result<Config> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Config::from_lookup(|name| vars.get(name).cloned())
}

#[test]
fn test_config_defaults() {
    let config = config_from(&[]).unwrap();
    assert_eq!(config.server_host, "0.0.0.0");
    assert_eq!(config.server_port, 8080);
    assert_eq!(config.storage.bucket, DEFAULT_BUCKET);
    assert_eq!(config.storage.timeout_seconds, None);
    assert!(config.storage.url.is_none());
    assert!(matches!(
        config.storage.credentials(),
        Err(AppError::ConfigurationMissing)
    ));
}

#[test]
fn test_config_overrides() {
    let config = config_from(&[
        ("SERVER_HOST", "127.0.0.1"),
        ("SERVER_PORT", "3000"),
        ("SUPABASE_URL", "https://project.supabase.co"),
        ("SUPABASE_ANON_KEY", "anon-key"),
        ("SUPABASE_BUCKET_NAME", "documents"),
        ("STORAGE_TIMEOUT_SECONDS", "15"),
    ])
    .unwrap();

    assert_eq!(config.server_host, "127.0.0.1");
    assert_eq!(config.server_port, 3000);
    assert_eq!(config.storage.bucket, "documents");
    assert_eq!(config.storage.timeout_seconds, Some(15));

    let credentials = config.storage.credentials().unwrap();
    assert_eq!(credentials.url, "https://project.supabase.co");
    assert_eq!(credentials.anon_key, "anon-key");
}

#[test]
fn test_port_env_takes_precedence() {
    let config = config_from(&[("PORT", "9000"), ("SERVER_PORT", "3000")]).unwrap();
    assert_eq!(config.server_port, 9000);

    let config = config_from(&[("PORT", "not-a-port"), ("SERVER_PORT", "3000")]).unwrap();
    assert_eq!(config.server_port, 3000);
}

#[test]
fn test_config_invalid_values() {
    let config = config_from(&[("SERVER_PORT", "abc")]).unwrap();
    assert_eq!(config.server_port, 8080);

    assert!(config_from(&[("SERVER_PORT", "0")]).is_err());
    assert!(config_from(&[("STORAGE_TIMEOUT_SECONDS", "0")]).is_err());
    assert!(config_from(&[("SUPABASE_BUCKET_NAME", "a/b")]).is_err());
}

#[test]
fn test_empty_settings_count_as_missing() {
    let config = config_from(&[
        ("SUPABASE_URL", "https://project.supabase.co"),
        ("SUPABASE_ANON_KEY", "  "),
        ("SUPABASE_BUCKET_NAME", ""),
    ])
    .unwrap();

    assert_eq!(config.storage.bucket, DEFAULT_BUCKET);
    assert!(config.storage.credentials().is_err());
}

#[test]
fn test_storage_config_debug_hides_key() {
    let storage = StorageConfig::new("https://project.supabase.co", "super-secret");
    let debug = format!("{:?}", storage);
    assert!(!debug.contains("super-secret"));
    assert!(debug.contains("<redacted>"));
}

#[test]
fn test_error_codes_and_status() {
    let details = DownloadFailureDetails {
        filename: "a.pdf".to_string(),
        bucket: "pdfs".to_string(),
        available_files: vec![],
    };

    assert_eq!(AppError::missing_parameter("Filename").status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(AppError::ConfigurationMissing.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        AppError::download_failed("gone", details.clone()).status_code(),
        StatusCode::NOT_FOUND
    );
    assert_eq!(AppError::unexpected("boom").status_code(), StatusCode::INTERNAL_SERVER_ERROR);

    assert_eq!(AppError::missing_parameter("Filename").error_code(), "MISSING_PARAMETER");
    assert_eq!(AppError::ConfigurationMissing.error_code(), "CONFIGURATION_MISSING");
    assert_eq!(AppError::download_failed("gone", details).error_code(), "DOWNLOAD_FAILED");
    assert_eq!(AppError::unexpected("boom").error_code(), "UNEXPECTED_ERROR");
}

#[test]
fn test_error_messages() {
    assert_eq!(
        AppError::missing_parameter("Filename").to_string(),
        "Filename parameter is required"
    );
    assert_eq!(AppError::unexpected("boom").to_string(), "boom");
    assert_eq!(AppError::unexpected("").to_string(), "Unknown error occurred");
}

#[test]
fn test_error_body_shapes() {
    let body = serde_json::to_value(AppError::ConfigurationMissing.to_body()).unwrap();
    assert_eq!(
        body,
        serde_json::json!({
            "error": "Supabase configuration missing. Please set SUPABASE_URL and SUPABASE_ANON_KEY in .env"
        })
    );

    let err = AppError::download_failed(
        "Object not found",
        DownloadFailureDetails {
            filename: "x.pdf".to_string(),
            bucket: "pdfs".to_string(),
            available_files: vec!["y.pdf".to_string()],
        },
    );
    let body = serde_json::to_value(err.to_body()).unwrap();
    assert_eq!(body["error"], "Failed to download PDF: Object not found");
    assert_eq!(body["details"]["availableFiles"], serde_json::json!(["y.pdf"]));
}

#[test]
fn test_document_id_normalization() {
    assert_eq!(DocumentId::normalize("report").unwrap().as_str(), "report.pdf");
    assert_eq!(DocumentId::normalize("report.pdf").unwrap().as_str(), "report.pdf");
    assert_eq!(DocumentId::normalize("REPORT.PDF").unwrap().as_str(), "REPORT.PDF");
    assert_eq!(DocumentId::normalize("Notes.Pdf").unwrap().as_str(), "Notes.Pdf");
    assert_eq!(DocumentId::normalize("archive.pdf.zip").unwrap().as_str(), "archive.pdf.zip.pdf");
    assert_eq!(DocumentId::normalize("dir/file").unwrap().as_str(), "dir/file.pdf");
    assert!(DocumentId::normalize("").is_none());
}

#[test]
fn test_query_takes_first_filename() {
    let pairs = |items: &[(&str, &str)]| {
        GetPdfQuery::new(
            items
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    };

    assert_eq!(pairs(&[("filename", "a"), ("filename", "b")]).filename(), Some("a"));
    assert_eq!(pairs(&[("other", "x"), ("filename", "b")]).filename(), Some("b"));
    assert_eq!(pairs(&[("filename", ""), ("filename", "b")]).filename(), None);
    assert_eq!(pairs(&[]).filename(), None);
}

#[test]
fn test_success_response_serialization() {
    let doc = FetchedDocument {
        filename: DocumentId::normalize("report").unwrap(),
        url: "https://x/report.pdf".to_string(),
        text: "hello".to_string(),
        page_count: 2,
    };
    let body = serde_json::to_value(GetPdfResponse::from(doc)).unwrap();
    assert_eq!(
        body,
        serde_json::json!({
            "success": true,
            "filename": "report.pdf",
            "pdfUrl": "https://x/report.pdf",
            "extractedText": "hello",
            "totalPages": 2
        })
    );
}

#[test]
fn test_key_encoding() {
    assert_eq!(encode_key("report.pdf"), "report.pdf");
    assert_eq!(encode_key("my file.pdf"), "my%20file.pdf");
    assert_eq!(encode_key("dir/sub dir/a#1.pdf"), "dir/sub%20dir/a%231.pdf");
}

#[test]
fn test_supabase_public_url() {
    let storage = SupabaseStorage::from_config(
        &StorageConfig::new("https://project.supabase.co/", "anon-key").with_bucket("docs"),
    )
    .unwrap();

    assert_eq!(
        storage.public_url("docs", "my file.pdf"),
        "https://project.supabase.co/storage/v1/object/public/docs/my%20file.pdf"
    );
}

#[test]
fn test_supabase_requires_credentials() {
    let storage = StorageConfig {
        url: Some("https://project.supabase.co".to_string()),
        ..StorageConfig::default()
    };
    assert!(matches!(
        SupabaseStorage::from_config(&storage),
        Err(AppError::ConfigurationMissing)
    ));
}

#[test]
fn test_pdf_processor_rejects_garbage() {
    assert!(PdfProcessor::extract_blocking(b"definitely not a pdf").is_err());
    assert!(PdfProcessor::extract_blocking(&[]).is_err());
}

#[test]
fn test_load_state_transitions() {
    let state = LoadState::default();
    assert!(state.is_loading());

    let loaded = state.settle(false);
    assert_eq!(loaded, LoadState::Settled { failed: false });
    assert!(!loaded.is_loading());

    // Settled is terminal.
    assert_eq!(loaded.settle(true), LoadState::Settled { failed: false });
    assert_eq!(
        LoadState::Loading.settle(true).settle(false),
        LoadState::Settled { failed: true }
    );
}

#[test]
fn test_viewer_hides_spinner_once_settled() {
    let mut viewer = PdfViewer::new("https://x/a.pdf", "", "a.pdf");
    assert!(viewer.render().contains("Loading PDF..."));

    viewer.on_error();
    assert_eq!(viewer.state(), LoadState::Settled { failed: true });
    let html = viewer.render();
    assert!(!html.contains("Loading PDF..."));
    assert!(html.contains("<iframe"));
    assert!(html.contains("Download PDF"));
    assert!(html.contains("Open in New Tab"));

    viewer.on_load();
    assert_eq!(viewer.state(), LoadState::Settled { failed: true });
}

#[test]
fn test_viewer_escapes_values() {
    let viewer = PdfViewer::new(
        "https://x/a.pdf?x=\"1\"",
        "<script>alert(1)</script>",
        "a<b>.pdf",
    );
    let html = viewer.render_page();

    assert!(!html.contains("<script>alert(1)</script>"));
    assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    assert!(html.contains("https://x/a.pdf?x=&quot;1&quot;"));
    assert!(html.contains("<title>a&lt;b&gt;.pdf</title>"));
    assert!(html.contains("rel=\"noopener noreferrer\""));
}

#[test]
fn test_viewer_omits_empty_paragraph() {
    let html = PdfViewer::new("https://x/a.pdf", "", "a.pdf").render();
    assert!(!html.contains("pdf-text"));

    let html = PdfViewer::new("https://x/a.pdf", "Summary", "a.pdf").render();
    assert!(html.contains("<p>Summary</p>"));
}
