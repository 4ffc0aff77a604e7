use axum::{
    extract::{Query, State},
    response::Json,
};
use std::time::Instant;
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::models::{GetPdfQuery, GetPdfResponse};
use crate::state::AppState;

/// `GET /api/get-pdf?filename=...`
pub async fn get_pdf_handler(
    State(state): State<AppState>,
    Query(query): Query<GetPdfQuery>,
) -> AppResult<Json<GetPdfResponse>> {
    let start = Instant::now();

    let filename = query
        .filename()
        .ok_or_else(|| AppError::missing_parameter("Filename"))?;

    let document = state.fetcher.fetch_and_extract(filename).await?;

    info!(
        filename = %document.filename,
        pages = document.page_count,
        total_time_ms = start.elapsed().as_millis() as u64,
        "Request completed successfully"
    );

    Ok(Json(GetPdfResponse::from(document)))
}
