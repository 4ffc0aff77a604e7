use axum::{
    extract::{Query, State},
    response::Html,
};

use crate::error::{AppError, AppResult};
use crate::models::GetPdfQuery;
use crate::state::AppState;
use crate::viewer::PdfViewer;

/// `GET /viewer?filename=...` renders the embedded viewer page.
pub async fn viewer_handler(
    State(state): State<AppState>,
    Query(query): Query<GetPdfQuery>,
) -> AppResult<Html<String>> {
    let filename = query
        .filename()
        .ok_or_else(|| AppError::missing_parameter("Filename"))?;

    let document = state.fetcher.fetch_and_extract(filename).await?;

    Ok(Html(PdfViewer::from(&document).render_page()))
}
