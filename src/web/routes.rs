use std::sync::Arc;

use askama::Template;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::errors::FolioError;
use crate::resolver::Resolver;
use crate::types::*;

use super::pages::*;

/// Shared state for all request handlers.
pub struct AppState {
    pub resolver: Resolver,
    pub site_title: String,
}

type SharedState = Arc<AppState>;

/// Builds the application router.
///
/// The `/api` subtree mirrors the HTML routes and is served with permissive
/// cross-origin headers so external readers can consume the JSON directly.
pub fn router(state: SharedState) -> Router {
    let api = Router::new()
        .route("/", get(api_tags))
        .route("/tag/:tag", get(api_tag))
        .route("/browse", get(api_browse))
        .route("/search", get(api_search))
        .layer(CorsLayer::permissive());

    Router::new()
        .route("/", get(show_tags))
        .route("/tag/:tag", get(show_tag))
        .route("/browse", get(show_browse))
        .route("/search", get(show_search))
        .nest("/api/", api)
        .fallback(fallback_not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Query parameters for the search endpoints.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

// ---------------------------------------------------------------------------
// Error mapping
// ---------------------------------------------------------------------------

fn status_for(err: &FolioError) -> StatusCode {
    match err {
        FolioError::NotFound { .. } => StatusCode::NOT_FOUND,
        FolioError::BadRequest { .. } => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Error wrapper for the JSON API: failures become `{"error": ...}` bodies.
pub struct ApiError(FolioError);

impl From<FolioError> for ApiError {
    fn from(err: FolioError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_for(&self.0);
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self.0, "api request failed");
        }
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

/// Error wrapper for the HTML pages: unknown tags render the 404 page,
/// everything else a plain status.
pub struct PageError(FolioError);

impl From<FolioError> for PageError {
    fn from(err: FolioError) -> Self {
        PageError(err)
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let status = status_for(&self.0);
        if status == StatusCode::NOT_FOUND {
            return not_found_response();
        }
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self.0, "page request failed");
        }
        (status, self.0.to_string()).into_response()
    }
}

fn not_found_response() -> Response {
    let page = NotFoundPage {
        title: "Not found".to_string(),
    };
    match page.render() {
        Ok(body) => (StatusCode::NOT_FOUND, Html(body)).into_response(),
        Err(_) => (StatusCode::NOT_FOUND, "not found").into_response(),
    }
}

fn render<T: Template>(page: T) -> Result<Html<String>, FolioError> {
    Ok(Html(page.render()?))
}

// ---------------------------------------------------------------------------
// HTML handlers
// ---------------------------------------------------------------------------

async fn show_tags(State(state): State<SharedState>) -> Result<Html<String>, PageError> {
    let tags = state.resolver.all_tags()?;
    Ok(render(TagsPage {
        title: state.site_title.clone(),
        tags,
    })?)
}

async fn show_tag(
    State(state): State<SharedState>,
    Path(tag): Path<String>,
) -> Result<Html<String>, PageError> {
    match state.resolver.resolve(&tag)? {
        TagPage::Chapter(view) => Ok(render(ChapterPage {
            title: state.site_title.clone(),
            chapter: view.chapter,
            sections: view.sections,
        })?),
        TagPage::Tag(view) => Ok(render(TagPageHtml {
            title: state.site_title.clone(),
            tag: view.tag,
            breadcrumb: view.breadcrumb,
            proofs: view.proofs,
            extras: view.extras,
        })?),
    }
}

async fn show_browse(State(state): State<SharedState>) -> Result<Html<String>, PageError> {
    let chapters = state.resolver.chapters()?;
    Ok(render(ChaptersPage {
        title: state.site_title.clone(),
        chapters,
    })?)
}

async fn show_search(
    State(state): State<SharedState>,
    Query(params): Query<SearchParams>,
) -> Result<Html<String>, PageError> {
    let results = state.resolver.search(&params.q)?;
    Ok(render(SearchPage {
        title: state.site_title.clone(),
        query: params.q,
        results,
    })?)
}

async fn fallback_not_found() -> Response {
    not_found_response()
}

// ---------------------------------------------------------------------------
// JSON API handlers
// ---------------------------------------------------------------------------

async fn api_tags(State(state): State<SharedState>) -> Result<Json<serde_json::Value>, ApiError> {
    let tags = state.resolver.all_tags()?;
    let summaries: Vec<TagSummary> = tags.iter().map(TagSummary::from).collect();
    Ok(Json(json!({ "tags": summaries })))
}

async fn api_tag(
    State(state): State<SharedState>,
    Path(tag): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    match state.resolver.resolve(&tag)? {
        TagPage::Chapter(view) => {
            let sections: Vec<TagSummary> = view
                .sections
                .iter()
                .map(|s| TagSummary::from(&s.section))
                .collect();
            Ok(Json(json!({
                "type": "chapter",
                "chapter": TagSummary::from(&view.chapter),
                "sections": sections,
            })))
        }
        TagPage::Tag(view) => {
            let breadcrumb: Vec<TagSummary> =
                view.breadcrumb.iter().map(TagSummary::from).collect();
            let proofs: Vec<TagSummary> = view.proofs.iter().map(TagSummary::from).collect();
            Ok(Json(json!({
                "type": "tag",
                "tag": TagSummary::from(&view.tag),
                "breadcrumb": breadcrumb,
                "proofs": proofs,
            })))
        }
    }
}

async fn api_browse(State(state): State<SharedState>) -> Result<Json<serde_json::Value>, ApiError> {
    let chapters = state.resolver.chapters()?;
    let summaries: Vec<TagSummary> = chapters.iter().map(TagSummary::from).collect();
    Ok(Json(json!({ "chapters": summaries })))
}

async fn api_search(
    State(state): State<SharedState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let hits = state.resolver.search(&params.q)?;
    let summaries: Vec<TagSummary> = hits.iter().map(TagSummary::from).collect();
    Ok(Json(json!({ "results": summaries })))
}
