// Axum server for the study guide dashboard
//
// HTML pages (askama + htmx) and a small JSON API over one immutable
// catalog. Everything in AppState is built once at startup and shared
// read-only between requests.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use pulldown_cmark::{html, Options, Parser};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::assets::{DirImageLoader, NullLoader};
use crate::catalog::{Catalog, Category, TableName};
use crate::config::{DocumentConfig, ServerConfig};
use crate::error::GuideError;
use crate::plan::RenderPlanBuilder;
use crate::render::MarkdownFormatter;
use crate::search_index::SearchIndex;
use crate::view::{SearchOutcome, ViewFilter};
use crate::web::handlers::pages;
use crate::web::view_builder::IMAGE_ROUTE;

// ============================================================================
// Application State
// ============================================================================

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub search_index: Arc<SearchIndex>,
    pub images: Arc<DirImageLoader>,
    pub document: Arc<DocumentConfig>,
    /// `/guide` body: the document plan through Markdown and pulldown-cmark.
    pub guide_html: Arc<str>,
}

impl AppState {
    pub fn new(server: &ServerConfig, document: DocumentConfig) -> anyhow::Result<Self> {
        tracing::info!("Loading content catalog...");
        let catalog = Catalog::neonatal()?;

        tracing::info!("Building search index...");
        let search_index = SearchIndex::build(&catalog);

        let images = DirImageLoader::new(&server.image_dir);
        if !images.root().is_dir() {
            tracing::warn!(
                "Image directory {} not found; conditions will be shown without photographs",
                images.root().display()
            );
        }

        tracing::info!("Rendering printable guide...");
        let guide_html = guide_html(&catalog, &document, &images)?;

        Ok(Self {
            catalog: Arc::new(catalog),
            search_index: Arc::new(search_index),
            images: Arc::new(images),
            document: Arc::new(document),
            guide_html: Arc::from(guide_html),
        })
    }

    pub fn filter(&self) -> ViewFilter<'_> {
        ViewFilter::new(&self.catalog, &self.search_index)
    }
}

fn guide_html(
    catalog: &Catalog,
    document: &DocumentConfig,
    images: &DirImageLoader,
) -> crate::error::Result<String> {
    let plan = RenderPlanBuilder::new(catalog, document, images).build()?;
    let markdown = MarkdownFormatter::new(IMAGE_ROUTE).body_only().format(&plan)?;

    let mut out = String::with_capacity(markdown.len() * 2);
    html::push_html(&mut out, Parser::new_ext(&markdown, Options::ENABLE_TABLES));
    Ok(out)
}

// ============================================================================
// Router
// ============================================================================

pub fn create_router(state: AppState) -> Router {
    let images = ServeDir::new(state.images.root());

    Router::new()
        // Health check
        .route("/health", get(health_check))

        // Dashboard pages (HTML)
        .route("/", get(pages::overview_page))
        .route("/benign", get(pages::benign_page))
        .route("/infectious", get(pages::infectious_page))
        .route("/other", get(pages::other_page))
        .route("/malignant", get(pages::malignant_page))
        .route("/quick-reference", get(pages::quick_reference_page))
        .route("/search", get(pages::search_page))
        .route("/search/results", get(pages::search_results_fragment))
        .route("/conditions/:id", get(pages::condition_page))
        .route("/guide", get(pages::guide_page))

        // Content endpoints (JSON)
        .route("/api/conditions", get(list_conditions))
        .route("/api/conditions/:id", get(get_condition))
        .route("/api/categories/:slug", get(get_category))
        .route("/api/tables/:name", get(get_table))
        .route("/api/search", get(search_conditions))
        .route("/api/plan", get(get_plan))

        // Photographs
        .nest_service(IMAGE_ROUTE, images)

        // Middleware (applied in reverse order)
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ============================================================================
// Endpoint Handlers
// ============================================================================

async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "conditions": state.catalog.len(),
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

async fn list_conditions(State(state): State<AppState>) -> Json<serde_json::Value> {
    let counts: serde_json::Map<String, serde_json::Value> = state
        .catalog
        .category_counts()
        .into_iter()
        .map(|(category, n)| (category.key().to_string(), n.into()))
        .collect();

    Json(serde_json::json!({
        "count": state.catalog.len(),
        "by_category": counts,
        "conditions": state.catalog.all_conditions(),
    }))
}

async fn get_condition(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let condition = state.catalog.condition(&id)?;
    Ok(Json(serde_json::to_value(condition)?))
}

async fn get_category(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let category: Category = slug.parse()?;
    let conditions = state.filter().by_category(category);

    Ok(Json(serde_json::json!({
        "category": category,
        "title": category.title(),
        "count": conditions.len(),
        "conditions": conditions,
    })))
}

async fn get_table(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let name: TableName = name.parse()?;
    let table = state.catalog.table(name)?;
    Ok(Json(serde_json::to_value(table)?))
}

#[derive(Debug, Default, Deserialize)]
struct SearchParams {
    #[serde(default)]
    q: String,
}

async fn search_conditions(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Json<serde_json::Value> {
    let start = std::time::Instant::now();
    let filter = state.filter();

    let body = match filter.search(&params.q) {
        SearchOutcome::EmptyQuery => serde_json::json!({ "state": "empty_query" }),
        SearchOutcome::Results(hits) => serde_json::json!({
            "state": "results",
            "count": hits.len(),
            "results": hits,
        }),
    };

    tracing::debug!("Search '{}' answered in {:?}", params.q, start.elapsed());
    Json(body)
}

/// The document plan without image payloads.
async fn get_plan(State(state): State<AppState>) -> Result<Json<serde_json::Value>, AppError> {
    let plan = RenderPlanBuilder::new(&state.catalog, &state.document, &NullLoader).build()?;
    Ok(Json(serde_json::to_value(&plan)?))
}

// ============================================================================
// Error Handling
// ============================================================================

#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    Internal(String),
}

impl From<GuideError> for AppError {
    fn from(e: GuideError) -> Self {
        if e.is_invalid_key() {
            AppError::NotFound(e.to_string())
        } else {
            AppError::Internal(e.to_string())
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Internal(e.to_string())
    }
}

impl From<askama::Error> for AppError {
    fn from(e: askama::Error) -> Self {
        AppError::Internal(format!("template error: {}", e))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Internal(msg) => {
                tracing::error!("{}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        let body = Json(serde_json::json!({
            "error": message
        }));

        (status, body).into_response()
    }
}
