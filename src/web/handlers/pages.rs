// Page handlers for HTML rendering with Askama

use askama::Template;
use axum::extract::{Path, Query, State};
use axum::response::Html;
use axum_htmx::HxRequest;
use serde::Deserialize;

use crate::api_server::{AppError, AppState};
use crate::sections::{NavPage, CRITICAL_POINT_LABEL, OVERVIEW_INTRO};
use crate::view::PageView;
use crate::web::view_builder::ViewBuilder;
use crate::web::view_models::{
    BannerView, ConditionCard, GroupView, MorphologyCard, NavLink, SearchResultsView, TableView,
};

const SITE_TITLE: &str = "Neonatal Dermatology Study Guide";

fn page_title(heading: &str) -> String {
    format!("{} | {}", heading, SITE_TITLE)
}

fn render(template: &impl Template) -> Result<Html<String>, AppError> {
    Ok(Html(template.render()?))
}

fn unexpected(page: NavPage) -> AppError {
    AppError::Internal(format!("page '{}' resolved to the wrong view", page.label()))
}

// ============================================================================
// Overview
// ============================================================================

#[derive(Template)]
#[template(path = "pages/overview.html")]
pub struct OverviewTemplate {
    pub title: String,
    pub nav: Vec<NavLink>,
    pub heading: &'static str,
    pub intro: &'static str,
    pub questions: TableView,
    pub morphology: Vec<MorphologyCard>,
    pub critical_label: &'static str,
    pub critical_point: &'static str,
}

pub async fn overview_page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let page = NavPage::Overview;
    let PageView::Overview { questions, morphology, critical_point } = state.filter().page(page)?
    else {
        return Err(unexpected(page));
    };

    render(&OverviewTemplate {
        title: page_title(page.heading()),
        nav: ViewBuilder::nav(page),
        heading: page.heading(),
        intro: OVERVIEW_INTRO,
        questions: ViewBuilder::table(questions),
        morphology: ViewBuilder::morphology_cards(morphology),
        critical_label: CRITICAL_POINT_LABEL,
        critical_point,
    })
}

// ============================================================================
// Category pages
// ============================================================================

#[derive(Template)]
#[template(path = "pages/category.html")]
pub struct CategoryTemplate {
    pub title: String,
    pub nav: Vec<NavLink>,
    pub heading: &'static str,
    pub banner: Option<BannerView>,
    pub category_class: &'static str,
    pub groups: Vec<GroupView>,
}

fn conditions_page(state: &AppState, page: NavPage) -> Result<Html<String>, AppError> {
    let PageView::Conditions { category, groups } = state.filter().page(page)? else {
        return Err(unexpected(page));
    };

    let builder = ViewBuilder::new(&state.images);
    render(&CategoryTemplate {
        title: page_title(page.heading()),
        nav: ViewBuilder::nav(page),
        heading: page.heading(),
        banner: ViewBuilder::banner(page),
        category_class: category.css_class(),
        groups: builder.groups(&groups),
    })
}

pub async fn benign_page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    conditions_page(&state, NavPage::Benign)
}

pub async fn infectious_page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    conditions_page(&state, NavPage::Infectious)
}

pub async fn other_page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    conditions_page(&state, NavPage::Other)
}

pub async fn malignant_page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    conditions_page(&state, NavPage::Malignant)
}

// ============================================================================
// Quick reference
// ============================================================================

#[derive(Template)]
#[template(path = "pages/quick_reference.html")]
pub struct QuickReferenceTemplate {
    pub title: String,
    pub nav: Vec<NavLink>,
    pub heading: &'static str,
    pub pearls: TableView,
    pub red_flags: TableView,
    pub lab_tests: TableView,
    pub treatments: TableView,
}

pub async fn quick_reference_page(
    State(state): State<AppState>,
) -> Result<Html<String>, AppError> {
    let page = NavPage::QuickReference;
    let PageView::QuickReference { pearls, red_flags, lab_tests, treatments } =
        state.filter().page(page)?
    else {
        return Err(unexpected(page));
    };

    render(&QuickReferenceTemplate {
        title: page_title(page.heading()),
        nav: ViewBuilder::nav(page),
        heading: page.heading(),
        pearls: ViewBuilder::table(pearls),
        red_flags: ViewBuilder::table(red_flags),
        lab_tests: ViewBuilder::table(lab_tests),
        treatments: ViewBuilder::table(treatments),
    })
}

// ============================================================================
// Search
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

#[derive(Template)]
#[template(path = "pages/search.html")]
pub struct SearchTemplate {
    pub title: String,
    pub nav: Vec<NavLink>,
    pub heading: &'static str,
    pub results: SearchResultsView,
}

#[derive(Template)]
#[template(path = "partials/search_results.html")]
pub struct SearchResultsTemplate {
    pub results: SearchResultsView,
}

fn search_results(state: &AppState, query: &str) -> SearchResultsView {
    ViewBuilder::new(&state.images).search_results(&state.filter(), query)
}

/// Full page, or only the results fragment when htmx asks.
pub async fn search_page(
    State(state): State<AppState>,
    HxRequest(is_htmx): HxRequest,
    Query(params): Query<SearchParams>,
) -> Result<Html<String>, AppError> {
    let results = search_results(&state, &params.q);
    if is_htmx {
        return render(&SearchResultsTemplate { results });
    }

    let page = NavPage::Search;
    render(&SearchTemplate {
        title: page_title(page.heading()),
        nav: ViewBuilder::nav(page),
        heading: page.heading(),
        results,
    })
}

pub async fn search_results_fragment(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Html<String>, AppError> {
    render(&SearchResultsTemplate { results: search_results(&state, &params.q) })
}

// ============================================================================
// Condition detail
// ============================================================================

#[derive(Template)]
#[template(path = "pages/condition.html")]
pub struct ConditionTemplate {
    pub title: String,
    pub nav: Vec<NavLink>,
    pub back_href: &'static str,
    pub back_label: &'static str,
    pub card: ConditionCard,
}

pub async fn condition_page(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    let condition = state.catalog.condition(&id)?;
    let page = NavPage::ALL
        .into_iter()
        .find(|p| p.category() == Some(condition.category))
        .unwrap_or(NavPage::Search);

    render(&ConditionTemplate {
        title: page_title(&condition.name),
        nav: ViewBuilder::nav(page),
        back_href: page.path(),
        back_label: page.label(),
        card: ViewBuilder::new(&state.images).card(condition),
    })
}

// ============================================================================
// Printable guide
// ============================================================================

#[derive(Template)]
#[template(path = "pages/guide.html")]
pub struct GuideTemplate {
    pub title: String,
    pub nav: Vec<NavLink>,
    pub body: String,
}

/// The document plan as HTML, prepared once at startup.
pub async fn guide_page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    render(&GuideTemplate {
        title: page_title("Printable Guide"),
        nav: ViewBuilder::nav(NavPage::Overview)
            .into_iter()
            .map(|link| NavLink { active: false, ..link })
            .collect(),
        body: state.guide_html.to_string(),
    })
}
