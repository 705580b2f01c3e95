//! Interactive dashboard
//!
//! Server-rendered askama pages over the same catalog the printed guide
//! uses. Category and overview pages come from `ViewFilter::page`, search
//! from `ViewFilter::search`; htmx swaps the search results fragment in place.

pub mod handlers;
pub mod view_builder;
pub mod view_models;

pub use view_builder::ViewBuilder;
