// View models for the dashboard templates
//
// Flat, owned structs so the askama templates never reach into catalog
// types. Built by `view_builder`.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub label: &'static str,
    pub href: &'static str,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BannerView {
    pub class: &'static str,
    pub text: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactView {
    pub label: String,
    pub value: String,
    pub warning: bool,
}

impl FactView {
    pub fn css_class(&self) -> &'static str {
        if self.warning {
            "fact-warning"
        } else {
            "fact"
        }
    }
}

/// One condition as shown on a category, search or detail page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionCard {
    pub id: String,
    pub name: String,
    pub category_class: &'static str,
    pub category_title: &'static str,
    pub image_url: Option<String>,
    pub caption: String,
    pub facts: Vec<FactView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupView {
    pub title: Option<String>,
    pub cards: Vec<ConditionCard>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub cells: Vec<String>,
    pub warning: bool,
}

impl RowView {
    pub fn css_class(&self) -> &'static str {
        if self.warning {
            "row-warning"
        } else {
            "row"
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    pub title: String,
    pub headers: Vec<String>,
    pub rows: Vec<RowView>,
    pub alert: bool,
}

/// Lesion morphology row laid out as a card on the overview page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MorphologyCard {
    pub lesion: String,
    pub description: String,
    pub examples: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryListing {
    pub title: &'static str,
    pub count: usize,
    pub names: Vec<String>,
}

/// Content of the search results region (full page and htmx fragment).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResultsView {
    pub query: String,
    pub empty_query: bool,
    pub total_conditions: usize,
    pub listing: Vec<CategoryListing>,
    pub cards: Vec<ConditionCard>,
}

impl SearchResultsView {
    pub fn summary(&self) -> String {
        match self.cards.len() {
            0 => "No matching conditions found".to_string(),
            n => format!("Found {} matching conditions", n),
        }
    }
}
