//! Shared data types for the content catalog.
//!
//! Everything here is leaf data: conditions, their facts, and the flat
//! reference tables. Construction and validation live in `catalog::Catalog`.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::GuideError;

// ============================================================================
// Category
// ============================================================================

/// Top-level grouping of conditions. Declaration order is catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Benign,
    Infectious,
    Other,
    Malignant,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Benign,
        Category::Infectious,
        Category::Other,
        Category::Malignant,
    ];

    /// Lowercase key used in URLs and JSON.
    pub fn key(&self) -> &'static str {
        match self {
            Category::Benign => "benign",
            Category::Infectious => "infectious",
            Category::Other => "other",
            Category::Malignant => "malignant",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Category::Benign => "Benign",
            Category::Infectious => "Infectious",
            Category::Other => "Other",
            Category::Malignant => "Malignant",
        }
    }

    /// Card style class for the dashboard. "Other" conditions render as serious.
    pub fn css_class(&self) -> &'static str {
        match self {
            Category::Benign => "benign",
            Category::Infectious => "infectious",
            Category::Other => "serious",
            Category::Malignant => "malignant",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl FromStr for Category {
    type Err = GuideError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| GuideError::invalid_key("category", s))
    }
}

// ============================================================================
// Facts and conditions
// ============================================================================

/// Presentation hint carried next to a fact value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    #[default]
    Normal,
    Warning,
}

/// One labelled attribute of a condition ("Appearance", "Treatment", ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fact {
    pub label: String,
    pub value: String,
    pub severity: Severity,
}

impl Fact {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            severity: Severity::Normal,
        }
    }

    pub fn warning(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            ..Self::new(label, value)
        }
    }

    pub fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }
}

/// One dermatologic entry in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Condition {
    pub id: String,
    pub name: String,
    pub category: Category,
    /// Logical image identifier, resolved by an `ImageLoader`.
    pub image_ref: String,
    pub figure_label: String, // "Figure 7"
    pub caption: String,
    pub facts: Vec<Fact>,
}

impl Condition {
    /// Full caption line as printed under the figure.
    pub fn figure_caption(&self) -> String {
        format!("{}: {}", self.figure_label, self.caption)
    }

    /// Number parsed out of "Figure N".
    pub fn figure_number(&self) -> Option<u32> {
        self.figure_label
            .strip_prefix("Figure ")
            .and_then(|n| n.trim().parse().ok())
    }
}

// ============================================================================
// Reference tables
// ============================================================================

/// Closed set of flat reference tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TableName {
    DiagnosticQuestions,
    LesionMorphology,
    LabTests,
    Treatments,
    ClinicalPearls,
    RedFlags,
}

impl TableName {
    pub const ALL: [TableName; 6] = [
        TableName::DiagnosticQuestions,
        TableName::LesionMorphology,
        TableName::LabTests,
        TableName::Treatments,
        TableName::ClinicalPearls,
        TableName::RedFlags,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            TableName::DiagnosticQuestions => "diagnostic_questions",
            TableName::LesionMorphology => "lesion_morphology",
            TableName::LabTests => "lab_tests",
            TableName::Treatments => "treatments",
            TableName::ClinicalPearls => "clinical_pearls",
            TableName::RedFlags => "red_flags",
        }
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for TableName {
    type Err = GuideError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace('-', "_");
        TableName::ALL
            .into_iter()
            .find(|t| t.key().eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| GuideError::invalid_key("table", s))
    }
}

/// One row of a reference table. A `Warning` row is emphasised the same
/// way as a warning fact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableRow {
    pub cells: Vec<String>,
    pub severity: Severity,
}

impl TableRow {
    pub fn new<S: Into<String>>(cells: impl IntoIterator<Item = S>) -> Self {
        Self {
            cells: cells.into_iter().map(Into::into).collect(),
            severity: Severity::Normal,
        }
    }

    pub fn warning<S: Into<String>>(cells: impl IntoIterator<Item = S>) -> Self {
        Self {
            severity: Severity::Warning,
            ..Self::new(cells)
        }
    }

    pub fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }
}

/// Flat, insertion-ordered table of fixed-arity rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReferenceTable {
    pub name: TableName,
    pub title: String,
    pub headers: Vec<String>,
    pub rows: Vec<TableRow>,
}

impl ReferenceTable {
    pub fn arity(&self) -> usize {
        self.headers.len()
    }

    /// Column `index` of every row, top to bottom.
    pub fn column(&self, index: usize) -> impl Iterator<Item = &str> {
        self.rows.iter().filter_map(move |r| r.cells.get(index).map(String::as_str))
    }
}
