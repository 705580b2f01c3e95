//! Declarative block types for the printed guide.
//!
//! Blocks carry text plus style identifiers only. Fonts, colours and
//! geometry belong to the presentation adapters in `crate::render`.

use serde::Serialize;

use crate::assets::ImageHandle;
use crate::catalog::{Category, Fact, Severity, TableName, TableRow};
use crate::sections::TocEntry;

/// Paragraph styles the adapters know how to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextStyle {
    Title,
    CoverSubtitle,
    SourceLine,
    CoverText,
    Section,
    Subsection,
    ConditionName,
    Body,
    Caption,
    TocEntry,
    TocSubEntry,
}

/// Header colour family of a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TableStyle {
    Standard,
    Accent,
    Alert,
}

impl TableStyle {
    /// Fact tables of conditions that need action print with the alert header.
    pub fn for_category(category: Category) -> Self {
        match category {
            Category::Infectious | Category::Malignant => TableStyle::Alert,
            Category::Benign | Category::Other => TableStyle::Accent,
        }
    }

    pub fn for_table(name: TableName) -> Self {
        match name {
            TableName::RedFlags => TableStyle::Alert,
            _ => TableStyle::Standard,
        }
    }
}

/// One row of a condition's fact table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FactRow {
    pub label: String,
    pub value: String,
    pub severity: Severity,
}

impl From<&Fact> for FactRow {
    fn from(fact: &Fact) -> Self {
        Self {
            label: fact.label.clone(),
            value: fact.value.clone(),
            severity: fact.severity,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    Cover {
        title: String,
        subtitle: String,
        source_line: String,
        description: String,
        highlight: String,
    },
    TableOfContents {
        heading: String,
        entries: Vec<TocEntry>,
    },
    SectionHeading {
        text: String,
    },
    SubsectionHeading {
        text: String,
    },
    ConditionHeading {
        condition_id: String,
        name: String,
    },
    Paragraph {
        text: String,
        style: TextStyle,
    },
    Callout {
        label: String,
        text: String,
    },
    Image {
        image: ImageHandle,
    },
    Caption {
        text: String,
    },
    FactTable {
        condition_id: String,
        headers: [String; 2],
        rows: Vec<FactRow>,
        style: TableStyle,
    },
    ReferenceTable {
        table: TableName,
        headers: Vec<String>,
        rows: Vec<TableRow>,
        style: TableStyle,
    },
    PageBreak,
}

impl Block {
    /// Short name of the variant, matching the serialised `kind`.
    pub fn kind(&self) -> &'static str {
        match self {
            Block::Cover { .. } => "cover",
            Block::TableOfContents { .. } => "table_of_contents",
            Block::SectionHeading { .. } => "section_heading",
            Block::SubsectionHeading { .. } => "subsection_heading",
            Block::ConditionHeading { .. } => "condition_heading",
            Block::Paragraph { .. } => "paragraph",
            Block::Callout { .. } => "callout",
            Block::Image { .. } => "image",
            Block::Caption { .. } => "caption",
            Block::FactTable { .. } => "fact_table",
            Block::ReferenceTable { .. } => "reference_table",
            Block::PageBreak => "page_break",
        }
    }
}
