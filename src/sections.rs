//! Declared document and dashboard structure
//!
//! The printed guide and the dashboard group the same conditions differently.
//! Both groupings are written out here as tables rather than derived from
//! `Category`:
//!
//! - `DOCUMENT_SECTIONS` / `TABLE_OF_CONTENTS`: the printed guide, in order.
//!   The contents list is hand-written and intentionally does not mirror the
//!   body headings word for word ("5. Birthmarks and Pigmentation Disorders"
//!   vs "5. Birthmarks and Vascular Lesions", a 4.3 entry with no body).
//! - `NavPage`: dashboard pages, their banners and condition groups.
//!
//! Conditions are referenced by id and resolved against the catalog at
//! build time, so an unknown id surfaces as `InvalidKey`.

use serde::Serialize;

use crate::catalog::{Category, TableName};

use SectionPart::{Conditions, PageBreak, Subsection, Table};

// ============================================================================
// Shared copy
// ============================================================================

pub const OVERVIEW_INTRO: &str = "A rash is any change of skin that affects its color, appearance, or texture. \
While the majority of rashes in newborns are benign and require no treatment, certain rashes require a \
thorough workup and intervention. The key to diagnosis lies in careful characterization of the lesion \
morphology and clinical context.";

pub const CRITICAL_POINT_LABEL: &str = "Critical Point:";

pub const CRITICAL_POINT: &str = "Acyclovir is recommended early in cases of infants with a vesicular skin \
rash, even if the diagnosis of herpes is not confirmed. Early treatment significantly improves outcomes.";

pub const COVER_DESCRIPTION: &str =
    "A comprehensive guide for identifying, differentiating, and managing dermatologic conditions in newborns";

// ============================================================================
// Printed document
// ============================================================================

/// One step inside a document section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SectionPart {
    Paragraph(&'static str),
    Subsection(&'static str),
    /// Condition entries by id, in print order.
    Conditions(&'static [&'static str]),
    Table(TableName),
    Callout { label: &'static str, text: &'static str },
    PageBreak,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DocumentSection {
    pub heading: &'static str,
    pub page_break_before: bool,
    pub parts: &'static [SectionPart],
}

impl DocumentSection {
    /// Condition ids in print order.
    pub fn condition_ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.parts
            .iter()
            .filter_map(|part| match part {
                SectionPart::Conditions(ids) => Some(*ids),
                _ => None,
            })
            .flatten()
            .copied()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TocEntry {
    pub text: &'static str,
    pub level: u8,
}

const fn toc(text: &'static str) -> TocEntry {
    TocEntry { text, level: 1 }
}

const fn toc_sub(text: &'static str) -> TocEntry {
    TocEntry { text, level: 2 }
}

pub static TABLE_OF_CONTENTS: &[TocEntry] = &[
    toc("1. Overview and Diagnostic Approach"),
    toc_sub("1.1 Key Diagnostic Questions"),
    toc_sub("1.2 Lesion Morphology Classification"),
    toc("2. Benign Skin Disorders (No Treatment Required)"),
    toc_sub("2.1 Most Common Benign Rashes - With Photos"),
    toc_sub("2.2 Vascular and Pigmented Lesions - With Photos"),
    toc("3. Infectious Causes of Rashes - With Photos"),
    toc_sub("3.1 Bacterial Infections"),
    toc_sub("3.2 Viral Infections"),
    toc_sub("3.3 Fungal Infections"),
    toc("4. Rashes by Clinical Presentation - With Photos"),
    toc_sub("4.1 Scaling Rashes"),
    toc_sub("4.2 Blistering and Bullous Rashes"),
    toc_sub("4.3 Petechiae and Purpura"),
    toc("5. Birthmarks and Pigmentation Disorders - With Photos"),
    toc("6. Malignant Transformation Risk - With Photos"),
    toc("7. Diagnostic Workup"),
    toc("8. Treatment Summary"),
    toc("9. Quick Reference Tables"),
];

pub static DOCUMENT_SECTIONS: &[DocumentSection] = &[
    DocumentSection {
        heading: "1. Overview and Diagnostic Approach",
        page_break_before: true,
        parts: &[
            SectionPart::Paragraph(OVERVIEW_INTRO),
            Subsection("1.1 Key Diagnostic Questions"),
            Table(TableName::DiagnosticQuestions),
            Subsection("1.2 Lesion Morphology Classification"),
            Table(TableName::LesionMorphology),
        ],
    },
    DocumentSection {
        heading: "2. Benign Skin Disorders (No Treatment Required)",
        page_break_before: true,
        parts: &[
            Subsection("2.1 Most Common Benign Rashes"),
            Conditions(&["aplasia-cutis", "erythema-toxicum", "pustular-melanosis"]),
            PageBreak,
            Conditions(&["milia", "acropustulosis", "neonatal-acne"]),
            PageBreak,
            Conditions(&["fat-necrosis"]),
            Subsection("2.2 Vascular and Pigmented Lesions"),
            Conditions(&["mongolian-spots"]),
        ],
    },
    DocumentSection {
        heading: "3. Infectious Causes of Rashes",
        page_break_before: true,
        parts: &[
            Subsection("3.1 Bacterial Infections"),
            Conditions(&["ssss"]),
            Subsection("3.2 Viral Infections"),
            Conditions(&["hsv", "varicella"]),
            PageBreak,
            Subsection("3.3 Fungal Infections"),
            Conditions(&["candidiasis"]),
        ],
    },
    DocumentSection {
        heading: "4. Rashes by Clinical Presentation",
        page_break_before: false,
        parts: &[
            Subsection("4.1 Scaling Rashes"),
            Conditions(&["lamellar-ichthyosis"]),
            PageBreak,
            Conditions(&["neonatal-lupus"]),
            Subsection("4.2 Blistering and Bullous Rashes"),
            Conditions(&["epidermolysis-bullosa", "incontinentia-pigmenti"]),
        ],
    },
    DocumentSection {
        heading: "5. Birthmarks and Vascular Lesions",
        page_break_before: true,
        parts: &[Conditions(&["port-wine-stain", "blueberry-muffin"])],
    },
    DocumentSection {
        heading: "6. Malignant Transformation Risk",
        page_break_before: false,
        parts: &[
            Conditions(&["melanocytic-nevus"]),
            PageBreak,
            Conditions(&["giant-nevus", "sebaceous-nevus"]),
        ],
    },
    DocumentSection {
        heading: "7. Diagnostic Workup",
        page_break_before: true,
        parts: &[
            Subsection("7.1 Laboratory Studies"),
            Table(TableName::LabTests),
        ],
    },
    DocumentSection {
        heading: "8. Treatment Summary",
        page_break_before: false,
        parts: &[
            Table(TableName::Treatments),
            SectionPart::Callout { label: CRITICAL_POINT_LABEL, text: CRITICAL_POINT },
        ],
    },
    DocumentSection {
        heading: "9. Quick Reference Tables",
        page_break_before: true,
        parts: &[
            Subsection("9.1 Clinical Pearls"),
            Table(TableName::ClinicalPearls),
            Subsection("9.2 Red Flags Requiring Immediate Action"),
            Table(TableName::RedFlags),
        ],
    },
];

// ============================================================================
// Dashboard navigation
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BannerTone {
    Info,
    Error,
    Warning,
}

impl BannerTone {
    pub fn css_class(&self) -> &'static str {
        match self {
            BannerTone::Info => "banner-info",
            BannerTone::Error => "banner-error",
            BannerTone::Warning => "banner-warning",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Banner {
    pub tone: BannerTone,
    pub text: &'static str,
}

/// Which conditions a navigation group shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupMembers {
    Category(Category),
    Ids(&'static [&'static str]),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavGroup {
    pub title: Option<&'static str>,
    pub members: GroupMembers,
}

/// Fixed primary navigation of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NavPage {
    Overview,
    Benign,
    Infectious,
    Other,
    Malignant,
    QuickReference,
    Search,
}

static BENIGN_GROUPS: &[NavGroup] = &[NavGroup {
    title: None,
    members: GroupMembers::Category(Category::Benign),
}];

static INFECTIOUS_GROUPS: &[NavGroup] = &[NavGroup {
    title: None,
    members: GroupMembers::Category(Category::Infectious),
}];

static OTHER_GROUPS: &[NavGroup] = &[
    NavGroup {
        title: Some("Scaling & Blistering Rashes"),
        members: GroupMembers::Ids(&[
            "lamellar-ichthyosis",
            "neonatal-lupus",
            "epidermolysis-bullosa",
            "incontinentia-pigmenti",
        ]),
    },
    NavGroup {
        title: Some("Vascular Birthmarks & Serious Lesions"),
        members: GroupMembers::Ids(&["port-wine-stain", "blueberry-muffin"]),
    },
];

static MALIGNANT_GROUPS: &[NavGroup] = &[NavGroup {
    title: None,
    members: GroupMembers::Category(Category::Malignant),
}];

impl NavPage {
    pub const ALL: [NavPage; 7] = [
        NavPage::Overview,
        NavPage::Benign,
        NavPage::Infectious,
        NavPage::Other,
        NavPage::Malignant,
        NavPage::QuickReference,
        NavPage::Search,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            NavPage::Overview => "/",
            NavPage::Benign => "/benign",
            NavPage::Infectious => "/infectious",
            NavPage::Other => "/other",
            NavPage::Malignant => "/malignant",
            NavPage::QuickReference => "/quick-reference",
            NavPage::Search => "/search",
        }
    }

    /// Entry text in the navigation selector.
    pub fn label(&self) -> &'static str {
        match self {
            NavPage::Overview => "Overview",
            NavPage::Benign => "Benign Rashes",
            NavPage::Infectious => "Infectious Rashes",
            NavPage::Other => "Other Conditions",
            NavPage::Malignant => "Malignant Risk",
            NavPage::QuickReference => "Quick Reference",
            NavPage::Search => "Search All",
        }
    }

    pub fn heading(&self) -> &'static str {
        match self {
            NavPage::Overview => "Overview",
            NavPage::Benign => "Benign Skin Disorders",
            NavPage::Infectious => "Infectious Causes of Rashes",
            NavPage::Other => "Other Conditions",
            NavPage::Malignant => "Conditions with Malignant Transformation Risk",
            NavPage::QuickReference => "Quick Reference",
            NavPage::Search => "Search All Conditions",
        }
    }

    pub fn banner(&self) -> Option<Banner> {
        match self {
            NavPage::Benign => Some(Banner {
                tone: BannerTone::Info,
                text: "These rashes are very common in newborns and typically resolve spontaneously \
                       without intervention. Recognition helps avoid unnecessary testing.",
            }),
            NavPage::Infectious => Some(Banner {
                tone: BannerTone::Error,
                text: "These typically require intervention. Common pathogens: S. aureus, \
                       Streptococcus, Candida albicans, and HSV.",
            }),
            NavPage::Malignant => Some(Banner {
                tone: BannerTone::Warning,
                text: "These lesions require close monitoring and may need surgical intervention.",
            }),
            _ => None,
        }
    }

    /// Condition groups for the category pages; empty for the others.
    pub fn groups(&self) -> &'static [NavGroup] {
        match self {
            NavPage::Benign => BENIGN_GROUPS,
            NavPage::Infectious => INFECTIOUS_GROUPS,
            NavPage::Other => OTHER_GROUPS,
            NavPage::Malignant => MALIGNANT_GROUPS,
            _ => &[],
        }
    }

    /// Category whose cards this page shows, if any.
    pub fn category(&self) -> Option<Category> {
        match self {
            NavPage::Benign => Some(Category::Benign),
            NavPage::Infectious => Some(Category::Infectious),
            NavPage::Other => Some(Category::Other),
            NavPage::Malignant => Some(Category::Malignant),
            _ => None,
        }
    }
}
