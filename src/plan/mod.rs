//! RenderPlan builder
//!
//! Walks the declared section plan against a catalog and emits the ordered
//! block sequence for the printed guide:
//!
//! 1. cover, page break, table of contents
//! 2. per section: optional page break, heading, then its parts in order;
//!    each condition becomes heading, image (when the loader finds one),
//!    caption and fact table
//! 3. reference tables exactly as stored in the catalog
//!
//! Pagination is not computed here. `Block::PageBreak` is the only layout
//! instruction the plan carries.

mod blocks;

use serde::Serialize;
use tracing::{debug, info};

use crate::assets::ImageLoader;
use crate::catalog::{Catalog, Condition};
use crate::config::DocumentConfig;
use crate::error::Result;
use crate::sections::{
    DocumentSection, SectionPart, TocEntry, COVER_DESCRIPTION, DOCUMENT_SECTIONS,
    TABLE_OF_CONTENTS,
};

pub use blocks::{Block, FactRow, TableStyle, TextStyle};

pub const FACT_TABLE_HEADERS: [&str; 2] = ["Feature", "Description"];

/// Document metadata carried next to the blocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanMetadata {
    pub title: String,
    pub author: String,
    pub subject: String,
}

/// Ordered, declarative block sequence for one document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderPlan {
    pub metadata: PlanMetadata,
    pub blocks: Vec<Block>,
}

impl RenderPlan {
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Block> {
        self.blocks.iter()
    }

    /// Condition ids in the order their entries appear.
    pub fn condition_ids(&self) -> Vec<&str> {
        self.blocks
            .iter()
            .filter_map(|b| match b {
                Block::ConditionHeading { condition_id, .. } => Some(condition_id.as_str()),
                _ => None,
            })
            .collect()
    }

    /// The fact table emitted for `condition_id`, if any.
    pub fn fact_rows(&self, condition_id: &str) -> Option<&[FactRow]> {
        self.blocks.iter().find_map(|b| match b {
            Block::FactTable { condition_id: id, rows, .. } if id == condition_id => {
                Some(rows.as_slice())
            }
            _ => None,
        })
    }

    /// Number of blocks of each kind, in first-seen order.
    pub fn kind_counts(&self) -> Vec<(&'static str, usize)> {
        let mut counts: Vec<(&'static str, usize)> = Vec::new();
        for block in &self.blocks {
            match counts.iter_mut().find(|(k, _)| *k == block.kind()) {
                Some((_, n)) => *n += 1,
                None => counts.push((block.kind(), 1)),
            }
        }
        counts
    }
}

impl<'a> IntoIterator for &'a RenderPlan {
    type Item = &'a Block;
    type IntoIter = std::slice::Iter<'a, Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.iter()
    }
}

// ============================================================================
// Builder
// ============================================================================

pub struct RenderPlanBuilder<'a> {
    catalog: &'a Catalog,
    config: &'a DocumentConfig,
    loader: &'a dyn ImageLoader,
    sections: &'a [DocumentSection],
    toc: &'a [TocEntry],
}

impl<'a> RenderPlanBuilder<'a> {
    /// Builder over the declared neonatal section plan.
    pub fn new(
        catalog: &'a Catalog,
        config: &'a DocumentConfig,
        loader: &'a dyn ImageLoader,
    ) -> Self {
        Self {
            catalog,
            config,
            loader,
            sections: DOCUMENT_SECTIONS,
            toc: TABLE_OF_CONTENTS,
        }
    }

    /// Swap in a different section plan (synthetic catalogs in tests).
    pub fn with_sections(mut self, sections: &'a [DocumentSection], toc: &'a [TocEntry]) -> Self {
        self.sections = sections;
        self.toc = toc;
        self
    }

    pub fn build(&self) -> Result<RenderPlan> {
        let mut blocks = Vec::new();

        self.push_front_matter(&mut blocks);
        for section in self.sections {
            self.push_section(section, &mut blocks)?;
        }

        let plan = RenderPlan {
            metadata: PlanMetadata {
                title: self.config.title.clone(),
                author: self.config.author.clone(),
                subject: self.config.subject.clone(),
            },
            blocks,
        };
        info!(
            blocks = plan.len(),
            conditions = plan.condition_ids().len(),
            "render plan built"
        );
        Ok(plan)
    }

    fn push_front_matter(&self, blocks: &mut Vec<Block>) {
        blocks.push(Block::Cover {
            title: self.config.title.clone(),
            subtitle: self.config.subtitle.clone(),
            source_line: self.config.source_line.clone(),
            description: COVER_DESCRIPTION.to_string(),
            highlight: format!(
                "Featuring {} clinical photographs from the original textbook",
                self.catalog.len()
            ),
        });
        blocks.push(Block::PageBreak);
        blocks.push(Block::TableOfContents {
            heading: "Table of Contents".to_string(),
            entries: self.toc.to_vec(),
        });
    }

    fn push_section(&self, section: &DocumentSection, blocks: &mut Vec<Block>) -> Result<()> {
        if section.page_break_before {
            blocks.push(Block::PageBreak);
        }
        blocks.push(Block::SectionHeading { text: section.heading.to_string() });

        for part in section.parts {
            match *part {
                SectionPart::Paragraph(text) => blocks.push(Block::Paragraph {
                    text: text.to_string(),
                    style: TextStyle::Body,
                }),
                SectionPart::Subsection(text) => {
                    blocks.push(Block::SubsectionHeading { text: text.to_string() })
                }
                SectionPart::Conditions(ids) => {
                    for id in ids {
                        let condition = self.catalog.condition(id)?;
                        self.push_condition(condition, blocks);
                    }
                }
                SectionPart::Table(name) => {
                    let table = self.catalog.table(name)?;
                    blocks.push(Block::ReferenceTable {
                        table: name,
                        headers: table.headers.clone(),
                        rows: table.rows.clone(),
                        style: TableStyle::for_table(name),
                    });
                }
                SectionPart::Callout { label, text } => blocks.push(Block::Callout {
                    label: label.to_string(),
                    text: text.to_string(),
                }),
                SectionPart::PageBreak => blocks.push(Block::PageBreak),
            }
        }
        Ok(())
    }

    fn push_condition(&self, condition: &Condition, blocks: &mut Vec<Block>) {
        blocks.push(Block::ConditionHeading {
            condition_id: condition.id.clone(),
            name: condition.name.clone(),
        });

        match self.loader.load_image(&condition.image_ref) {
            Some(image) => blocks.push(Block::Image { image }),
            None => debug!(condition = %condition.id, "figure omitted"),
        }

        blocks.push(Block::Caption { text: condition.figure_caption() });
        blocks.push(Block::FactTable {
            condition_id: condition.id.clone(),
            headers: FACT_TABLE_HEADERS.map(String::from),
            rows: condition.facts.iter().map(FactRow::from).collect(),
            style: TableStyle::for_category(condition.category),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::NullLoader;
    use crate::catalog::Category;
    use crate::catalog::test_support::condition;

    #[test]
    fn test_front_matter_order() {
        let catalog = Catalog::neonatal().unwrap();
        let config = DocumentConfig::default();
        let plan = RenderPlanBuilder::new(&catalog, &config, &NullLoader).build().unwrap();

        assert!(matches!(plan.blocks[0], Block::Cover { .. }));
        assert_eq!(plan.blocks[1], Block::PageBreak);
        assert!(matches!(plan.blocks[2], Block::TableOfContents { .. }));
        if let Block::Cover { highlight, .. } = &plan.blocks[0] {
            assert_eq!(highlight, "Featuring 21 clinical photographs from the original textbook");
        }
    }

    #[test]
    fn test_fact_table_styles_follow_category() {
        assert_eq!(TableStyle::for_category(Category::Benign), TableStyle::Accent);
        assert_eq!(TableStyle::for_category(Category::Malignant), TableStyle::Alert);
        assert_eq!(
            TableStyle::for_table(crate::catalog::TableName::RedFlags),
            TableStyle::Alert
        );
    }

    #[test]
    fn test_unknown_condition_in_section_is_invalid_key() {
        static SECTIONS: &[DocumentSection] = &[DocumentSection {
            heading: "1. Broken",
            page_break_before: false,
            parts: &[SectionPart::Conditions(&["not-there"])],
        }];
        let catalog = Catalog::new(vec![condition("a", Category::Benign, 1)], vec![]).unwrap();
        let config = DocumentConfig::default();
        let err = RenderPlanBuilder::new(&catalog, &config, &NullLoader)
            .with_sections(SECTIONS, &[])
            .build()
            .unwrap_err();
        assert!(err.is_invalid_key());
    }

    #[test]
    fn test_kind_counts() {
        let catalog = Catalog::neonatal().unwrap();
        let config = DocumentConfig::default();
        let plan = RenderPlanBuilder::new(&catalog, &config, &NullLoader).build().unwrap();
        let counts = plan.kind_counts();
        let get = |kind: &str| counts.iter().find(|(k, _)| *k == kind).map(|(_, n)| *n);
        assert_eq!(get("condition_heading"), Some(21));
        assert_eq!(get("caption"), Some(21));
        assert_eq!(get("fact_table"), Some(21));
        assert_eq!(get("reference_table"), Some(6));
        assert_eq!(get("image"), None);
    }
}
