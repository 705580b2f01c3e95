//! Content catalog
//!
//! The authoritative, ordered study-guide content: 21 conditions grouped by
//! category plus six flat reference tables. Built once, never mutated; pass it
//! by reference (or behind an `Arc`) to the plan builder and the view filter.
//!
//! Invariants checked by [`Catalog::new`]:
//! - every condition has at least one fact
//! - condition ids are unique
//! - figure labels read "Figure 1".."Figure N" in catalog order
//! - every reference-table row has the header's arity (2 or 3)

mod content;
mod reference;
mod types;

use std::collections::HashSet;

use tracing::debug;

use crate::error::{GuideError, Result};

pub use types::{Category, Condition, Fact, ReferenceTable, Severity, TableName, TableRow};

/// Read-only content shared by every front end.
#[derive(Debug, Clone)]
pub struct Catalog {
    conditions: Vec<Condition>,
    tables: Vec<ReferenceTable>,
}

impl Catalog {
    /// The neonatal dermatology catalog built from the literal definitions.
    pub fn neonatal() -> Result<Self> {
        Self::new(content::literal_conditions(), reference::literal_tables())
    }

    /// Build and validate a catalog.
    ///
    /// Conditions are ordered by category declaration order; the order within
    /// a category is kept as given.
    pub fn new(mut conditions: Vec<Condition>, tables: Vec<ReferenceTable>) -> Result<Self> {
        conditions.sort_by_key(|c| c.category); // stable

        let mut seen_ids = HashSet::new();
        for (index, condition) in conditions.iter().enumerate() {
            if condition.facts.is_empty() {
                return Err(GuideError::InvalidContent(format!(
                    "condition '{}' has no facts",
                    condition.id
                )));
            }
            if !seen_ids.insert(condition.id.as_str()) {
                return Err(GuideError::InvalidContent(format!(
                    "duplicate condition id '{}'",
                    condition.id
                )));
            }
            let expected = format!("Figure {}", index + 1);
            if condition.figure_label != expected {
                return Err(GuideError::InvalidContent(format!(
                    "condition '{}' is labelled '{}' but sits at {}",
                    condition.id, condition.figure_label, expected
                )));
            }
        }

        let mut seen_tables = HashSet::new();
        for table in &tables {
            if !seen_tables.insert(table.name) {
                return Err(GuideError::InvalidContent(format!(
                    "table '{}' defined twice",
                    table.name
                )));
            }
            if !(2..=3).contains(&table.arity()) {
                return Err(GuideError::InvalidContent(format!(
                    "table '{}' has {} columns",
                    table.name,
                    table.arity()
                )));
            }
            if let Some(row) = table.rows.iter().position(|r| r.cells.len() != table.arity()) {
                return Err(GuideError::InvalidContent(format!(
                    "table '{}' row {} does not have {} cells",
                    table.name,
                    row,
                    table.arity()
                )));
            }
        }

        debug!(
            conditions = conditions.len(),
            tables = tables.len(),
            "catalog validated"
        );
        Ok(Self { conditions, tables })
    }

    /// Every condition, flattened across categories in declared order.
    pub fn all_conditions(&self) -> &[Condition] {
        &self.conditions
    }

    /// Conditions of one category, in catalog order.
    pub fn conditions_by_category(&self, category: Category) -> Vec<&Condition> {
        self.conditions
            .iter()
            .filter(|c| c.category == category)
            .collect()
    }

    pub fn condition(&self, id: &str) -> Result<&Condition> {
        self.conditions
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| GuideError::invalid_key("condition", id))
    }

    pub fn table(&self, name: TableName) -> Result<&ReferenceTable> {
        self.tables
            .iter()
            .find(|t| t.name == name)
            .ok_or_else(|| GuideError::invalid_key("table", name.key()))
    }

    pub fn tables(&self) -> &[ReferenceTable] {
        &self.tables
    }

    /// Number of conditions (the cover's photograph count).
    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// (category, count) for every category, including empty ones.
    pub fn category_counts(&self) -> Vec<(Category, usize)> {
        Category::ALL
            .into_iter()
            .map(|c| (c, self.conditions.iter().filter(|x| x.category == c).count()))
            .collect()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// Minimal condition for synthetic catalogs.
    pub fn condition(id: &str, category: Category, figure: u32) -> Condition {
        Condition {
            id: id.to_string(),
            name: format!("Condition {id}"),
            category,
            image_ref: format!("{id}.jpeg"),
            figure_label: format!("Figure {figure}"),
            caption: format!("{id} caption"),
            facts: vec![Fact::new("Appearance", format!("{id} appearance"))],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::condition;
    use super::*;

    #[test]
    fn test_neonatal_catalog_has_21_conditions() {
        let catalog = Catalog::neonatal().unwrap();
        assert_eq!(catalog.len(), 21);
        assert_eq!(catalog.tables().len(), TableName::ALL.len());
    }

    #[test]
    fn test_figures_numbered_in_catalog_order() {
        let catalog = Catalog::neonatal().unwrap();
        for (i, c) in catalog.all_conditions().iter().enumerate() {
            assert_eq!(c.figure_number(), Some(i as u32 + 1), "{}", c.name);
            assert!(!c.facts.is_empty());
        }
    }

    #[test]
    fn test_category_partition() {
        let catalog = Catalog::neonatal().unwrap();
        let mut union: Vec<&str> = Category::ALL
            .into_iter()
            .flat_map(|c| catalog.conditions_by_category(c))
            .map(|c| c.id.as_str())
            .collect();
        let all: Vec<&str> = catalog.all_conditions().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(union, all);
        union.sort();
        union.dedup();
        assert_eq!(union.len(), 21);
        assert_eq!(
            catalog.category_counts(),
            vec![
                (Category::Benign, 8),
                (Category::Infectious, 4),
                (Category::Other, 6),
                (Category::Malignant, 3),
            ]
        );
    }

    #[test]
    fn test_unknown_condition_is_invalid_key() {
        let catalog = Catalog::neonatal().unwrap();
        assert!(catalog.condition("milia").is_ok());
        assert!(catalog.condition("measles").unwrap_err().is_invalid_key());
    }

    #[test]
    fn test_missing_table_is_invalid_key() {
        let catalog = Catalog::new(vec![condition("a", Category::Benign, 1)], vec![]).unwrap();
        let err = catalog.table(TableName::RedFlags).unwrap_err();
        assert!(err.is_invalid_key());
    }

    #[test]
    fn test_rejects_empty_facts() {
        let mut bad = condition("a", Category::Benign, 1);
        bad.facts.clear();
        assert!(matches!(
            Catalog::new(vec![bad], vec![]),
            Err(GuideError::InvalidContent(_))
        ));
    }

    #[test]
    fn test_rejects_out_of_order_figures() {
        let conditions = vec![
            condition("a", Category::Benign, 2),
            condition("b", Category::Benign, 1),
        ];
        assert!(Catalog::new(conditions, vec![]).is_err());
    }

    #[test]
    fn test_sorts_by_category_before_numbering() {
        let conditions = vec![
            condition("late", Category::Malignant, 2),
            condition("early", Category::Benign, 1),
        ];
        let catalog = Catalog::new(conditions, vec![]).unwrap();
        assert_eq!(catalog.all_conditions()[0].id, "early");
    }

    #[test]
    fn test_rejects_ragged_table() {
        let table = ReferenceTable {
            name: TableName::RedFlags,
            title: "Red Flags".into(),
            headers: vec!["Red Flag".into(), "Action".into()],
            rows: vec![TableRow::new(["only one cell"])],
        };
        assert!(Catalog::new(vec![condition("a", Category::Benign, 1)], vec![table]).is_err());
    }
}
