use crate::error::Result;
use crate::plan::RenderPlan;

/// JSON formatter for render plans. Image bytes are never serialised.
pub struct JsonFormatter;

impl JsonFormatter {
    /// Format plan as pretty-printed JSON
    pub fn format(plan: &RenderPlan) -> Result<String> {
        Ok(serde_json::to_string_pretty(plan)?)
    }

    /// Format plan as compact JSON (no whitespace)
    pub fn format_compact(plan: &RenderPlan) -> Result<String> {
        Ok(serde_json::to_string(plan)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::NullLoader;
    use crate::catalog::Catalog;
    use crate::config::DocumentConfig;
    use crate::plan::RenderPlanBuilder;

    fn plan() -> RenderPlan {
        let catalog = Catalog::neonatal().unwrap();
        RenderPlanBuilder::new(&catalog, &DocumentConfig::default(), &NullLoader)
            .build()
            .unwrap()
    }

    #[test]
    fn test_format_json() {
        let json = JsonFormatter::format(&plan()).unwrap();
        assert!(json.contains("\"kind\": \"cover\""));
        assert!(json.contains("\"kind\": \"fact_table\""));
        assert!(json.contains("\"severity\": \"warning\""));
    }

    #[test]
    fn test_format_compact() {
        let json = JsonFormatter::format_compact(&plan()).unwrap();
        assert!(!json.contains('\n'));
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["metadata"]["title"], "Neonatal Rash and Dermatologic Problems");
        assert_eq!(value["blocks"][1]["kind"], "page_break");
    }
}
