//! Literal reference tables (non-condition content).
//!
//! Each table is a header row plus fixed-arity rows, kept in authored order.

use super::types::{ReferenceTable, Severity, TableName, TableRow};

struct TableDef {
    name: TableName,
    title: &'static str,
    headers: &'static [&'static str],
    rows: &'static [RowDef],
}

struct RowDef {
    cells: &'static [&'static str],
    severity: Severity,
}

const fn row(cells: &'static [&'static str]) -> RowDef {
    RowDef { cells, severity: Severity::Normal }
}

const fn alert(cells: &'static [&'static str]) -> RowDef {
    RowDef { cells, severity: Severity::Warning }
}

// ============================================================================
// EMBEDDED REFERENCE DATA
// ============================================================================

static DIAGNOSTIC_QUESTIONS: TableDef = TableDef {
    name: TableName::DiagnosticQuestions,
    title: "Key Diagnostic Questions",
    headers: &["Question", "What to Assess", "Clinical Significance"],
    rows: &[
        row(&["What are the rash characteristics?", "Morphology: macular, papular, vesicular, bullous, pustular", "Lesion morphology aids differential diagnosis"]),
        row(&["Are there petechiae, purpura, ecchymosis?", "Check for blanching; non-blanching = intradermal bleeding", "May indicate thrombocytopenia"]),
        row(&["History of congenital infection?", "TORCH infections, maternal history", "Can cause serious systemic disease"]),
        row(&["Is the infant ill-appearing?", "Fever, vital signs, overall appearance", "Well infant = likely benign; ill = workup needed"]),
        row(&["Maternal medications?", "Pregnancy/delivery meds; breastfeeding meds", "Methimazole, valproic acid \u{2192} aplasia cutis"]),
    ],
};

static LESION_MORPHOLOGY: TableDef = TableDef {
    name: TableName::LesionMorphology,
    title: "Lesion Morphology Classification",
    headers: &["Term", "Size", "Characteristics"],
    rows: &[
        row(&["Macule", "< 1 cm", "Flat lesion"]),
        row(&["Papule", "up to 1 cm", "Raised, solid"]),
        row(&["Vesicle", "< 1 cm", "Clear fluid"]),
        row(&["Bulla", "> 1 cm", "Large, clear fluid"]),
        row(&["Pustule", "Variable", "Purulent fluid"]),
        row(&["Petechiae", "Pinpoint", "Non-blanching red dots"]),
        row(&["Purpura", "Larger", "Non-blanching, blood under tissue"]),
        row(&["Nodule", "up to 2 cm", "Raised, deeper"]),
    ],
};

static LAB_TESTS: TableDef = TableDef {
    name: TableName::LabTests,
    title: "Laboratory Studies",
    headers: &["Test", "Indication", "Findings"],
    rows: &[
        row(&["Sepsis evaluation", "Systemic infection suspected", "Cultures, PCR from lesions"]),
        row(&["CBC, platelets", "Active bleeding suspected", "Thrombocytopenia, anemia"]),
        row(&["TORCH titers", "Congenital infection", "Elevated IgM titers"]),
        row(&["KOH prep", "Candida/fungal", "Pseudohyphae"]),
        row(&["Wright stain", "Differentiate rash type", "Eosinophils (benign) vs Neutrophils (infection)"]),
        row(&["Mineral oil prep", "Scabies", "Mites and ova"]),
        row(&["PCR/DFA", "Herpes", "HSV DNA"]),
        row(&["Coagulation studies", "Bleeding disorder/DIC", "Prolonged PT/PTT, low fibrinogen"]),
    ],
};

static TREATMENTS: TableDef = TableDef {
    name: TableName::Treatments,
    title: "Treatment Summary",
    headers: &["Condition", "Treatment"],
    rows: &[
        row(&["Benign skin disorders", "No treatment necessary; parental reassurance"]),
        row(&["Aplasia cutis congenita", "Local wound care; larger lesions may need surgical excision"]),
        row(&["Skin/soft tissue infections", "I&D; cultures; antibiotics (nafcillin/vancomycin)"]),
        alert(&["HSV infection", "Start acyclovir early, even before confirmed diagnosis!"]),
        row(&["Candida", "Systemic antifungals for disseminated; topical for skin lesions"]),
        row(&["Ichthyoses/EB", "Supportive care; fluid/electrolyte monitoring; infection prevention"]),
        row(&["Neonatal lupus", "Cardiac exam; sunscreen; avoid sunlight 4-6 months"]),
    ],
};

static CLINICAL_PEARLS: TableDef = TableDef {
    name: TableName::ClinicalPearls,
    title: "Clinical Pearls",
    headers: &["Finding", "Think of..."],
    rows: &[
        row(&["Palms and soles involved", "Congenital candidiasis, Syphilis, Scabies, Acropustulosis"]),
        row(&["'Blueberry muffin' rash", "TORCH infections, Hemolytic disease, Neuroblastoma, Leukemia"]),
        row(&["Non-blanching lesions", "Thrombocytopenia, DIC, infection - check platelets and coagulation"]),
        row(&["Vesicles in linear distribution", "Incontinentia pigmenti vs HSV - differentiate urgently!"]),
        row(&["Ill-appearing infant with rash", "Immediate sepsis workup; start acyclovir empirically"]),
        row(&[">6 caf\u{e9}-au-lait spots >5 mm", "Neurofibromatosis, Tuberous sclerosis"]),
        row(&["Port wine stain in V1", "Sturge-Weber syndrome - ophthalmology/neurology evaluation"]),
        row(&["Eosinophils on Wright stain", "Erythema toxicum (benign)"]),
        row(&["Neutrophils on Wright stain", "Bacterial infection (requires treatment)"]),
    ],
};

static RED_FLAGS: TableDef = TableDef {
    name: TableName::RedFlags,
    title: "Red Flags Requiring Immediate Action",
    headers: &["Red Flag", "Action"],
    rows: &[
        row(&["Ill-appearing/febrile infant with rash", "Immediate sepsis workup; start acyclovir empirically"]),
        row(&["Widespread petechiae/purpura", "Urgent CBC, coagulation; consider sepsis, DIC, leukemia"]),
        row(&["Vesicular rash in newborn", "PCR for HSV; start acyclovir pending results"]),
        row(&["Large/giant melanocytic nevus", "Dermatology referral; monitor for neurocutaneous melanosis"]),
        row(&["Port wine stain in V1", "Evaluate for Sturge-Weber; ophthalmology for glaucoma"]),
    ],
};

static ALL_TABLES: [&TableDef; 6] = [
    &DIAGNOSTIC_QUESTIONS,
    &LESION_MORPHOLOGY,
    &LAB_TESTS,
    &TREATMENTS,
    &CLINICAL_PEARLS,
    &RED_FLAGS,
];

pub(crate) fn literal_tables() -> Vec<ReferenceTable> {
    ALL_TABLES
        .iter()
        .map(|def| ReferenceTable {
            name: def.name,
            title: def.title.to_string(),
            headers: def.headers.iter().map(|h| h.to_string()).collect(),
            rows: def
                .rows
                .iter()
                .map(|row| TableRow {
                    cells: row.cells.iter().map(|cell| cell.to_string()).collect(),
                    severity: row.severity,
                })
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_table_name_defined_once() {
        let tables = literal_tables();
        for name in TableName::ALL {
            assert_eq!(tables.iter().filter(|t| t.name == name).count(), 1, "{name}");
        }
    }

    #[test]
    fn test_morphology_includes_nodule() {
        let tables = literal_tables();
        let morphology = tables
            .iter()
            .find(|t| t.name == TableName::LesionMorphology)
            .unwrap();
        assert_eq!(morphology.rows.len(), 8);
        assert_eq!(morphology.column(0).last(), Some("Nodule"));
    }

    #[test]
    fn test_only_hsv_treatment_is_flagged() {
        let tables = literal_tables();
        let flagged: Vec<(TableName, &str)> = tables
            .iter()
            .flat_map(|t| {
                t.rows
                    .iter()
                    .filter(|r| r.is_warning())
                    .map(move |r| (t.name, r.cells[0].as_str()))
            })
            .collect();
        assert_eq!(flagged, [(TableName::Treatments, "HSV infection")]);
    }
}
