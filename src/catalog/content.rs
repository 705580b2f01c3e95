//! Literal condition definitions.
//!
//! Static arrays in catalog order. Figure numbers run 1..21 across all four
//! categories; `Catalog::new` re-checks that on every construction.

use super::types::{Category, Condition, Fact, Severity};

pub(crate) struct FactDef {
    pub label: &'static str,
    pub value: &'static str,
    pub severity: Severity,
}

pub(crate) struct ConditionDef {
    pub id: &'static str,
    pub name: &'static str,
    pub image: &'static str,
    pub figure: &'static str,
    pub caption: &'static str,
    pub facts: &'static [FactDef],
}

const fn fact(label: &'static str, value: &'static str) -> FactDef {
    FactDef { label, value, severity: Severity::Normal }
}

const fn warn(label: &'static str, value: &'static str) -> FactDef {
    FactDef { label, value, severity: Severity::Warning }
}

// ============================================================================
// Benign
// ============================================================================

static BENIGN: &[ConditionDef] = &[
    ConditionDef {
        id: "aplasia-cutis",
        name: "Aplasia Cutis Congenita",
        image: "01_aplasia_cutis.jpeg",
        figure: "Figure 1",
        caption: "Aplasia cutis congenita on scalp - localized absence of skin",
        facts: &[
            fact("Appearance", "Localized absence of skin, most commonly on scalp"),
            fact("Cause", "Can be associated with methimazole or valproic acid exposure in pregnancy"),
            fact("Treatment", "Small lesions: local wound care; Large lesions: may require surgical excision, skin grafting"),
        ],
    },
    ConditionDef {
        id: "erythema-toxicum",
        name: "Erythema Toxicum (Most Common Newborn Rash)",
        image: "02_erythema_toxicum.jpeg",
        figure: "Figure 2",
        caption: "Erythema toxicum - erythematous macules with central papules",
        facts: &[
            fact("Appearance", "Erythematous macules with central papule or pustule"),
            fact("Timing", "First 48 hours of life; can be present at birth"),
            fact("Location", "Trunk, extremities, perineum; more common in term infants"),
            fact("Course", "Resolves by 2 weeks; new lesions may appear"),
            fact("Diagnosis", "Wright stain shows eosinophils (vs neutrophils in infection)"),
        ],
    },
    ConditionDef {
        id: "pustular-melanosis",
        name: "Transient Neonatal Pustular Melanosis",
        image: "03_transient_pustular_melanosis.jpeg",
        figure: "Figure 3",
        caption: "Transient neonatal pustular melanosis - pustules and hyperpigmented macules",
        facts: &[
            fact("Appearance", "2-5 mm pustules present at birth"),
            fact("Location", "Face, sacrum; typically in full-term infants"),
            fact("Course", "Pustules resolve in 48 hours; hyperpigmented macules fade over months"),
        ],
    },
    ConditionDef {
        id: "milia",
        name: "Milia",
        image: "04_milia.jpeg",
        figure: "Figure 4",
        caption: "Milia - tiny white-yellow papules on face",
        facts: &[
            fact("Appearance", "Tiny 1-mm white-yellow papules"),
            fact("Location", "Face, chin, forehead, scalp"),
            fact("Cause", "Sebaceous retention cysts"),
            fact("Course", "Resolves spontaneously; no treatment needed"),
        ],
    },
    ConditionDef {
        id: "acropustulosis",
        name: "Acropustulosis of Infancy",
        image: "05_acropustulosis.jpeg",
        figure: "Figure 5",
        caption: "Acropustulosis of infancy - vesicopustules on palms and soles",
        facts: &[
            fact("Appearance", "Pruritic vesicopustules"),
            fact("Location", "Palmar surface of hands, plantar surface of feet"),
            fact("Course", "Recurrent; each episode lasts 7-14 days"),
            fact("Key Point", "Distinguish from scabies; intense itching"),
        ],
    },
    ConditionDef {
        id: "neonatal-acne",
        name: "Neonatal Acne",
        image: "06_neonatal_acne.jpeg",
        figure: "Figure 6",
        caption: "Neonatal acne - erythematous comedones and papules",
        facts: &[
            fact("Appearance", "Erythematous comedones, papules, and pustules"),
            fact("Location", "Face"),
            fact("Course", "Resolves over weeks to months; no treatment needed"),
        ],
    },
    ConditionDef {
        id: "fat-necrosis",
        name: "Subcutaneous Fat Necrosis",
        image: "07_subcutaneous_fat_necrosis.jpeg",
        figure: "Figure 7",
        caption: "Subcutaneous fat necrosis - erythematous nodules and plaques",
        facts: &[
            fact("Appearance", "Erythematous nodules and plaques"),
            fact("Location", "Face, back, arms, legs, buttocks (areas of trauma)"),
            fact("Timing", "First few weeks of life; resolves by 2 months"),
            warn("Complication", "Hypercalcemia can occur if lesions calcify - monitor calcium!"),
        ],
    },
    ConditionDef {
        id: "mongolian-spots",
        name: "Mongolian Spots (Congenital Dermal Melanocytosis)",
        image: "08_mongolian_spots.jpeg",
        figure: "Figure 8",
        caption: "Mongolian spots - blue-black discoloration on lower back/buttocks",
        facts: &[
            fact("Appearance", "Blue-black macular discoloration"),
            fact("Location", "Base of spine, buttocks"),
            fact("Prevalence", ">90% in Black infants; 81% in Asian infants"),
            fact("Course", "Usually fades over several years"),
        ],
    },
];

// ============================================================================
// Infectious
// ============================================================================

static INFECTIOUS: &[ConditionDef] = &[
    ConditionDef {
        id: "ssss",
        name: "Staphylococcal Scalded Skin Syndrome (SSSS)",
        image: "09_ssss.jpeg",
        figure: "Figure 9",
        caption: "Staphylococcal scalded skin syndrome - desquamation and erythema",
        facts: &[
            fact("Cause", "Toxin-mediated disease (exfoliative toxins A and B)"),
            fact("Appearance", "Tender scarlatiniform rash with flaking and desquamation"),
            fact("Complications", "Bacteremia rare; superinfection and dehydration can occur"),
            fact("Treatment", "IV penicillinase-resistant antistaphylococcal antibiotics; supportive care; fluid management"),
        ],
    },
    ConditionDef {
        id: "hsv",
        name: "Herpes Simplex Virus (HSV)",
        image: "10_hsv.jpeg",
        figure: "Figure 10",
        caption: "Herpes simplex virus - clustered vesicles with intense erythema",
        facts: &[
            fact("Types", "Congenital HSV, Neonatal HSV (birth to 6 weeks)"),
            fact("Forms", "Disseminated, Localized CNS, SEM (Skin/Eyes/Mouth)"),
            fact("Appearance", "Erythematous papules/vesicles progressing to pustular clusters with intense erythema"),
            warn("Treatment", "Start acyclovir early, even if diagnosis not confirmed!"),
        ],
    },
    ConditionDef {
        id: "varicella",
        name: "Varicella-Zoster",
        image: "11_varicella.jpeg",
        figure: "Figure 11",
        caption: "Varicella zoster - vesicles in various stages",
        facts: &[
            fact("Congenital/Fetal syndrome", "Acquired in utero < 20 weeks; cicatricial scars at birth"),
            fact("Perinatal varicella", "Acquired late 3rd trimester; centripetal rash days 10-12"),
            fact("Postnatally acquired", "Typical chickenpox rash; all stages present (red macules, clear vesicles, crusting)"),
        ],
    },
    ConditionDef {
        id: "candidiasis",
        name: "Congenital Cutaneous Candidiasis",
        image: "12_candidiasis.jpeg",
        figure: "Figure 12",
        caption: "Congenital candidiasis - diffuse papules involving palms and soles",
        facts: &[
            fact("Timing", "Acquired in utero; extensive rash within 12 hours of birth"),
            fact("Organism", "Candida species, usually C. albicans"),
            warn("Key Feature", "Involves palms and soles (unlike erythema toxicum)"),
            fact("Treatment", "Systemic antifungals for disseminated; topical for isolated skin lesions"),
        ],
    },
];

// ============================================================================
// Other
// ============================================================================

static OTHER: &[ConditionDef] = &[
    ConditionDef {
        id: "lamellar-ichthyosis",
        name: "Lamellar Ichthyosis",
        image: "13_ichthyosis.jpeg",
        figure: "Figure 13",
        caption: "Lamellar ichthyosis - thick, scaly skin",
        facts: &[
            fact("Types", "May present as 'harlequin fetus' or 'collodion baby'"),
            fact("Appearance", "Thick, scaly skin; shiny membrane at birth that peels off"),
            fact("Complications", "Skin prone to cracking and infection; temperature instability"),
            fact("Treatment", "Aggressive supportive care; fluid/electrolyte monitoring"),
        ],
    },
    ConditionDef {
        id: "neonatal-lupus",
        name: "Neonatal Lupus",
        image: "14_neonatal_lupus.jpeg",
        figure: "Figure 14",
        caption: "Neonatal lupus - annular erythematous papules",
        facts: &[
            fact("Cause", "Maternal autoantibodies (SSA/Ro, SSB/La)"),
            fact("Appearance", "0.5-3 cm annular erythematous papules with central scale"),
            fact("Manifestations", "Skin, Cardiac (heart block), Liver/hematologic"),
            fact("Treatment", "Cardiac exam, LFTs, CBC; sunscreen; avoid sunlight 4-6 months"),
        ],
    },
    ConditionDef {
        id: "epidermolysis-bullosa",
        name: "Epidermolysis Bullosa",
        image: "15_epidermolysis_bullosa.jpeg",
        figure: "Figure 15",
        caption: "Epidermolysis bullosa - congenital absence of skin",
        facts: &[
            fact("Type", "Group of inherited diseases causing blistering"),
            fact("Appearance", "Trauma-induced blisters; congenital localized absence of skin"),
            fact("Complications", "Dysphagia from scarring; infection risk"),
            fact("Treatment", "Meticulous skin care; infection prevention; nutrition support"),
        ],
    },
    ConditionDef {
        id: "incontinentia-pigmenti",
        name: "Incontinentia Pigmenti",
        image: "16_incontinentia_pigmenti.jpeg",
        figure: "Figure 16",
        caption: "Incontinentia pigmenti - linear vesiculobullous lesions",
        facts: &[
            fact("Inheritance", "Rare X-linked dominant; more common in females"),
            fact("Stage 1", "Vesiculobullous lesions in linear distribution (can be confused with HSV!)"),
            fact("Associations", "Neurologic, dental, ophthalmologic abnormalities"),
        ],
    },
    ConditionDef {
        id: "port-wine-stain",
        name: "Port Wine Stain (Nevus Flammeus)",
        image: "17_port_wine_stain.jpeg",
        figure: "Figure 17",
        caption: "Port wine stain - flat capillary angioma",
        facts: &[
            fact("Appearance", "Flat pink-red capillary angioma"),
            fact("Location", "Usually face or extremities"),
            fact("Course", "Permanent; does not fade"),
            fact("Associations", "Sturge-Weber syndrome (if V1 distribution); Klippel-Trenaunay syndrome"),
        ],
    },
    ConditionDef {
        id: "blueberry-muffin",
        name: "'Blueberry Muffin' Lesions",
        image: "18_blueberry_muffin.jpeg",
        figure: "Figure 18",
        caption: "'Blueberry muffin' lesions - widespread purpura and papules",
        facts: &[
            fact("Appearance", "Widespread purpura and papules"),
            fact("Causes", "TORCH infections, Hemolytic disease, Neuroblastoma, Congenital leukemia"),
            fact("Workup", "TORCH titers, CBC, consider malignancy workup"),
        ],
    },
];

// ============================================================================
// Malignant
// ============================================================================

static MALIGNANT: &[ConditionDef] = &[
    ConditionDef {
        id: "melanocytic-nevus",
        name: "Congenital Melanocytic Nevus",
        image: "19_melanocytic_nevus.jpeg",
        figure: "Figure 19",
        caption: "Congenital melanocytic nevus - pigmented lesion on scalp",
        facts: &[
            fact("Small (< 1.5 cm)", "Small melanoma risk; monitor; removal optional"),
            fact("Intermediate (< 20 cm)", "Small risk; monitor; consider removal"),
            warn("Large/Giant (> 20 cm)", "5-15% melanoma risk; removal recommended; monitor for neurocutaneous melanosis"),
        ],
    },
    ConditionDef {
        id: "giant-nevus",
        name: "Giant Congenital Melanocytic Nevus",
        image: "20_giant_nevus.jpeg",
        figure: "Figure 20",
        caption: "Giant congenital melanocytic nevus - extensive pigmented lesion",
        facts: &[
            fact("Size", "> 40 cm in diameter"),
            fact("Melanoma risk", "5-15% lifetime risk"),
            fact("Additional risk", "Neurocutaneous melanosis - MRI screening may be indicated"),
            fact("Management", "Dermatology referral; consider surgical removal; close monitoring"),
        ],
    },
    ConditionDef {
        id: "sebaceous-nevus",
        name: "Sebaceous Nevus of Jadassohn",
        image: "21_sebaceous_nevus.jpeg",
        figure: "Figure 21",
        caption: "Sebaceous nevus of Jadassohn - yellow-orange plaque on scalp",
        facts: &[
            fact("Appearance", "Congenital hamartomatous lesion; yellow-orange waxy plaque"),
            fact("Location", "Scalp"),
            fact("Prevalence", "~0.3% of newborns"),
            fact("Malignant potential", "Can transform to basal cell carcinoma or benign trichoblastoma"),
        ],
    },
];

fn definitions(category: Category) -> &'static [ConditionDef] {
    match category {
        Category::Benign => BENIGN,
        Category::Infectious => INFECTIOUS,
        Category::Other => OTHER,
        Category::Malignant => MALIGNANT,
    }
}

/// Materialise every literal definition, category by category.
pub(crate) fn literal_conditions() -> Vec<Condition> {
    Category::ALL
        .into_iter()
        .flat_map(|category| definitions(category).iter().map(move |def| def.materialise(category)))
        .collect()
}

impl ConditionDef {
    fn materialise(&self, category: Category) -> Condition {
        Condition {
            id: self.id.to_string(),
            name: self.name.to_string(),
            category,
            image_ref: self.image.to_string(),
            figure_label: self.figure.to_string(),
            caption: self.caption.to_string(),
            facts: self
                .facts
                .iter()
                .map(|f| Fact {
                    label: f.label.to_string(),
                    value: f.value.to_string(),
                    severity: f.severity,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_counts_per_category() {
        assert_eq!(BENIGN.len(), 8);
        assert_eq!(INFECTIOUS.len(), 4);
        assert_eq!(OTHER.len(), 6);
        assert_eq!(MALIGNANT.len(), 3);
        assert_eq!(literal_conditions().len(), 21);
    }

    #[test]
    fn test_warning_facts_carry_no_glyphs() {
        let warnings: Vec<Fact> = literal_conditions()
            .into_iter()
            .flat_map(|c| c.facts)
            .filter(|f| f.is_warning())
            .collect();
        assert_eq!(warnings.len(), 4);
        for fact in warnings {
            assert!(fact.value.is_ascii(), "glyph left in {:?}", fact.value);
        }
    }
}
