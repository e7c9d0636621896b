//! Slicer type-label classification
//!
//! Labels are matched against an ordered rule table; the first matching rule
//! wins, so more specific categories must stay ahead of general ones
//! ("Top solid infill" has to hit `top_solid` before `solid` or `infill`).

use printview_core::FeatureType;

/// One classification rule: a predicate over the lower-cased label
#[derive(Clone, Copy)]
pub struct ClassificationRule {
    pub feature: FeatureType,
    pub matches: fn(&str) -> bool,
}

/// Rules in priority order
pub const CLASSIFICATION_RULES: [ClassificationRule; 10] = [
    ClassificationRule {
        feature: FeatureType::TopSolid,
        matches: |label| label.contains("top") && label.contains("solid"),
    },
    ClassificationRule {
        feature: FeatureType::External,
        matches: |label| label.contains("external") && label.contains("perimeter"),
    },
    ClassificationRule {
        feature: FeatureType::Overhang,
        matches: |label| label.contains("overhang") && label.contains("perimeter"),
    },
    ClassificationRule {
        feature: FeatureType::Bridge,
        matches: |label| label.contains("bridge") && label.contains("infill"),
    },
    ClassificationRule {
        feature: FeatureType::Solid,
        matches: |label| label.contains("solid") && label.contains("infill"),
    },
    ClassificationRule {
        feature: FeatureType::Perimeter,
        matches: |label| label.contains("perimeter"),
    },
    ClassificationRule {
        feature: FeatureType::Infill,
        matches: |label| label.contains("infill"),
    },
    ClassificationRule {
        feature: FeatureType::Skirt,
        matches: |label| label.contains("skirt") || label.contains("brim"),
    },
    ClassificationRule {
        feature: FeatureType::Support,
        matches: |label| label.contains("support"),
    },
    ClassificationRule {
        feature: FeatureType::Gap,
        matches: |label| label.contains("gap"),
    },
];

/// Map a slicer `;TYPE:` label to a feature type
pub fn classify_feature(label: &str) -> FeatureType {
    let label = label.trim().to_lowercase();
    CLASSIFICATION_RULES
        .iter()
        .find(|rule| (rule.matches)(&label))
        .map_or(FeatureType::Other, |rule| rule.feature)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prusa_labels() {
        assert_eq!(classify_feature("Perimeter"), FeatureType::Perimeter);
        assert_eq!(classify_feature("External perimeter"), FeatureType::External);
        assert_eq!(classify_feature("Overhang perimeter"), FeatureType::Overhang);
        assert_eq!(classify_feature("Internal infill"), FeatureType::Infill);
        assert_eq!(classify_feature("Solid infill"), FeatureType::Solid);
        assert_eq!(classify_feature("Top solid infill"), FeatureType::TopSolid);
        assert_eq!(classify_feature("Bridge infill"), FeatureType::Bridge);
        assert_eq!(classify_feature("Skirt/Brim"), FeatureType::Skirt);
        assert_eq!(classify_feature("Support material"), FeatureType::Support);
        assert_eq!(classify_feature("Gap fill"), FeatureType::Gap);
        assert_eq!(classify_feature("Wipe tower"), FeatureType::Other);
    }

    #[test]
    fn test_top_solid_wins_over_solid_and_infill() {
        assert_eq!(classify_feature("  TOP SOLID INFILL "), FeatureType::TopSolid);
        assert_eq!(classify_feature("solid top"), FeatureType::TopSolid);
    }

    #[test]
    fn test_specific_perimeters_win_over_generic() {
        assert_eq!(
            classify_feature("external overhang perimeter"),
            FeatureType::External
        );
        assert_eq!(classify_feature("perimeter infill"), FeatureType::Perimeter);
    }

    #[test]
    fn test_brim_and_support_interface() {
        assert_eq!(classify_feature("Brim"), FeatureType::Skirt);
        assert_eq!(
            classify_feature("Support material interface"),
            FeatureType::Support
        );
        assert_eq!(classify_feature("bridge"), FeatureType::Other);
        assert_eq!(classify_feature(""), FeatureType::Other);
    }

    #[test]
    fn test_rule_table_never_yields_travel() {
        assert!(CLASSIFICATION_RULES
            .iter()
            .all(|rule| rule.feature != FeatureType::Travel && rule.feature != FeatureType::Other));
    }
}
