//! Print feature taxonomy

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::UnknownFeatureError;

/// Slicer-assigned category of a print region
///
/// `Travel` is never produced by the classifier; it is the bucket for
/// non-extruding moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureType {
    /// Inner perimeter walls
    Perimeter,
    /// Outer (visible) perimeter wall
    External,
    /// Perimeter printed over an overhang
    Overhang,
    /// Sparse infill
    Infill,
    /// Solid infill
    Solid,
    /// Top surface solid infill
    TopSolid,
    /// Bridge infill over air
    Bridge,
    /// Skirt or brim
    Skirt,
    /// Support material
    Support,
    /// Gap fill
    Gap,
    /// Anything the classifier does not recognize
    Other,
    /// Non-extruding moves
    Travel,
}

impl FeatureType {
    /// Number of feature types
    pub const COUNT: usize = 12;

    /// Every feature type in declaration order
    pub const ALL: [FeatureType; Self::COUNT] = [
        FeatureType::Perimeter,
        FeatureType::External,
        FeatureType::Overhang,
        FeatureType::Infill,
        FeatureType::Solid,
        FeatureType::TopSolid,
        FeatureType::Bridge,
        FeatureType::Skirt,
        FeatureType::Support,
        FeatureType::Gap,
        FeatureType::Other,
        FeatureType::Travel,
    ];

    /// Order in which ribbon buckets are drawn.
    ///
    /// Surface features come last so they always render over interior ones.
    pub const DRAW_ORDER: [FeatureType; 10] = [
        FeatureType::Infill,
        FeatureType::Solid,
        FeatureType::Bridge,
        FeatureType::Gap,
        FeatureType::Support,
        FeatureType::Skirt,
        FeatureType::TopSolid,
        FeatureType::Overhang,
        FeatureType::External,
        FeatureType::Perimeter,
    ];

    /// Dense index of this feature, `0..COUNT`
    pub fn index(self) -> usize {
        match self {
            FeatureType::Perimeter => 0,
            FeatureType::External => 1,
            FeatureType::Overhang => 2,
            FeatureType::Infill => 3,
            FeatureType::Solid => 4,
            FeatureType::TopSolid => 5,
            FeatureType::Bridge => 6,
            FeatureType::Skirt => 7,
            FeatureType::Support => 8,
            FeatureType::Gap => 9,
            FeatureType::Other => 10,
            FeatureType::Travel => 11,
        }
    }

    /// Whether moves of this feature belong to the printed model itself.
    ///
    /// Travel, skirt and unclassified moves are excluded.
    pub fn is_model(self) -> bool {
        matches!(
            self,
            FeatureType::Perimeter
                | FeatureType::External
                | FeatureType::Overhang
                | FeatureType::Infill
                | FeatureType::Solid
                | FeatureType::TopSolid
                | FeatureType::Bridge
                | FeatureType::Gap
                | FeatureType::Support
        )
    }

    /// Canonical snake_case name
    pub fn as_str(self) -> &'static str {
        match self {
            FeatureType::Perimeter => "perimeter",
            FeatureType::External => "external",
            FeatureType::Overhang => "overhang",
            FeatureType::Infill => "infill",
            FeatureType::Solid => "solid",
            FeatureType::TopSolid => "top_solid",
            FeatureType::Bridge => "bridge",
            FeatureType::Skirt => "skirt",
            FeatureType::Support => "support",
            FeatureType::Gap => "gap",
            FeatureType::Other => "other",
            FeatureType::Travel => "travel",
        }
    }
}

impl fmt::Display for FeatureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeatureType {
    type Err = UnknownFeatureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        FeatureType::ALL
            .into_iter()
            .find(|feature| feature.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| UnknownFeatureError(name.to_string()))
    }
}
