//! # Preview Scene
//!
//! Builds one ribbon mesh per visible feature bucket, in draw order.
//! Buckets are independent, so they are built in parallel; each bucket keeps
//! its own segment order.

use printview_core::constants::{DEFAULT_WIDTH_MM, Z_LIFT_PER_LAYER};
use printview_core::FeatureType;
use rayon::prelude::*;
use std::collections::BTreeSet;
use tracing::debug;

use super::ribbon::{build_ribbon, RibbonMesh, RibbonParams, ZBiasTable};
use crate::gcode::ParseResult;

/// Options for turning a parse result into meshes
#[derive(Debug, Clone, PartialEq)]
pub struct SceneOptions {
    pub width_mm: f32,
    pub z_lift_per_layer: f32,
    pub z_bias: ZBiasTable,
    /// Features left out of the scene entirely
    pub hidden: BTreeSet<FeatureType>,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            width_mm: DEFAULT_WIDTH_MM,
            z_lift_per_layer: Z_LIFT_PER_LAYER,
            z_bias: ZBiasTable::default(),
            hidden: BTreeSet::new(),
        }
    }
}

impl SceneOptions {
    pub fn ribbon_params(&self, feature: FeatureType) -> RibbonParams {
        RibbonParams {
            width_mm: self.width_mm,
            z_lift_per_layer: self.z_lift_per_layer,
            z_bias: self.z_bias.get(feature),
        }
    }

    pub fn is_visible(&self, feature: FeatureType) -> bool {
        !self.hidden.contains(&feature)
    }
}

/// Mesh for one feature bucket
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMesh {
    pub feature: FeatureType,
    pub mesh: RibbonMesh,
}

/// Build meshes for every visible feature, in [`FeatureType::DRAW_ORDER`]
pub fn build_scene(result: &ParseResult, options: &SceneOptions) -> Vec<FeatureMesh> {
    let meshes: Vec<FeatureMesh> = FeatureType::DRAW_ORDER
        .par_iter()
        .filter(|feature| options.is_visible(**feature))
        .map(|&feature| FeatureMesh {
            feature,
            mesh: build_ribbon(result.segments(feature), &options.ribbon_params(feature)),
        })
        .collect();

    debug!(
        "Scene built: {} meshes, {} triangles",
        meshes.len(),
        meshes.iter().map(|m| m.mesh.triangle_count()).sum::<usize>()
    );
    meshes
}
