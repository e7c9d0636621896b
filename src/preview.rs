//! Preview pipeline glue
//!
//! Runs parse, scene, camera, and grid for one buffer under a [`Config`]
//! and condenses the outcome into a serializable summary.

use std::collections::BTreeMap;

use printview_core::{Aabb, FeatureType};
use printview_settings::Config;
use printview_visualizer::{
    build_scene, fit_camera_with, grid_spec, parse_gcode_cancellable, CameraFit, CancelToken,
    FeatureMesh, GridSpec, ParseResult, ParseStats,
};
use serde::Serialize;
use tracing::info;

/// Everything a renderer needs for one file
#[derive(Debug, Clone)]
pub struct Preview {
    pub result: ParseResult,
    pub meshes: Vec<FeatureMesh>,
    pub camera: CameraFit,
    pub grid: GridSpec,
}

impl Preview {
    /// Build a preview from decoded G-code text
    pub fn build(text: &str, config: &Config) -> anyhow::Result<Self> {
        Self::build_cancellable(text, config, &CancelToken::new())
    }

    /// [`Preview::build`], polling `cancel` while parsing
    pub fn build_cancellable(
        text: &str,
        config: &Config,
        cancel: &CancelToken,
    ) -> anyhow::Result<Self> {
        let result = parse_gcode_cancellable(text, &config.parse_options(), cancel)?;
        let meshes = build_scene(&result, &config.scene_options()?);
        let camera = fit_camera_with(&result.bbox_model, &config.camera);
        let grid = grid_spec(&result.bbox_model, config.grid.padding, config.grid.min_size);

        info!(
            "Preview ready: {} segments, {} meshes, max layer {}{}",
            result.segment_count(),
            meshes.len(),
            result.max_layer,
            if result.clipped { " (clipped)" } else { "" }
        );

        Ok(Self {
            result,
            meshes,
            camera,
            grid,
        })
    }

    pub fn summary(&self) -> PreviewSummary {
        let segments = self
            .result
            .segments_by_feature
            .iter()
            .filter(|(_, segments)| !segments.is_empty())
            .map(|(feature, segments)| (feature, segments.len()))
            .collect();

        let meshes = self
            .meshes
            .iter()
            .map(|m| MeshSummary {
                feature: m.feature,
                vertices: m.mesh.vertex_count(),
                triangles: m.mesh.triangle_count(),
            })
            .collect();

        PreviewSummary {
            max_layer: self.result.max_layer,
            clipped: self.result.clipped,
            segments,
            bbox_all: self.result.bbox_all,
            bbox_model: self.result.bbox_model,
            meshes,
            camera: CameraSummary {
                target: self.camera.target.to_array(),
                eye: self.camera.eye().to_array(),
                distance: self.camera.distance,
            },
            grid: self.grid,
            stats: self.result.stats,
        }
    }
}

/// Vertex and triangle counts of one mesh
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MeshSummary {
    pub feature: FeatureType,
    pub vertices: usize,
    pub triangles: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CameraSummary {
    pub target: [f32; 3],
    pub eye: [f32; 3],
    pub distance: f32,
}

/// Compact, serializable description of a [`Preview`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreviewSummary {
    pub max_layer: u32,
    pub clipped: bool,
    /// Non-empty buckets only
    pub segments: BTreeMap<FeatureType, usize>,
    pub bbox_all: Aabb,
    pub bbox_model: Aabb,
    pub meshes: Vec<MeshSummary>,
    pub camera: CameraSummary,
    pub grid: GridSpec,
    pub stats: ParseStats,
}
