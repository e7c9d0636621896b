//! Preview geometry module
//!
//! This module provides:
//! - Bounding box accumulation
//! - Ribbon meshes for toolpath segments
//! - Preview scene assembly in draw order
//! - Camera framing for a bounding box
//! - Ground grid sizing

pub mod bounds;
pub mod camera;
pub mod grid;
pub mod ribbon;
pub mod scene;

pub use bounds::BoundsAccumulator;
pub use camera::{fit_camera, fit_camera_with, view_direction, CameraFit, CameraSettings};
pub use grid::{grid_spec, GridSettings, GridSpec};
pub use ribbon::{build_ribbon, RibbonMesh, RibbonParams, ZBiasTable};
pub use scene::{build_scene, FeatureMesh, SceneOptions};
