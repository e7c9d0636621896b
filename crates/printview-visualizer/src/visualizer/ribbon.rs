//! # Ribbon Mesh Module
//!
//! Turns toolpath segments into flat quad ribbons ready for GPU upload.
//! Each segment becomes four vertices (two per endpoint, offset by half the
//! ribbon width on either side) and two triangles.

use printview_core::constants::{DEFAULT_WIDTH_MM, Z_LIFT_PER_LAYER};
use printview_core::{FeatureType, Segment};
use serde::{Deserialize, Serialize};

/// Planar length under which a segment has no usable direction
const DEGENERATE_LENGTH: f64 = 1e-6;

/// Triangle mesh for one feature bucket
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RibbonMesh {
    /// Vertex positions: [x, y, z] per vertex
    pub vertices: Vec<f32>,
    /// Triangle indices: three per triangle
    pub indices: Vec<u32>,
}

impl RibbonMesh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-allocate room for `segments` ribbons
    pub fn with_capacity(segments: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(segments * 12),
            indices: Vec::with_capacity(segments * 6),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 3
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Vertex buffer as raw bytes
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Index buffer as raw bytes
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

/// Parameters for one ribbon build
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RibbonParams {
    /// Full ribbon width (mm)
    pub width_mm: f32,
    /// Z offset added per layer index (mm)
    pub z_lift_per_layer: f32,
    /// Fixed Z offset for the whole bucket (mm)
    pub z_bias: f32,
}

impl Default for RibbonParams {
    fn default() -> Self {
        Self {
            width_mm: DEFAULT_WIDTH_MM,
            z_lift_per_layer: Z_LIFT_PER_LAYER,
            z_bias: 0.0,
        }
    }
}

/// Build a ribbon mesh from segments, preserving their order
pub fn build_ribbon(segments: &[Segment], params: &RibbonParams) -> RibbonMesh {
    let mut mesh = RibbonMesh::with_capacity(segments.len());
    let half_width = f64::from(params.width_mm) * 0.5;

    for segment in segments {
        let dx = segment.end.x - segment.start.x;
        let dy = segment.end.y - segment.start.y;
        let length = dx.hypot(dy);
        if length < DEGENERATE_LENGTH {
            continue;
        }

        // Unit direction rotated a quarter turn, scaled to half the width
        let offset_x = -dy / length * half_width;
        let offset_y = dx / length * half_width;
        let lift = f64::from(segment.layer) * f64::from(params.z_lift_per_layer)
            + f64::from(params.z_bias);

        let base = mesh.vertex_count() as u32;
        for point in [segment.start, segment.end] {
            let z = (point.z + lift) as f32;
            mesh.vertices.extend_from_slice(&[
                (point.x + offset_x) as f32,
                (point.y + offset_y) as f32,
                z,
                (point.x - offset_x) as f32,
                (point.y - offset_y) as f32,
                z,
            ]);
        }

        // 0,1 at the start; 2,3 at the end
        mesh.indices.extend_from_slice(&[
            base,
            base + 1,
            base + 2,
            base + 1,
            base + 3,
            base + 2,
        ]);
    }

    mesh
}

/// Fixed per-feature Z offsets that keep surface features above interior ones
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZBiasTable {
    biases: [f32; FeatureType::COUNT],
}

impl Default for ZBiasTable {
    fn default() -> Self {
        let mut table = Self {
            biases: [0.0; FeatureType::COUNT],
        };
        table.set(FeatureType::Solid, 0.0005);
        table.set(FeatureType::Bridge, 0.0005);
        table.set(FeatureType::Gap, 0.0005);
        table.set(FeatureType::TopSolid, 0.001);
        table.set(FeatureType::Overhang, 0.0015);
        table.set(FeatureType::Perimeter, 0.0015);
        table.set(FeatureType::External, 0.002);
        table
    }
}

impl ZBiasTable {
    /// Table with every bias at zero
    pub fn zeroed() -> Self {
        Self {
            biases: [0.0; FeatureType::COUNT],
        }
    }

    pub fn get(&self, feature: FeatureType) -> f32 {
        self.biases[feature.index()]
    }

    pub fn set(&mut self, feature: FeatureType, bias: f32) {
        self.biases[feature.index()] = bias;
    }
}
