//! Ground-plane grid sizing

use printview_core::constants::{
    GRID_CELL_MM, GRID_MIN_DIVISIONS, GRID_MIN_SIZE_MM, GRID_PADDING_MM,
};
use printview_core::Aabb;
use serde::{Deserialize, Serialize};

/// Grid sizing parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSettings {
    /// Margin around the model on each side (mm)
    pub padding: f64,
    /// Smallest grid side length (mm)
    pub min_size: f64,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            padding: GRID_PADDING_MM,
            min_size: GRID_MIN_SIZE_MM,
        }
    }
}

/// Square ground grid under the model
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GridSpec {
    /// Side length (mm)
    pub size: f64,
    pub divisions: u32,
    pub center_x: f64,
    pub center_y: f64,
}

impl GridSpec {
    pub fn cell_size(&self) -> f64 {
        self.size / f64::from(self.divisions)
    }
}

/// Size a grid for the model bounding box
pub fn grid_spec(bbox_model: &Aabb, padding: f64, min_size: f64) -> GridSpec {
    let size = min_size.max(bbox_model.width().max(bbox_model.height()) + 2.0 * padding);
    let divisions = ((size / GRID_CELL_MM).round() as u32).max(GRID_MIN_DIVISIONS);
    let center = bbox_model.center();

    GridSpec {
        size,
        divisions,
        center_x: center.x,
        center_y: center.y,
    }
}
