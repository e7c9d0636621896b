//! End-to-end toolpath scenarios: text in, buckets, boxes, and meshes out

use printview_core::{Aabb, FeatureType, Point3, Segment};
use printview_visualizer::{
    build_scene, fit_camera, grid_spec, parse_gcode, ParseOptions, SceneOptions,
};

/// Two layers of a 20mm square with skirt, travel, and infill
const TWO_LAYER_PRINT: &str = "\
; generated by a slicer
M82
G92 E0
;LAYER_CHANGE
;Z:0.2
;TYPE:Skirt
G0 X-5 Y-5 Z0.2 F9000
G1 X25 Y-5 E1.0
G1 X25 Y25 E2.0
;TYPE:External perimeter
G0 X0 Y0
G1 X20 Y0 E3.0
G1 X20 Y20 E4.0
G1 X0 Y20 E5.0
G1 X0 Y0 E6.0
;TYPE:Solid infill
G1 X20 Y10 E7.0 ; inline comment
;LAYER_CHANGE
;Z:0.4
;TYPE:Perimeter
G0 X1 Y1 Z0.4
G1 X19 Y1 E8.0
G1 X19 Y19 E9.0
;TYPE:Top solid infill
G1 X1 Y10 E10.0
";

#[test]
fn test_two_layer_print_buckets() {
    let result = parse_gcode(TWO_LAYER_PRINT, &ParseOptions::default()).unwrap();

    assert_eq!(result.segments(FeatureType::Skirt).len(), 2);
    assert_eq!(result.segments(FeatureType::External).len(), 4);
    assert_eq!(result.segments(FeatureType::Solid).len(), 1);
    assert_eq!(result.segments(FeatureType::Perimeter).len(), 2);
    assert_eq!(result.segments(FeatureType::TopSolid).len(), 1);
    assert_eq!(result.segments(FeatureType::Travel).len(), 3);
    assert!(result.segments(FeatureType::Other).is_empty());

    assert!(result
        .segments(FeatureType::External)
        .iter()
        .all(|s| s.layer == 1));
    assert!(result
        .segments(FeatureType::Perimeter)
        .iter()
        .all(|s| s.layer == 2));
    // Markers advance the current layer but not the reported maximum
    assert_eq!(result.max_layer, 0);
    assert!(!result.clipped);
}

#[test]
fn test_two_layer_print_boxes() {
    let result = parse_gcode(TWO_LAYER_PRINT, &ParseOptions::default()).unwrap();

    assert_eq!(
        result.bbox_all,
        Aabb {
            min_x: -5.0,
            min_y: -5.0,
            min_z: 0.2,
            max_x: 25.0,
            max_y: 25.0,
            max_z: 0.4,
        }
    );
    // The first external edge starts where the travel move ended
    assert_eq!(
        result.bbox_model,
        Aabb {
            min_x: 0.0,
            min_y: 0.0,
            min_z: 0.2,
            max_x: 20.0,
            max_y: 20.0,
            max_z: 0.4,
        }
    );
    assert!(result.bbox_all.contains(&result.bbox_model));
}

#[test]
fn test_relative_extrusion_deltas() {
    let text = "M83\n;TYPE:Perimeter\nG1 X10 E0.5\nG1 X20 E0.5\nG1 X30 E0.5\n";
    let result = parse_gcode(text, &ParseOptions::default()).unwrap();
    assert_eq!(result.segments(FeatureType::Perimeter).len(), 3);
    assert_eq!(result.stats.travel_moves, 0);
}

#[test]
fn test_absolute_extrusion_repeated_e_is_travel() {
    let text = ";TYPE:Perimeter\nG1 X10 E0.5\nG1 X20 E0.5\nG1 X30 E0.4\n";
    let result = parse_gcode(text, &ParseOptions::default()).unwrap();
    assert_eq!(result.segments(FeatureType::Perimeter).len(), 1);
    assert_eq!(result.segments(FeatureType::Travel).len(), 2);
}

#[test]
fn test_extruder_reset_keeps_classifying() {
    let text = ";TYPE:Perimeter\nG1 X10 E5\nG92 E0\nG1 X20 E1\n";
    let result = parse_gcode(text, &ParseOptions::default()).unwrap();
    assert_eq!(result.segments(FeatureType::Perimeter).len(), 2);
}

#[test]
fn test_malformed_numbers_hold_position() {
    let text = ";TYPE:Perimeter\nG1 X10 Y5 E1\nG1 Xabc Y15 E2\n";
    let result = parse_gcode(text, &ParseOptions::default()).unwrap();
    let segments = result.segments(FeatureType::Perimeter);
    assert_eq!(
        segments[1],
        Segment::new(Point3::new(10.0, 5.0, 0.0), Point3::new(10.0, 15.0, 0.0), 0)
    );
}

#[test]
fn test_unrecognized_lines_are_ignored() {
    let text = "M104 S200\nG28\nT0\n;TYPE:Perimeter\nG2 X5 Y5 I1 J1 E3\nG1 X10 E1\n";
    let result = parse_gcode(text, &ParseOptions::default()).unwrap();
    assert_eq!(result.segment_count(), 1);
    assert_eq!(result.stats.lines, 6);
}

#[test]
fn test_scene_camera_and_grid_from_result() {
    let result = parse_gcode(TWO_LAYER_PRINT, &ParseOptions::default()).unwrap();

    let mut options = SceneOptions::default();
    options.hidden.insert(FeatureType::Skirt);
    let meshes = build_scene(&result, &options);
    assert!(meshes.iter().all(|m| m.feature != FeatureType::Skirt));
    assert!(meshes.iter().all(|m| m.feature != FeatureType::Travel));

    let external = meshes
        .iter()
        .find(|m| m.feature == FeatureType::External)
        .unwrap();
    assert_eq!(external.mesh.vertex_count(), 16);
    assert_eq!(external.mesh.triangle_count(), 8);

    let camera = fit_camera(&result.bbox_model, 45.0, 1.0, 1.2);
    assert_eq!(camera.target.x, 10.0);
    assert_eq!(camera.target.y, 10.0);
    assert!(camera.distance > camera.radius);

    let grid = grid_spec(&result.bbox_model, 10.0, 100.0);
    assert_eq!(grid.size, 100.0);
    assert_eq!(grid.divisions, 10);
    assert_eq!((grid.center_x, grid.center_y), (10.0, 10.0));
}

#[test]
fn test_large_model_grid() {
    let text = ";TYPE:Perimeter\nG1 X230 Y0 E1\nG1 X230 Y180 E2\n";
    let result = parse_gcode(text, &ParseOptions::default()).unwrap();
    let grid = grid_spec(&result.bbox_model, 10.0, 100.0);
    assert_eq!(grid.size, 250.0);
    assert_eq!(grid.divisions, 25);
}
