//! Preview pipeline tests: configuration applied end to end

use printview::{CancelToken, Config, FeatureType, Preview};

const CUBE_LAYERS: &str = "\
M83
;LAYER:0
;Z:0.2
;TYPE:Skirt
G0 X-10 Y-10 Z0.2
G1 X30 Y-10 E1
;TYPE:External perimeter
G0 X0 Y0
G1 X20 Y0 E1
G1 X20 Y20 E1
G1 X0 Y20 E1
G1 X0 Y0 E1
;TYPE:Internal infill
G1 X20 Y20 E1
;LAYER:1
;Z:0.4
G0 X0 Y0 Z0.4
;TYPE:External perimeter
G1 X20 Y0 E1
G1 X20 Y20 E1
";

#[test]
fn test_default_preview() {
    let preview = Preview::build(CUBE_LAYERS, &Config::default()).unwrap();
    let summary = preview.summary();

    assert_eq!(summary.max_layer, 1);
    assert!(!summary.clipped);
    assert_eq!(summary.segments[&FeatureType::External], 6);
    assert_eq!(summary.segments[&FeatureType::Skirt], 1);
    assert_eq!(summary.segments[&FeatureType::Infill], 1);
    assert!(!summary.segments.contains_key(&FeatureType::Support));

    assert_eq!(summary.bbox_model.max_x, 20.0);
    assert_eq!(summary.bbox_all.min_x, -10.0);
    assert_eq!(summary.camera.target, [10.0, 10.0, 0.2]);
    assert_eq!(summary.grid.size, 100.0);

    let features: Vec<FeatureType> = summary.meshes.iter().map(|m| m.feature).collect();
    assert_eq!(features, FeatureType::DRAW_ORDER.to_vec());
}

#[test]
fn test_config_hides_features_and_caps_segments() {
    let mut config = Config::default();
    config.geometry.hidden.insert(FeatureType::Skirt);
    config.parse.max_segments = 3;

    let preview = Preview::build(CUBE_LAYERS, &config).unwrap();
    assert!(preview.result.clipped);
    assert_eq!(preview.result.segment_count(), 3);
    assert!(preview.meshes.iter().all(|m| m.feature != FeatureType::Skirt));
}

#[test]
fn test_summary_json_shape() {
    let preview = Preview::build(CUBE_LAYERS, &Config::default()).unwrap();
    let json = serde_json::to_value(preview.summary()).unwrap();
    assert_eq!(json["segments"]["external"], 6);
    assert_eq!(json["meshes"][0]["feature"], "infill");
    assert_eq!(json["clipped"], false);
    assert_eq!(json["grid"]["divisions"], 10);
}

#[test]
fn test_size_limit_and_cancellation() {
    let mut config = Config::default();
    config.fetch.max_bytes = 16;
    let err = Preview::build(CUBE_LAYERS, &config).unwrap_err();
    assert!(err.to_string().contains("byte limit"));

    let cancel = CancelToken::new();
    cancel.cancel();
    let err = Preview::build_cancellable(CUBE_LAYERS, &Config::default(), &cancel).unwrap_err();
    assert!(err.to_string().contains("cancelled"));
}

#[test]
fn test_file_and_config_on_disk() {
    use printview::GcodeFileReader;
    use std::path::Path;

    let dir = tempfile::tempdir().unwrap();
    let gcode_path = dir.path().join("cube.gcode");
    std::fs::write(&gcode_path, CUBE_LAYERS).unwrap();
    let config_path = dir.path().join("printview.toml");
    std::fs::write(
        &config_path,
        "[parse]\nlast = 1\n\n[geometry]\nhidden = [\"skirt\", \"infill\"]\n",
    )
    .unwrap();

    let config = Config::load_or_default(Some(Path::new(&config_path))).unwrap();
    let text = GcodeFileReader::new(&gcode_path)
        .unwrap()
        .read_all(config.fetch.max_bytes)
        .unwrap();
    let preview = Preview::build(&text, &config).unwrap();

    assert_eq!(preview.meshes.len(), FeatureType::DRAW_ORDER.len() - 2);
    assert_eq!(preview.result.segments(FeatureType::External).len(), 6);
}
