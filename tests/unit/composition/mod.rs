use super::*;

const DOC: &str = r##"{
    "fps": {"num": 30, "den": 1},
    "canvas": {"width": 1920, "height": 1080},
    "duration": 60,
    "timelines": {"beats": [0.5, 1.0, 1.5], "downbeats": [0.5]},
    "layers": [
        {"id": "rings", "range": {"start": 0, "end": 60}, "z": 1, "timeline": "beats",
         "kind": "pulse_ring", "params": {}},
        {"id": "flash", "range": {"start": 30, "end": 60}, "opacity": 0.5,
         "timeline": "downbeats", "kind": "flash", "params": {"max_opacity": 0.12}},
        {"id": "idle", "kind": "orbit_dots", "params": {"rings": 1}}
    ]
}"##;

#[test]
fn builds_every_layer_up_front() {
    let comp = Composition::from_reader(DOC.as_bytes()).unwrap();
    assert_eq!(comp.duration_frames(), 60);
    assert_eq!(comp.fps(), Fps { num: 30, den: 1 });
    let ids: Vec<&str> = comp.layers().iter().map(|l| l.id.as_str()).collect();
    assert_eq!(ids, ["rings", "flash", "idle"]);
    assert_eq!(comp.layers()[1].kind, "flash");
    assert_eq!(comp.layers()[1].timeline().len(), 1);
    assert!(comp.layers()[2].timeline().is_empty());
    assert_eq!(comp.layers()[2].range, comp.frame_range());
}

#[test]
fn layer_configuration_errors_name_the_layer() {
    let doc = DOC.replace(r#""max_opacity": 0.12"#, r#""max_opacity": 3.0"#);
    let err = Composition::from_reader(doc.as_bytes()).unwrap_err();
    assert!(matches!(err, BeatfxError::Configuration(_)));
    assert!(err.to_string().contains("layer 'flash'"), "{err}");
}

#[test]
fn descending_timeline_is_a_configuration_error() {
    let doc = DOC.replace("[0.5, 1.0, 1.5]", "[1.0, 0.5]");
    let err = Composition::from_reader(doc.as_bytes()).unwrap_err();
    assert!(matches!(err, BeatfxError::Configuration(_)));
    assert!(err.to_string().contains("timeline 'beats'"), "{err}");
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = Composition::from_reader("{\"fps\":".as_bytes()).unwrap_err();
    assert!(matches!(err, BeatfxError::Serde(_)));
}

#[test]
fn unknown_layer_kind_is_rejected() {
    let doc = DOC.replace("orbit_dots", "lasers");
    assert!(Composition::from_reader(doc.as_bytes()).is_err());
}

#[test]
fn missing_file_is_reported_with_its_path() {
    let err = Composition::from_path("/definitely/not/here.json").unwrap_err();
    assert!(err.to_string().contains("/definitely/not/here.json"));
}

#[test]
fn missing_params_block_is_rejected() {
    let doc = DOC.replace(r#", "params": {"rings": 1}"#, "");
    let err = Composition::from_reader(doc.as_bytes()).unwrap_err();
    assert!(matches!(err, BeatfxError::Serde(_)));
    assert!(err.to_string().contains("params"), "{err}");
}

#[test]
fn fades_ramp_the_wrapper_opacity() {
    let doc = DOC.replace(
        r#""opacity": 0.5,"#,
        r#""opacity": 0.5, "fade_in": 10, "fade_out": 4,"#,
    );
    let comp = Composition::from_reader(doc.as_bytes()).unwrap();
    let flash = &comp.layers()[1];
    assert_eq!((flash.fade_in, flash.fade_out), (10, 4));

    assert_eq!(flash.opacity_at(FrameIndex(0)), 0.0);
    assert!((flash.opacity_at(FrameIndex(5)) - 0.25).abs() < 1e-12);
    assert_eq!(flash.opacity_at(FrameIndex(10)), 0.5);
    assert_eq!(flash.opacity_at(FrameIndex(25)), 0.5);
    // 30 frames long: local 29 is the last frame.
    assert!((flash.opacity_at(FrameIndex(27)) - 0.25).abs() < 1e-12);
    assert_eq!(flash.opacity_at(FrameIndex(29)), 0.0);

    // Layers without fades keep their declared opacity throughout.
    assert_eq!(comp.layers()[0].opacity_at(FrameIndex(0)), 1.0);
}
