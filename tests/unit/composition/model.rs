use super::*;

use crate::layers::flash::FlashConfig;

fn def() -> CompositionDef {
    CompositionDef {
        fps: Fps { num: 30, den: 1 },
        canvas: Canvas {
            width: 1920,
            height: 1080,
        },
        duration: FrameIndex(90),
        timelines: BTreeMap::from([("beats".to_owned(), vec![0.5, 1.0])]),
        layers: vec![LayerInstanceDef {
            id: "flash".to_owned(),
            range: None,
            z: 0,
            opacity: 1.0,
            fade_in: 0,
            fade_out: 0,
            timeline: Some("beats".to_owned()),
            spec: LayerSpec::Flash(FlashConfig::default()),
        }],
    }
}

#[test]
fn well_formed_document_validates() {
    def().validate().unwrap();
}

#[test]
fn missing_range_spans_the_whole_composition() {
    let d = def();
    let r = d.layers[0].range_or(d.duration);
    assert_eq!(r.start, FrameIndex(0));
    assert_eq!(r.end, FrameIndex(90));
}

#[test]
fn zero_fps_and_empty_canvas_are_rejected() {
    let mut d = def();
    d.fps.den = 0;
    assert!(d.validate().is_err());

    let mut d = def();
    d.canvas.height = 0;
    assert!(d.validate().is_err());

    let mut d = def();
    d.duration = FrameIndex(0);
    assert!(d.validate().is_err());
}

#[test]
fn layer_range_must_fit_the_duration() {
    let mut d = def();
    d.layers[0].range = Some(FrameRange {
        start: FrameIndex(10),
        end: FrameIndex(91),
    });
    let err = d.validate().unwrap_err().to_string();
    assert!(err.contains("exceeds composition duration"), "{err}");

    d.layers[0].range = Some(FrameRange {
        start: FrameIndex(20),
        end: FrameIndex(10),
    });
    assert!(d.validate().is_err());
}

#[test]
fn unknown_timeline_reference_is_rejected() {
    let mut d = def();
    d.layers[0].timeline = Some("downbeats".to_owned());
    let err = d.validate().unwrap_err().to_string();
    assert!(err.contains("missing timeline 'downbeats'"), "{err}");
}

#[test]
fn duplicate_ids_are_rejected() {
    let mut d = def();
    let dup = d.layers[0].clone();
    d.layers.push(dup);
    assert!(matches!(d.validate(), Err(BeatfxError::Validation(_))));
}

#[test]
fn wrapper_opacity_must_be_a_fraction() {
    let mut d = def();
    d.layers[0].opacity = 1.2;
    assert!(d.validate().is_err());
    d.layers[0].opacity = f64::NAN;
    assert!(d.validate().is_err());
}

#[test]
fn fades_must_fit_inside_the_range() {
    let mut d = def();
    d.layers[0].fade_in = 60;
    d.layers[0].fade_out = 30;
    d.validate().unwrap();
    d.layers[0].fade_out = 31;
    let err = d.validate().unwrap_err();
    assert!(matches!(err, BeatfxError::Validation(_)));
    assert!(err.to_string().contains("fades"), "{err}");
}

#[test]
fn layer_json_flattens_kind_and_params() {
    let json = r##"{
        "id": "bars",
        "range": {"start": 0, "end": 30},
        "timeline": "beats",
        "kind": "frequency_bars",
        "params": {"count": 8, "colors": ["#F72585", "#4CC9F0"]}
    }"##;
    let l: LayerInstanceDef = serde_json::from_str(json).unwrap();
    assert_eq!(l.z, 0);
    assert_eq!(l.opacity, 1.0);
    assert_eq!((l.fade_in, l.fade_out), (0, 0));
    assert_eq!(l.spec.kind_name(), "frequency_bars");
    assert_eq!(l.range.map(|r| r.end), Some(FrameIndex(30)));
}
