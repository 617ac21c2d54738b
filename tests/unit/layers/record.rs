use super::*;

#[test]
fn non_finite_numbers_are_stored_as_zero() {
    let rec = RenderRecord::new(Element::Dot, 3)
        .num("x", f64::NAN)
        .num("y", f64::INFINITY)
        .num("size", 4.5);
    assert_eq!(rec.get_num("x"), Some(0.0));
    assert_eq!(rec.get_num("y"), Some(0.0));
    assert_eq!(rec.get_num("size"), Some(4.5));
}

#[test]
fn getters_check_the_value_kind() {
    let rec = RenderRecord::new(Element::Flash, 0)
        .num("opacity", 0.5)
        .color("color", Color::rgb(0xF7, 0x25, 0x85));
    assert_eq!(rec.get_text("color"), Some("#F72585"));
    assert_eq!(rec.get_num("color"), None);
    assert_eq!(rec.get_text("opacity"), None);
    assert_eq!(rec.get_points("missing"), None);
}

#[test]
fn records_serialize_with_flat_props() {
    let rec = RenderRecord::new(Element::BarMirror, 1).num("height", 2.0);
    let json = serde_json::to_value(&rec).unwrap();
    assert_eq!(json["element"], "bar_mirror");
    assert_eq!(json["index"], 1);
    assert_eq!(json["props"]["height"], 2.0);
}

#[test]
fn svg_path_data_is_closed() {
    let path = PathGeometry::new(vec![
        Point::new(0.0, 0.0),
        Point::new(10.0, 0.5),
        Point::new(0.0, 0.0),
    ]);
    assert_eq!(path.to_svg_d(), "M 0.00 0.00 L 10.00 0.50 L 0.00 0.00 Z");
    assert_eq!(PathGeometry::default().to_svg_d(), "");
}

#[test]
fn bez_path_has_one_segment_per_edge() {
    let path = PathGeometry::new(vec![
        Point::new(0.0, 0.0),
        Point::new(4.0, 0.0),
        Point::new(4.0, 3.0),
    ]);
    let bez = path.to_bez_path();
    // move, two lines, close
    assert_eq!(bez.elements().len(), 4);
    assert!(PathGeometry::default().to_bez_path().elements().is_empty());
}
