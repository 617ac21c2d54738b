use super::*;

const CANVAS: Canvas = Canvas {
    width: 1920,
    height: 1080,
};

#[test]
fn transforms_map_the_unit_draw() {
    assert_eq!(FieldTransform::Affine { min: 30.0, range: 100.0 }.apply(0.5, CANVAS), 80.0);
    assert_eq!(FieldTransform::CanvasX.apply(0.25, CANVAS), 480.0);
    assert_eq!(FieldTransform::CanvasY.apply(0.5, CANVAS), 540.0);
    let b = FieldTransform::Bucket { categories: 3 };
    assert_eq!(b.apply(0.0, CANVAS), 0.0);
    assert_eq!(b.apply(0.34, CANVAS), 1.0);
    assert_eq!(b.apply(0.999_999, CANVAS), 2.0);
}

#[test]
fn only_canvas_transforms_depend_on_canvas() {
    assert!(FieldTransform::CanvasX.depends_on_canvas());
    assert!(!FieldTransform::Bucket { categories: 2 }.depends_on_canvas());
}

#[test]
fn validation_catches_bad_specs() {
    assert!(validate_specs(&[FieldSpec::affine("a", 0.0, 1.0), FieldSpec::bucket("b", 3)]).is_ok());
    assert!(validate_specs(&[FieldSpec::affine("a", 0.0, 1.0), FieldSpec::affine("a", 0.0, 2.0)]).is_err());
    assert!(validate_specs(&[FieldSpec::bucket("t", 0)]).is_err());
    assert!(validate_specs(&[FieldSpec::affine("", 0.0, 1.0)]).is_err());
    assert!(validate_specs(&[FieldSpec::affine("n", f64::NAN, 1.0)]).is_err());
}

#[test]
fn signature_tracks_names_and_transforms() {
    let a = [FieldSpec::affine("x", 0.0, 1.0)];
    let b = [FieldSpec::affine("x", 0.0, 2.0)];
    let c = [FieldSpec::affine("y", 0.0, 1.0)];
    assert_eq!(specs_signature(&a), specs_signature(&a.clone()));
    assert_ne!(specs_signature(&a), specs_signature(&b));
    assert_ne!(specs_signature(&a), specs_signature(&c));
}
