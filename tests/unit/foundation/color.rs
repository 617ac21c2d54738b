use super::*;

#[test]
fn parses_rgb_and_rgba_hex() {
    assert_eq!(Color::parse_hex("#F72585").unwrap(), Color::rgb(0xF7, 0x25, 0x85));
    assert_eq!(
        Color::parse_hex("4cc9f080").unwrap(),
        Color::rgba(0x4C, 0xC9, 0xF0, 0x80)
    );
    assert!(Color::parse_hex("#FFF").is_err());
    assert!(Color::parse_hex("#GG0000").is_err());
}

#[test]
fn alpha_suffix_rounds_like_an_overlay_byte() {
    let c = Color::WHITE;
    assert_eq!(c.to_hex_with_alpha(0.15), "#FFFFFF26");
    assert_eq!(c.to_hex_with_alpha(0.0), "#FFFFFF00");
    assert_eq!(c.to_hex_with_alpha(f64::NAN), "#FFFFFF00");
}

#[test]
fn serde_accepts_hex_and_arrays() {
    let c: Color = serde_json::from_str("\"#7209B7\"").unwrap();
    assert_eq!(c, Color::rgb(0x72, 0x09, 0xB7));
    let c: Color = serde_json::from_str("[1.0, 0.0, 0.0, 0.5]").unwrap();
    assert_eq!(c, Color::rgba(255, 0, 0, 128));
    assert_eq!(serde_json::to_string(&Color::rgb(1, 2, 3)).unwrap(), "\"#010203\"");
    assert!(serde_json::from_str::<Color>("[1.0]").is_err());
}
