use super::*;
use serde_json::json;

#[test]
fn parses_hex_forms() {
    assert_eq!("#ffffff".parse::<Color>().unwrap(), Color::WHITE);
    assert_eq!("#325FA2".parse::<Color>().unwrap(), Color::rgb(0x32, 0x5f, 0xa2));
    assert_eq!(
        "#00000080".parse::<Color>().unwrap(),
        Color::rgba(0, 0, 0, 0x80)
    );
    assert_eq!("#f00".parse::<Color>().unwrap(), Color::rgb(255, 0, 0));
    assert!("#12345".parse::<Color>().is_err());
    assert!("#gg0000".parse::<Color>().is_err());
}

#[test]
fn parses_functional_forms() {
    assert_eq!(
        "rgb(255,255,255)".parse::<Color>().unwrap(),
        Color::WHITE
    );
    assert_eq!(
        "rgba( 10, 20, 30, 0.5 )".parse::<Color>().unwrap(),
        Color::rgba(10, 20, 30, 128)
    );
    assert!("rgb(1,2)".parse::<Color>().is_err());
}

#[test]
fn parses_named_colors_case_insensitively() {
    assert_eq!("red".parse::<Color>().unwrap(), Color::rgb(255, 0, 0));
    assert_eq!("HotPink".parse::<Color>().unwrap(), Color::rgb(255, 0x69, 0xb4));
    assert_eq!("transparent".parse::<Color>().unwrap(), Color::TRANSPARENT);
    assert!("notacolor".parse::<Color>().is_err());
}

#[test]
fn premul_applies_opacity() {
    let c = Color::rgb(255, 0, 0).to_premul(0.5);
    assert_eq!(c.a, 128);
    assert_eq!(c.r, 128);
    assert_eq!(Color::WHITE.to_premul(0.0).a, 0);
}

#[test]
fn serde_accepts_css_strings_and_arrays() {
    let c: Color = serde_json::from_value(json!("#ff000080")).unwrap();
    assert_eq!(c, Color::rgba(255, 0, 0, 128));

    let c: Color = serde_json::from_value(json!([1, 2, 3])).unwrap();
    assert_eq!(c, Color::rgb(1, 2, 3));

    assert!(serde_json::from_value::<Color>(json!([1, 2])).is_err());
    assert_eq!(serde_json::to_value(Color::WHITE).unwrap(), json!("#ffffffff"));
}
