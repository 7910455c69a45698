use super::*;

#[test]
fn defaults_match_editor_start_state() {
    let s = StyleConfig::default();
    assert_eq!(s.top_font_scale, 10);
    assert_eq!(s.bottom_font_scale, 10);
    assert_eq!(s.text_color, TextColor::White);
    assert_eq!(s.top_offset_percent, 5);
    assert_eq!(s.bottom_offset_percent, 5);
}

#[test]
fn clamping_pulls_values_into_range() {
    let s = StyleConfig {
        top_font_scale: 0,
        bottom_font_scale: 99,
        text_color: TextColor::Yellow,
        top_offset_percent: 200,
        bottom_offset_percent: 50,
    }
    .clamped();
    assert_eq!(s.top_font_scale, 5);
    assert_eq!(s.bottom_font_scale, 20);
    assert_eq!(s.top_offset_percent, 50);
    assert_eq!(s.bottom_offset_percent, 50);
}

#[test]
fn patch_merges_only_present_fields() {
    let s = StyleConfig::default().merged(&StylePatch {
        bottom_font_scale: Some(15),
        text_color: Some(TextColor::Black),
        top_offset_percent: Some(80),
        ..StylePatch::default()
    });
    assert_eq!(s.top_font_scale, 10);
    assert_eq!(s.bottom_font_scale, 15);
    assert_eq!(s.text_color, TextColor::Black);
    assert_eq!(s.top_offset_percent, 50);
    assert_eq!(s.bottom_offset_percent, 5);
}

#[test]
fn outline_always_contrasts_with_fill() {
    for c in [TextColor::White, TextColor::Yellow, TextColor::Black] {
        assert_ne!(c.fill(), c.stroke());
    }
    assert_eq!(TextColor::Black.stroke(), Rgba8::WHITE);
    assert_eq!(TextColor::Yellow.fill(), Rgba8::opaque(255, 215, 0));
}

#[test]
fn text_color_parses_case_insensitively() {
    assert_eq!("Yellow".parse::<TextColor>().unwrap(), TextColor::Yellow);
    assert!("purple".parse::<TextColor>().is_err());
}

#[test]
fn blank_captions_are_not_drawn() {
    let mut c = CaptionText::new("", "SAKKYO");
    assert!(!c.is_drawn(CaptionBand::Top));
    assert!(c.is_drawn(CaptionBand::Bottom));
    c.set(CaptionBand::Top, "  \n ");
    assert!(!c.is_drawn(CaptionBand::Top));
    c.set(CaptionBand::Top, "SALARY AAYO");
    assert_eq!(c.get(CaptionBand::Top), "SALARY AAYO");
}

#[test]
fn style_json_uses_camel_case() {
    let json = serde_json::to_value(StyleConfig::default()).unwrap();
    assert_eq!(json["topFontScale"], 10);
    assert_eq!(json["textColor"], "white");
    let patch: StylePatch = serde_json::from_str(r#"{"bottomOffsetPercent": 12}"#).unwrap();
    assert_eq!(patch.bottom_offset_percent, Some(12));
    assert_eq!(patch.top_font_scale, None);
}
