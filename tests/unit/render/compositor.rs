use super::*;
use crate::model::style::TextColor;
use crate::text::font::{CAPTION_FAMILIES, FontFace, find_system_caption_font};

fn fontless() -> MemeCompositor {
    MemeCompositor::new(FontChoice::File(std::path::PathBuf::from(
        "/nonexistent/memebot/caption.ttf",
    )))
}

fn compositor_if_font_present() -> Option<MemeCompositor> {
    if let Ok(path) = std::env::var("MEMEBOT_FONT")
        && let Ok(face) = FontFace::from_file(std::path::Path::new(&path))
    {
        return Some(MemeCompositor::new(FontChoice::Face(face)));
    }
    let face = find_system_caption_font(CAPTION_FAMILIES).ok()?;
    Some(MemeCompositor::new(FontChoice::Face(face)))
}

fn premul(c: Rgba8) -> [u8; 4] {
    c.to_premul()
}

#[test]
fn background_only_render_copies_the_image_without_a_font() {
    let bg = Bitmap::solid(64, 48, [40, 120, 200]).unwrap();
    let mut c = fontless();
    let out = c
        .render(Some(&bg), &CaptionText::new("   ", ""), &StyleConfig::default())
        .unwrap();
    assert_eq!((out.width, out.height), (64, 48));
    assert_eq!(out.data, bg.rgba8_premul());
}

#[test]
fn rendering_is_idempotent() {
    let bg = Bitmap::solid(32, 32, [200, 10, 10]).unwrap();
    let mut c = fontless();
    let a = c
        .render(Some(&bg), &CaptionText::default(), &StyleConfig::default())
        .unwrap();
    let b = c
        .render(Some(&bg), &CaptionText::default(), &StyleConfig::default())
        .unwrap();
    assert_eq!(a, b);
}

#[test]
fn transparent_pixels_flatten_onto_white() {
    let bg = Bitmap::from_premul_rgba8(2, 2, vec![0; 16]).unwrap();
    let out = fontless()
        .render(Some(&bg), &CaptionText::default(), &StyleConfig::default())
        .unwrap();
    assert!(out.data.chunks_exact(4).all(|px| px == [255, 255, 255, 255]));
}

#[test]
fn placeholder_is_default_sized_and_dark() {
    let out = fontless()
        .render(None, &CaptionText::default(), &StyleConfig::default())
        .unwrap();
    assert_eq!((out.width, out.height), (800, 600));
    assert_eq!(out.pixel(10, 300), Some(premul(PLACEHOLDER_BG)));
    assert!(out.data.chunks_exact(4).all(|px| px[3] == 255));
    // The cross passes through the center.
    assert_ne!(out.pixel(400, 300), Some(premul(PLACEHOLDER_BG)));
    // Both diagonals are stroked.
    assert_eq!(out.pixel(200, 150), Some(premul(PLACEHOLDER_CROSS)));
    assert_eq!(out.pixel(600, 150), Some(premul(PLACEHOLDER_CROSS)));
    assert_eq!(out.pixel(600, 450), Some(premul(PLACEHOLDER_BG)));
}

#[test]
fn generating_overlay_takes_the_background_size() {
    let bg = Bitmap::solid(120, 90, [1, 2, 3]).unwrap();
    let out = fontless()
        .render_generating(Some(&bg), &CaptionText::default(), &StyleConfig::default())
        .unwrap();
    assert_eq!((out.width, out.height), (120, 90));
    assert_eq!(out.pixel(3, 3), Some(premul(PLACEHOLDER_BG)));
}

#[test]
fn captions_without_a_font_are_a_render_error() {
    let bg = Bitmap::solid(64, 48, [0, 0, 0]).unwrap();
    let err = fontless()
        .render(Some(&bg), &CaptionText::new("momo", ""), &StyleConfig::default())
        .unwrap_err();
    assert!(err.is_render());
}

#[test]
fn oversized_canvas_is_rejected() {
    let bg = Bitmap::solid(70_000, 1, [0, 0, 0]).unwrap();
    let err = fontless()
        .render(Some(&bg), &CaptionText::default(), &StyleConfig::default())
        .unwrap_err();
    assert!(err.is_render());
}

#[test]
fn captions_are_drawn_only_inside_their_bands() {
    let Some(mut c) = compositor_if_font_present() else {
        return;
    };
    let bg_rgb = [40, 120, 200];
    let bg = Bitmap::solid(800, 600, bg_rgb).unwrap();
    let captions = CaptionText::new("When salary comes", "Gone in 2 days");
    let out = c.render(Some(&bg), &captions, &StyleConfig::default()).unwrap();
    let bg_px = [bg_rgb[0], bg_rgb[1], bg_rgb[2], 255];

    let row_changed = |y: u32| (0..800).any(|x| out.pixel(x, y) != Some(bg_px));
    // 5% offsets: the top band starts at y=30 and the bottom band ends at y=570.
    assert!((30..130).any(row_changed));
    assert!((470..570).any(row_changed));
    assert!(!row_changed(300));
    assert!(!row_changed(5));
    assert!(!row_changed(595));

    let white = [255, 255, 255, 255];
    let black = [0, 0, 0, 255];
    assert!(out.data.chunks_exact(4).any(|px| px == white));
    assert!(out.data.chunks_exact(4).any(|px| px == black));

    let again = c.render(Some(&bg), &captions, &StyleConfig::default()).unwrap();
    assert_eq!(out, again);
}

#[test]
fn yellow_captions_fill_with_gold() {
    let Some(mut c) = compositor_if_font_present() else {
        return;
    };
    let bg = Bitmap::solid(400, 300, [90, 90, 90]).unwrap();
    let style = StyleConfig {
        text_color: TextColor::Yellow,
        ..StyleConfig::default()
    };
    let out = c
        .render(Some(&bg), &CaptionText::new("DAL BHAT POWER", ""), &style)
        .unwrap();
    assert!(out.data.chunks_exact(4).any(|px| px == [255, 215, 0, 255]));
}
