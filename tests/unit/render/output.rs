use super::*;

fn checker(width: u32, height: u32) -> RenderedMeme {
    let mut data = Vec::new();
    for y in 0..height {
        for x in 0..width {
            let v = if (x + y) % 2 == 0 { 255 } else { 0 };
            data.extend_from_slice(&[v, 0, 255 - v, 255]);
        }
    }
    RenderedMeme {
        width,
        height,
        data,
    }
}

#[test]
fn export_names_carry_the_timestamp() {
    assert_eq!(
        export_file_name(1_700_000_000_123),
        "memebot-nepal-1700000000123.png"
    );
    let p = timestamped_export_path(Path::new("out")).unwrap();
    let name = p.file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("memebot-nepal-"));
    assert!(name.ends_with(".png"));
}

#[test]
fn png_encoding_preserves_pixels() {
    let meme = checker(3, 2);
    let png = meme.encode_png().unwrap();
    let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (3, 2));
    assert_eq!(decoded.into_raw(), meme.data);
}

#[test]
fn bad_lengths_fail_to_encode() {
    let meme = RenderedMeme {
        width: 4,
        height: 4,
        data: vec![0; 7],
    };
    assert!(meme.encode_png().is_err());
}

#[test]
fn save_png_creates_parent_dirs() {
    let dir = std::env::temp_dir().join(format!(
        "memebot_output_test_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    let path = dir.join("nested").join("meme.png");
    let meme = checker(2, 2);
    meme.save_png(&path).unwrap();
    assert!(path.exists());
    assert_eq!(meme.pixel(1, 0), Some([0, 0, 255, 255]));
    std::fs::remove_dir_all(&dir).ok();
}
