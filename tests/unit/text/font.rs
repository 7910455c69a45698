use super::*;

#[test]
fn empty_bytes_are_rejected() {
    assert!(FontFace::from_bytes(Vec::new(), 0, "empty").is_err());
}

#[test]
fn missing_font_file_is_an_error() {
    let err = FontChoice::File(PathBuf::from("definitely/not/here.ttf"))
        .resolve()
        .unwrap_err();
    assert!(err.to_string().contains("here.ttf"));
}

#[test]
fn face_choice_resolves_to_itself() {
    let face = FontFace::from_bytes(vec![1, 2, 3], 2, "inline").unwrap();
    let resolved = FontChoice::Face(face).resolve().unwrap();
    assert_eq!(resolved.bytes(), &[1, 2, 3]);
    assert_eq!(resolved.index(), 2);
    assert_eq!(resolved.label(), "inline");
}

#[test]
fn system_lookup_smoke_if_fonts_installed() {
    let Ok(face) = find_system_caption_font(CAPTION_FAMILIES) else {
        return;
    };
    assert!(!face.bytes().is_empty());
    assert!(!face.label().is_empty());
}
