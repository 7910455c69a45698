use super::*;

#[test]
fn canvas_rejects_zero_sides() {
    assert!(Canvas::new(0, 10).is_err());
    assert!(Canvas::new(10, 0).is_err());
    let c = Canvas::new(800, 600).unwrap();
    assert_eq!(c, Canvas::DEFAULT);
    assert_eq!(c.center_x(), 400.0);
    assert_eq!(c.rgba8_len(), 800 * 600 * 4);
}

#[test]
fn premul_of_opaque_is_identity() {
    assert_eq!(Rgba8::opaque(10, 20, 30).to_premul(), [10, 20, 30, 255]);
    let half = Rgba8 {
        r: 200,
        g: 100,
        b: 0,
        a: 128,
    };
    assert_eq!(half.to_premul(), [100, 50, 0, 128]);
}
