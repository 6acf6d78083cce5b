use super::*;

fn patterned() -> Canvas {
    let mut c = Canvas::new();
    for x in 0..SCREEN_WIDTH {
        for y in 0..SCREEN_HEIGHT {
            c.set(
                x as i32,
                y as i32,
                Rgb8::new(x as u8, y as u8, (x * 7 + y * 3) as u8),
            );
        }
    }
    c
}

#[test]
fn encoded_length_is_fixed() {
    assert_eq!(encode(&Canvas::new()).len(), FRAME_LEN);
    assert_eq!(Frame::blank().as_bytes().len(), FRAME_LEN);
}

#[test]
fn every_channel_lands_at_its_offset() {
    let canvas = patterned();
    let bytes = encode(&canvas);
    for x in 0..SCREEN_WIDTH {
        for y in 0..SCREEN_HEIGHT {
            let px = canvas.get(x as i32, y as i32).unwrap().to_array();
            for c in 0..SCREEN_COLORS {
                assert_eq!(bytes[offset(x, y, c)], px[c], "x={x} y={y} c={c}");
            }
        }
    }
}

#[test]
fn x_is_the_outer_axis() {
    let mut canvas = Canvas::new();
    canvas.set(0, 1, Rgb8::new(1, 2, 3));
    canvas.set(1, 0, Rgb8::new(4, 5, 6));
    let bytes = encode(&canvas);
    assert_eq!(&bytes[3..6], &[1, 2, 3]);
    assert_eq!(&bytes[96..99], &[4, 5, 6]);
}

#[test]
fn decode_rejects_wrong_length() {
    let err = Frame::decode(&[0; 10]).unwrap_err();
    assert!(matches!(
        err,
        SignError::FrameLength {
            expected: FRAME_LEN,
            actual: 10
        }
    ));
}

#[test]
fn decode_restores_canvas() {
    let canvas = patterned();
    let frame = Frame::decode(&encode(&canvas)).unwrap();
    assert_eq!(frame.to_canvas(), canvas);
    assert_eq!(frame.pixel(3, 4), Some(Rgb8::new(3, 4, 33)));
    assert_eq!(frame.pixel(32, 0), None);
}

#[test]
fn preview_image_is_row_major_and_scaled() {
    let mut canvas = Canvas::new();
    canvas.set(2, 0, Rgb8::new(200, 10, 10));
    let img = Frame::from_canvas(&canvas).to_rgb_image(4);
    assert_eq!(img.dimensions(), (128, 128));
    assert_eq!(img.get_pixel(8, 0).0, [200, 10, 10]);
    assert_eq!(img.get_pixel(11, 3).0, [200, 10, 10]);
    assert_eq!(img.get_pixel(0, 8).0, [0, 0, 0]);
}

#[test]
fn digest_is_stable_hex() {
    let a = Frame::blank().digest_hex();
    assert_eq!(a.len(), 64);
    assert_eq!(a, Frame::blank().digest_hex());
    assert_ne!(a, Frame::from_canvas(&patterned()).digest_hex());
}
