use super::*;
use crate::canvas::buffer::Canvas;
use crate::foundation::core::Rgb8;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("unit_sink").join(name);
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

#[test]
fn in_memory_sink_captures_in_order() {
    let mut sink = InMemorySink::new();
    sink.begin(SinkConfig { fps: 24 }).unwrap();
    sink.push_frame(0, &Frame::blank(), "a").unwrap();
    sink.push_frame(1, &Frame::blank(), "b").unwrap();
    sink.end().unwrap();

    assert_eq!(sink.config().unwrap().fps, 24);
    assert!(sink.ended());
    let ticks: Vec<u64> = sink.frames().iter().map(|(t, _, _)| *t).collect();
    assert_eq!(ticks, vec![0, 1]);
    assert_eq!(sink.frames()[1].2, "b");
}

#[test]
fn begin_resets_captured_frames() {
    let mut sink = InMemorySink::new();
    sink.begin(SinkConfig { fps: 1 }).unwrap();
    sink.push_frame(0, &Frame::blank(), "").unwrap();
    sink.begin(SinkConfig { fps: 1 }).unwrap();
    assert!(sink.frames().is_empty());
}

#[test]
fn png_sequence_writes_numbered_files() {
    let dir = scratch_dir("sequence");
    let mut sink = PngSequenceSink::new(&dir, 2);
    sink.begin(SinkConfig { fps: 24 }).unwrap();

    let mut canvas = Canvas::new();
    canvas.set(0, 0, Rgb8::new(255, 0, 0));
    sink.push_frame(7, &Frame::from_canvas(&canvas), "").unwrap();
    sink.end().unwrap();

    assert_eq!(sink.written(), 1);
    let path = sink.path_for(7);
    assert!(path.ends_with("frame_00007.png"));
    let img = image::open(&path).unwrap().to_rgb8();
    assert_eq!(img.dimensions(), (64, 64));
    assert_eq!(img.get_pixel(1, 1).0, [255, 0, 0]);
}

#[test]
fn write_png_creates_parent_dirs() {
    let dir = scratch_dir("single");
    let path = dir.join("nested").join("one.png");
    write_png(&Frame::blank(), &path, 1).unwrap();
    assert!(path.exists());
}
