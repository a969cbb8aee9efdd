//! Binary image loader tests.
//!
//! Covers the parity-alternating frame layout, silent truncation of a short
//! final frame, the frame-count bound, and re-load zeroing.

use std::io::Write;

use obvm_core::Machine;
use obvm_core::common::constants::MEMORY_CELLS;
use obvm_core::common::error::LoadError;

use crate::common::harness::{machine_with_image, pack_frames, temp_image_bytes};

#[test]
fn round_trips_frames_of_both_parities() {
    let frames = [
        (10.21, 0x12345678u32),
        (-2466.0, 0x9ABCDEF0),
        (std::f64::consts::PI, 0x00000007),
        (0.0, 0xFFFFFFFF),
        (1.0e-300, 42),
    ];
    let m = machine_with_image(&frames);
    for (addr, &(datum, word)) in frames.iter().enumerate() {
        assert_eq!(m.get_data(addr), datum, "data[{addr}]");
        assert_eq!(m.get_program(addr), u64::from(word), "program[{addr}]");
    }
    // Cells past the image stay zero.
    assert_eq!(m.get_data(frames.len()), 0.0);
    assert_eq!(m.get_program(frames.len()), 0);
}

#[test]
fn short_final_frame_truncates_silently() {
    let mut bytes = pack_frames(&[(1.5, 10), (2.5, 20)]);
    bytes.extend_from_slice(&[0xAA; 5]);
    let image = temp_image_bytes(&bytes);

    let mut m = Machine::new();
    m.load(image.path()).unwrap();
    assert_eq!(m.get_data(0), 1.5);
    assert_eq!(m.get_data(1), 2.5);
    assert_eq!(m.get_program(2), 0);
}

#[test]
fn empty_image_loads_nothing() {
    let image = temp_image_bytes(&[]);
    let mut m = Machine::new();
    m.load(image.path()).unwrap();
    assert_eq!(m.get_data(0), 0.0);
    assert_eq!(m.get_program(0), 0);
}

#[test]
fn more_frames_than_cells_is_an_error() {
    let frames: Vec<(f64, u32)> = (0..=MEMORY_CELLS).map(|i| (i as f64, i as u32)).collect();
    let image = temp_image_bytes(&pack_frames(&frames));
    let mut m = Machine::new();
    let err = m.load(image.path()).unwrap_err();
    assert!(matches!(err, LoadError::TooManyFrames), "{err}");
}

#[test]
fn exactly_full_image_is_accepted() {
    let frames: Vec<(f64, u32)> = (0..MEMORY_CELLS).map(|i| (i as f64, i as u32)).collect();
    let image = temp_image_bytes(&pack_frames(&frames));
    let mut m = Machine::new();
    m.load(image.path()).unwrap();
    assert_eq!(m.get_data(MEMORY_CELLS - 1), (MEMORY_CELLS - 1) as f64);
}

#[test]
fn reload_zeroes_the_previous_image() {
    let mut m = Machine::new();

    let first = temp_image_bytes(&pack_frames(&[(1.0, 11), (2.0, 22)]));
    m.load(first.path()).unwrap();

    let second = temp_image_bytes(&pack_frames(&[(9.0, 99)]));
    m.load(second.path()).unwrap();

    assert_eq!(m.get_data(0), 9.0);
    assert_eq!(m.get_program(0), 99);
    assert_eq!(m.get_data(1), 0.0);
    assert_eq!(m.get_program(1), 0);
}

#[test]
fn missing_file_is_an_io_error() {
    let mut m = Machine::new();
    let err = m.load("no/such/image.obf").unwrap_err();
    assert!(matches!(err, LoadError::Io(_)), "{err}");
}

#[test]
fn frame_bytes_use_the_alternating_layout() {
    // Hand-pack two frames to pin the wire format independently of the
    // helper: even frame [f64][u32], odd frame [u32][f64].
    let mut bytes = Vec::new();
    bytes.extend_from_slice(&3.5f64.to_le_bytes());
    bytes.extend_from_slice(&0xDEAD_BEEFu32.to_le_bytes());
    bytes.extend_from_slice(&0x0000_0001u32.to_le_bytes());
    bytes.extend_from_slice(&(-7.0f64).to_le_bytes());

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(&bytes).unwrap();
    file.flush().unwrap();

    let mut m = Machine::new();
    m.load(file.path()).unwrap();
    assert_eq!(m.get_data(0), 3.5);
    assert_eq!(m.get_program(0), 0xDEAD_BEEF);
    assert_eq!(m.get_data(1), -7.0);
    assert_eq!(m.get_program(1), 1);
}
