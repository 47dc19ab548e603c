//! Tests for the aligned lane buffer.

use super::lanes::{F32x8, LaneBuffer, LANES};

#[test]
fn test_f32x8_is_one_aligned_register() {
    assert_eq!(std::mem::size_of::<F32x8>(), 32);
    assert_eq!(std::mem::align_of::<F32x8>(), 32);
}

#[test]
fn test_filled_rounds_storage_up_to_whole_groups() {
    let buffer = LaneBuffer::filled(10, 1.5).unwrap();
    assert_eq!(buffer.len(), 10);
    assert_eq!(buffer.lanes().len(), 2);
    assert!(buffer.iter().all(|&v| v == 1.5));
}

#[test]
fn test_storage_is_32_byte_aligned() {
    for len in [1, 7, 8, 9, 64, 1000] {
        let buffer = LaneBuffer::filled(len, 0.0).unwrap();
        assert_eq!(buffer.as_ptr() as usize % 32, 0, "len {len}");
    }
}

#[test]
fn test_flat_and_lane_views_share_memory() {
    let values: Vec<f32> = (0..16).map(|i| i as f32).collect();
    let mut buffer = LaneBuffer::from_slice(&values).unwrap();
    assert_eq!(buffer.lanes()[1].0[3], 11.0);

    buffer.lanes_mut()[0].0[2] = -1.0;
    assert_eq!(buffer[2], -1.0);

    buffer[9] = 42.0;
    assert_eq!(buffer.lanes()[1].0[1], 42.0);
}

#[test]
fn test_padding_is_hidden_from_flat_view_and_equality() {
    let mut a = LaneBuffer::from_slice(&[1.0, 2.0, 3.0]).unwrap();
    let b = LaneBuffer::from_slice(&[1.0, 2.0, 3.0]).unwrap();
    a.lanes_mut()[0].0[LANES - 1] = 99.0;
    assert_eq!(a.len(), 3);
    assert_eq!(a, b);
    assert_eq!(a.to_vec(), vec![1.0, 2.0, 3.0]);
}

#[test]
fn test_fill_all_and_empty() {
    let mut buffer = LaneBuffer::filled(9, 0.0).unwrap();
    buffer.fill_all(7.0);
    assert!(buffer.lanes().iter().all(|lane| *lane == F32x8::splat(7.0)));

    let empty = LaneBuffer::filled(0, 0.0).unwrap();
    assert!(empty.is_empty());
    assert!(empty.lanes().is_empty());
}
