//! Byte-order conversion between wire (big-endian) and host order.
//!
//! Every multi-byte integer and IEEE-754 float in a WSR-88D message is
//! transmitted big-endian. Values read from the wire in native order are
//! passed through these functions once; applying a swap twice yields the
//! original value on every host.

use std::collections::BTreeMap;

pub fn swap_u16(value: u16) -> u16 {
    u16::from_be(value)
}

pub fn swap_i16(value: i16) -> i16 {
    i16::from_be(value)
}

pub fn swap_u32(value: u32) -> u32 {
    u32::from_be(value)
}

pub fn swap_i32(value: i32) -> i32 {
    i32::from_be(value)
}

/// Swaps a float by reinterpreting its bits as a 32-bit integer.
pub fn swap_f32(value: f32) -> f32 {
    f32::from_bits(u32::from_be(value.to_bits()))
}

/// Types whose wire representation can be converted to host order.
pub trait SwapBytes: Copy {
    fn swap_bytes_order(self) -> Self;
}

impl SwapBytes for u16 {
    fn swap_bytes_order(self) -> Self {
        swap_u16(self)
    }
}

impl SwapBytes for i16 {
    fn swap_bytes_order(self) -> Self {
        swap_i16(self)
    }
}

impl SwapBytes for u32 {
    fn swap_bytes_order(self) -> Self {
        swap_u32(self)
    }
}

impl SwapBytes for i32 {
    fn swap_bytes_order(self) -> Self {
        swap_i32(self)
    }
}

impl SwapBytes for f32 {
    fn swap_bytes_order(self) -> Self {
        swap_f32(self)
    }
}

/// Swaps every element of a slice in place.
pub fn swap_slice<T: SwapBytes>(values: &mut [T]) {
    for value in values.iter_mut() {
        *value = value.swap_bytes_order();
    }
}

/// Swaps every value of a map in place, leaving keys untouched.
pub fn swap_map<K: Ord, T: SwapBytes>(values: &mut BTreeMap<K, T>) {
    for value in values.values_mut() {
        *value = value.swap_bytes_order();
    }
}
