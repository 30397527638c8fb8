//! Conversions between a 64-bit long and the two 32-bit slots it occupies on
//! the operand stack and in the local variable array.
//!
//! The high half always comes first: it is pushed first and stored at the
//! lower local index.

const LOW_MASK: i64 = 0xFFFF_FFFF;

/// Split `value` into its `(high, low)` halves, each reinterpreted as signed.
pub fn split64(value: i64) -> (i32, i32) {
    let high = ((value >> 32) & LOW_MASK) as u32 as i32;
    let low = (value & LOW_MASK) as u32 as i32;

    (high, low)
}

/// Join a `(high, low)` pair back into a long. Inverse of [`split64`].
pub fn combine32(high: i32, low: i32) -> i64 {
    let high = (high as i64 & LOW_MASK) << 32;
    let low = low as i64 & LOW_MASK;

    high | low
}
