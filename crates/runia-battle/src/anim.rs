//! The swing animation curve.
//!
//! Horizontal sprite offsets the external renderer applies to the acting
//! character while a pending action counts down, indexed by the remaining
//! countdown. The table's length also fixes the default countdown, so
//! animation duration and input latency move together.

/// Sprite-position offsets, indexed by the remaining countdown. The
/// curve starts far out, closes to its nearest approach, and settles.
pub const SWING_CURVE: [i32; 30] = [
    81, 81, 81, 81, 81, 81, 81, 80, 80, 80, 80, 78, 78, 77, 72, 65, 56, 45, 33, 23, 15, 8, 3, 20,
    35, 48, 59, 68, 75, 80,
];

/// The default number of ticks a queued action animates before it can be
/// confirmed: one pass through the curve.
pub const DEFAULT_PENDING_TICKS: usize = SWING_CURVE.len() - 1;

/// Offset for the given countdown, saturating at the top of the curve.
pub fn offset_at(countdown: usize) -> i32 {
    SWING_CURVE[countdown.min(SWING_CURVE.len() - 1)]
}
