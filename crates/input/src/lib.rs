//! Input state: which arrow keys are held, and the movement they produce.
//!
//! # Invariants
//! - The movement vector is recomputed only when key state changes, never
//!   per frame.
//! - Opposing keys held together cancel exactly (Up+Down nets to zero).
//!
//! Key identifiers from the host windowing system are mapped to [`ArrowKey`]
//! in the application layer; unrecognized keys never reach this crate.

mod keys;

pub use keys::{ArrowKey, KeyState, MoveVector};

pub fn crate_info() -> &'static str {
    "rollfield-input v0.1.0"
}
