//! Use-case orchestration.
//!
//! # Responsibility
//! - Turn UI and decoder callbacks into history, counter and navigation effects.
//! - Keep UI layers decoupled from storage and classification details.

pub mod session;
