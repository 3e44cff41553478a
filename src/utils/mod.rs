//! Utility functions and helpers
//!
//! This module contains date and time-of-day helpers.

pub mod time;

pub use time::{current_window, format_hhmm, now_local, today, window_around};
