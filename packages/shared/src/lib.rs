//! Shared utilities for Tsudoi.

pub mod logger;
pub mod time;
