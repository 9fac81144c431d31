//! Analytics API
//!
//! **WARNING: This is an internal crate. Do not depend on it directly.**
//! **Use `analytics-facade` instead for a stable public API.**
//!
//! Configuration types for the analytics engine. Every trailing window and
//! tuning knob is passed in explicitly through these structs.

mod config;

pub use config::*;
