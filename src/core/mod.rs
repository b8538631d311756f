//! Core module - Contains the fundamental data structures and utilities
//!
//! This module provides:
//! - Error taxonomy
//! - Identifier and path humanizing
//! - Icon handles and decoded images
//! - Path normalization utilities
//! - Output records and their renderers

pub mod error;
pub mod humanize;
pub mod icon;
pub mod model;
pub mod paths;
pub mod render;
