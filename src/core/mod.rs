//! Core domain models for Conveyor
//!
//! This module defines the fundamental data structures that represent
//! pipelines and their steps.

pub mod config;
pub mod step;

pub use config::*;
pub use step::*;
