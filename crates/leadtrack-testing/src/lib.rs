//! Test utilities for Leadtrack services.
//!
//! Import from test code only.

pub mod auth;
