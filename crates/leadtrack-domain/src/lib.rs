//! Domain types shared across Leadtrack crates.
//!
//! This crate contains only pure types with no framework dependencies.
//! Import in `usecase/` and `domain/` layers; never in `infra/` or `handlers/`.

pub mod field;
pub mod pagination;
pub mod role;
