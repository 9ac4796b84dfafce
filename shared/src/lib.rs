//! Shared types and scoring logic for the Strain Review Platform
//!
//! This crate contains the composite score calculation, grade and rank
//! classification, and the domain types shared between the backend and the
//! browser (via WASM).

pub mod coercion;
pub mod grading;
pub mod models;
pub mod scoring;
pub mod types;
pub mod validation;

pub use coercion::*;
pub use grading::*;
pub use models::*;
pub use scoring::*;
pub use types::*;
pub use validation::*;
