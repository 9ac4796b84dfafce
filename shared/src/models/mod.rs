//! Domain models for the Strain Review Platform

mod catalog;
mod profile;
mod review;
mod stats;

pub use catalog::*;
pub use profile::*;
pub use review::*;
pub use stats::*;
