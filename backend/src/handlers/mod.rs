//! HTTP request handlers

pub mod catalog;
pub mod health;
pub mod profile;
pub mod reporting;
pub mod review;
pub mod score;
pub mod strain;

pub use catalog::{add_product, get_product, lookup_upc};
pub use health::health_check;
pub use profile::{add_to_wishlist, get_profile, remove_from_wishlist};
pub use reporting::get_stats;
pub use review::{export_reviews, get_review, list_reviews, submit_review};
pub use score::preview_score;
pub use strain::{import_example_strains, list_strains};
