//! Business logic services for the Strain Review Platform

pub mod catalog;
pub mod profile;
pub mod reporting;
pub mod review;
pub mod strain;
pub mod wishlist;

pub use catalog::CatalogService;
pub use profile::ProfileService;
pub use reporting::ReportingService;
pub use review::ReviewService;
pub use strain::StrainService;
pub use wishlist::WishlistService;
