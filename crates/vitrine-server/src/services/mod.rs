//! Domain services over the sync coordinator.
//!
//! These adapters own nothing but field translation: they map the gallery
//! and promotion field shapes onto [`crate::sync::SyncCoordinator`] calls
//! and shape listing output for the API.

pub mod gallery;
pub mod promotions;

pub use gallery::{GalleryService, ImageSummary};
pub use promotions::{PromotionFields, PromotionService};
