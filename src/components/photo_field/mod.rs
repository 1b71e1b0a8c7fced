//! Field of randomly sampled Commons photographs.
//!
//! Each load cycle asks the Commons API for a batch of random files, keeps the
//! JPEG uploads wide enough for the current canvas, loads a scaled thumbnail
//! of each, and scatters the results over a fullscreen canvas:
//! - Catalog query and thumbnail URLs built from [`MediaEndpoints`]
//! - Generation-tagged [`ParticleStore`] so late loads from an earlier cycle
//!   are discarded instead of drawn
//! - Per-cycle [`CycleStats`] logged when every thumbnail has settled
//!
//! # Example
//!
//! ```ignore
//! use photo_field::{FieldConfig, PhotoFieldCanvas};
//!
//! view! { <PhotoFieldCanvas config=FieldConfig::default() /> }
//! ```

mod catalog;
mod component;
pub mod config;
mod cycle;
pub mod endpoints;
mod error;
mod fetch;
mod render;
mod store;
mod types;

pub use catalog::{CatalogListing, filter_by_width, parse_catalog};
pub use component::PhotoFieldCanvas;
pub use config::{Color, FieldConfig};
pub use cycle::{Completion, CyclePlan, CycleStats, ImageRequest, PhotoField};
pub use endpoints::MediaEndpoints;
pub use error::{CatalogError, ConfigError, ImageError, StoreError};
pub use store::{Generation, ParticleStore};
pub use types::{ImageDescriptor, Particle, Point, Size};
