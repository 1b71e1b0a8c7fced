//! Error types for each stage of a load cycle.
//!
//! None of these are fatal: the cycle controller logs them and carries on
//! with whatever else resolved.

use super::store::Generation;

/// The catalog query could not produce a listing.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
	#[error("catalog request failed: {0}")]
	Transport(String),

	#[error("catalog request returned HTTP {0}")]
	Status(u16),

	#[error("catalog response could not be decoded: {0}")]
	Decode(String),

	#[error("catalog API error {code}: {info}")]
	Api { code: String, info: String },
}

/// A thumbnail could not be turned into a drawable image.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ImageError {
	#[error("image failed to load: {url}")]
	Load { url: String },

	#[error("could not create image element: {0}")]
	Create(String),
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreError {
	#[error("completion from cycle {issued} arrived during cycle {current}")]
	Stale {
		issued: Generation,
		current: Generation,
	},
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
	#[error("field config is not valid JSON: {0}")]
	Decode(String),

	#[error("invalid field config: {0}")]
	Invalid(String),
}
