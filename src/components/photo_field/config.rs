//! Field configuration: catalog endpoints, sampling sizes and colors.
//!
//! Every field has a default, so a host page only needs to spell out what it
//! wants to change.

use serde::Deserialize;

use super::endpoints::MediaEndpoints;
use super::error::ConfigError;

/// Upper bound the random generator accepts for `grnlimit`.
const MAX_CANDIDATES: u32 = 500;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	#[serde(default = "opaque")]
	pub a: f64,
}

fn opaque() -> f64 {
	1.0
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	pub const fn gray(v: u8) -> Self {
		Self::rgb(v, v, v)
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Tunables for one photo field.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
	pub endpoints: MediaEndpoints,
	/// Random files requested per cycle.
	pub candidate_limit: u32,
	/// Width of the server-side preview requested alongside the metadata.
	pub preview_width: u32,
	/// Particles are `canvas width / width_divisor` wide.
	pub width_divisor: f64,
	pub background: Color,
}

impl Default for FieldConfig {
	fn default() -> Self {
		Self {
			endpoints: MediaEndpoints::default(),
			candidate_limit: 100,
			preview_width: 100,
			width_divisor: 10.0,
			background: Color::gray(200),
		}
	}
}

impl FieldConfig {
	/// Parse a (possibly partial) JSON override and validate it.
	pub fn from_json(json: &str) -> Result<Self, ConfigError> {
		let config: FieldConfig =
			serde_json::from_str(json).map_err(|e| ConfigError::Decode(e.to_string()))?;
		config.validate()?;
		Ok(config)
	}

	pub fn validate(&self) -> Result<(), ConfigError> {
		if !(1..=MAX_CANDIDATES).contains(&self.candidate_limit) {
			return Err(ConfigError::Invalid(format!(
				"candidate_limit must be within 1..={MAX_CANDIDATES}, got {}",
				self.candidate_limit
			)));
		}
		if !(self.width_divisor.is_finite() && self.width_divisor > 0.0) {
			return Err(ConfigError::Invalid(format!(
				"width_divisor must be positive, got {}",
				self.width_divisor
			)));
		}
		Ok(())
	}

	/// Display width of every particle for a canvas `canvas_width` wide.
	pub fn target_width(&self, canvas_width: f64) -> f64 {
		canvas_width / self.width_divisor
	}
}
