//! photo-field: a fullscreen canvas scattered with random Commons photographs.
//!
//! This crate provides a WASM component that samples random files from
//! Wikimedia Commons, loads thumbnails sized to the window, and draws them at
//! random positions. Every window resize draws a fresh sample.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::photo_field::{
	CatalogError, Color, Completion, CyclePlan, CycleStats, FieldConfig, Generation,
	ImageDescriptor, ImageError, ImageRequest, MediaEndpoints, Particle, ParticleStore,
	PhotoField, PhotoFieldCanvas, Point, Size,
};

/// Id of the optional `<script type="application/json">` holding config overrides.
const CONFIG_ELEMENT_ID: &str = "photo-field-config";

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("photo-field: logging initialized");
}

/// Load field configuration from a script element with id="photo-field-config".
/// Missing element means defaults; invalid JSON is reported and ignored.
pub fn load_field_config() -> FieldConfig {
	let Some(json_text) = config_script_text() else {
		return FieldConfig::default();
	};

	match FieldConfig::from_json(&json_text) {
		Ok(config) => {
			info!(
				"photo-field: loaded config ({} candidates per cycle)",
				config.candidate_limit
			);
			config
		}
		Err(e) => {
			warn!("photo-field: ignoring config overrides: {}", e);
			FieldConfig::default()
		}
	}
}

fn config_script_text() -> Option<String> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id(CONFIG_ELEMENT_ID)?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	script.text().ok()
}

/// Main application component.
/// Reads configuration from the DOM and renders the fullscreen field.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_field_config();

	view! {
		<Html attr:lang="en" attr:dir="ltr" />
		<Title text="photo-field" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="fullscreen-field" style="position: fixed; inset: 0; overflow: hidden;">
			<PhotoFieldCanvas config=config />
		</div>
	}
}
