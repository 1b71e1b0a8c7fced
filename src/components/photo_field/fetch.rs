//! Browser-side asynchronous I/O: the catalog request and thumbnail loads.
//!
//! Both wrap a JS promise in a [`JsFuture`] so the cycle task can `.await`
//! them without blocking the animation loop.

use js_sys::{Function, Promise};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{HtmlImageElement, Response};

use super::error::{CatalogError, ImageError};

/// Best-effort human readable text for a thrown JS value.
fn js_message(value: &JsValue) -> String {
	value
		.as_string()
		.or_else(|| {
			value
				.dyn_ref::<js_sys::Error>()
				.map(|e| String::from(e.message()))
		})
		.unwrap_or_else(|| format!("{value:?}"))
}

/// GET `url` and return the response body as text.
pub async fn fetch_catalog(url: &str) -> Result<String, CatalogError> {
	let window = web_sys::window().ok_or_else(|| CatalogError::Transport("no window".into()))?;

	let response = JsFuture::from(window.fetch_with_str(url))
		.await
		.map_err(|e| CatalogError::Transport(js_message(&e)))?;
	let response: Response = response
		.dyn_into()
		.map_err(|e| CatalogError::Transport(js_message(&e)))?;

	if !response.ok() {
		return Err(CatalogError::Status(response.status()));
	}

	let text = response
		.text()
		.map_err(|e| CatalogError::Transport(js_message(&e)))?;
	let body = JsFuture::from(text)
		.await
		.map_err(|e| CatalogError::Transport(js_message(&e)))?;

	body.as_string()
		.ok_or_else(|| CatalogError::Decode("response body is not text".into()))
}

/// Load `url` into a fresh image element, resolving once it is decoded.
pub async fn load_image(url: &str) -> Result<HtmlImageElement, ImageError> {
	let image = HtmlImageElement::new().map_err(|e| ImageError::Create(js_message(&e)))?;

	let loaded = Promise::new(&mut |resolve: Function, reject: Function| {
		image.set_onload(Some(&resolve));
		image.set_onerror(Some(&reject));
	});
	image.set_src(url);

	let outcome = JsFuture::from(loaded).await;
	image.set_onload(None);
	image.set_onerror(None);

	match outcome {
		Ok(_) => Ok(image),
		Err(_) => Err(ImageError::Load {
			url: url.to_string(),
		}),
	}
}
