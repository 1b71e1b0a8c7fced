//! Leptos component wrapping the photo field canvas.
//!
//! The component sizes a canvas to the window, starts a load cycle on mount
//! and on every `resize`, and redraws the field via `requestAnimationFrame`.
//! Cycle I/O runs in `spawn_local` tasks that share the field through an
//! `Rc<RefCell<..>>`; borrows never span an `.await`.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement, Window};

use super::config::FieldConfig;
use super::cycle::PhotoField;
use super::fetch::{fetch_catalog, load_image};
use super::render;
use super::types::Size;

type SharedField = Rc<RefCell<PhotoField<HtmlImageElement>>>;

fn window_size(window: &Window) -> Size {
	let read = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
	Size::new(read(window.inner_width()), read(window.inner_height()))
}

/// Reset the field and run a full cycle in the background.
///
/// Earlier cycles keep running; their results are discarded when they land.
fn start_cycle(field: &SharedField, bounds: Size) {
	let plan = field.borrow_mut().begin_cycle(bounds);
	let field = Rc::clone(field);

	spawn_local(async move {
		let body = fetch_catalog(&plan.query_url).await;
		let requests = field.borrow_mut().accept_catalog(plan.generation, body);

		for request in requests {
			let field = Rc::clone(&field);
			spawn_local(async move {
				let result = load_image(&request.url).await;
				field
					.borrow_mut()
					.complete_image(&request, result, &mut js_sys::Math::random);
			});
		}
	});
}

/// Fullscreen canvas showing a freshly sampled field of Commons photographs.
///
/// A new sample is drawn whenever the window is resized.
#[component]
pub fn PhotoFieldCanvas(#[prop(optional)] config: Option<FieldConfig>) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let field: SharedField = Rc::new(RefCell::new(PhotoField::new(
		config.unwrap_or_default(),
		Size::default(),
	)));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let window: Window = web_sys::window().expect("photo-field needs a browser window");

		let bounds = window_size(&window);
		canvas.set_width(bounds.width as u32);
		canvas.set_height(bounds.height as u32);

		let ctx: CanvasRenderingContext2d = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into().ok())
			.expect("canvas has no 2d context");

		start_cycle(&field, bounds);

		let (field_resize, canvas_resize) = (field.clone(), canvas.clone());
		*resize_cb.borrow_mut() = Some(Closure::new(move || {
			let Some(win) = web_sys::window() else {
				return;
			};
			let bounds = window_size(&win);
			canvas_resize.set_width(bounds.width as u32);
			canvas_resize.set_height(bounds.height as u32);
			start_cycle(&field_resize, bounds);
		}));
		if let Some(ref cb) = *resize_cb.borrow() {
			let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}

		let (field_anim, animate_inner) = (field.clone(), animate.clone());
		*animate.borrow_mut() = Some(Closure::new(move || {
			render::render(&field_anim.borrow(), &ctx);
			if let (Some(win), Some(cb)) = (web_sys::window(), animate_inner.borrow().as_ref()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	view! {
		<canvas
			node_ref=canvas_ref
			class="photo-field-canvas"
			style="display: block;"
		/>
	}
}
