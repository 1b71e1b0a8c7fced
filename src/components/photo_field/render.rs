//! Canvas rendering for the photo field.

use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

use super::cycle::PhotoField;

/// Paint the background, then every particle of the current cycle.
pub fn render(field: &PhotoField<HtmlImageElement>, ctx: &CanvasRenderingContext2d) {
	let bounds = field.bounds();

	ctx.set_fill_style_str(&field.config().background.to_css());
	ctx.fill_rect(0.0, 0.0, bounds.width, bounds.height);

	for particle in field.particles() {
		// A broken handle only loses its own particle.
		let _ = ctx.draw_image_with_html_image_element_and_dw_and_dh(
			&particle.image,
			particle.position.x,
			particle.position.y,
			particle.size.width,
			particle.size.height,
		);
	}
}
