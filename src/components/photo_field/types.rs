//! Value types shared by the catalog pipeline and the renderer.

/// Width and height in CSS pixels. Also used for canvas bounds.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
	pub width: f64,
	pub height: f64,
}

impl Size {
	pub const fn new(width: f64, height: f64) -> Self {
		Self { width, height }
	}

	/// Width divided by height.
	pub fn aspect(self) -> f64 {
		self.width / self.height
	}
}

/// Canvas-space position of a particle's top-left corner.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	pub x: f64,
	pub y: f64,
}

impl Point {
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	/// Draw a point uniformly from `[0, width) x [0, height)`.
	///
	/// `unit` must yield values in `[0, 1)`, e.g. `js_sys::Math::random`.
	pub fn sample_in(bounds: Size, unit: &mut impl FnMut() -> f64) -> Self {
		let x = unit() * bounds.width;
		let y = unit() * bounds.height;
		Self { x, y }
	}
}

/// A candidate image decoded from the catalog: where it lives and how big the
/// original is.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageDescriptor {
	/// Native dimensions of the full-resolution upload.
	pub max_size: Size,
	/// Two-level hash folder, trailing slash included (e.g. `"a/ab/"`).
	pub folder: String,
	pub file_name: String,
}

impl ImageDescriptor {
	pub fn new(max_size: Size, folder: impl Into<String>, file_name: impl Into<String>) -> Self {
		Self {
			max_size,
			folder: folder.into(),
			file_name: file_name.into(),
		}
	}
}

/// A positioned, sized image drawn every frame.
///
/// `H` is the drawable handle; `HtmlImageElement` in the browser.
#[derive(Clone, Debug)]
pub struct Particle<H> {
	pub position: Point,
	pub image: H,
	pub size: Size,
}

impl<H> Particle<H> {
	pub fn new(image: H, position: Point, size: Size) -> Self {
		Self {
			position,
			image,
			size,
		}
	}

	/// Build a particle `target_width` wide, keeping the aspect ratio of the
	/// original upload.
	pub fn sized_for(image: H, position: Point, target_width: f64, max_size: Size) -> Self {
		let aspect = max_size.aspect();
		Self::new(
			image,
			position,
			Size::new(target_width, target_width / aspect),
		)
	}
}
