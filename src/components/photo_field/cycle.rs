//! Load-cycle coordination.
//!
//! A cycle is one run of catalog query, decode, width filter and thumbnail
//! fan-out. [`PhotoField`] is the state machine behind it: the browser side
//! performs the I/O and feeds results back in, tagged with the generation that
//! issued them. Anything tagged with a superseded generation is dropped on
//! arrival, which keeps a rapid series of resizes from mixing particles of
//! different catalog queries or stale sizes.
//!
//! Nothing here touches the DOM, so the whole pipeline runs under plain
//! `cargo test` with a fake image handle.

use log::{debug, info, warn};

use super::catalog::{filter_by_width, parse_catalog};
use super::config::FieldConfig;
use super::error::{CatalogError, ImageError};
use super::store::{Generation, ParticleStore};
use super::types::{ImageDescriptor, Particle, Point, Size};

/// Aggregate outcome of the current cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CycleStats {
	pub generation: Generation,
	/// The catalog request or its decoding failed.
	pub catalog_failed: bool,
	pub pages: usize,
	pub missing_info: usize,
	pub rejected_urls: usize,
	/// Pages that became descriptors.
	pub described: usize,
	pub too_small: usize,
	/// Thumbnail requests issued.
	pub accepted: usize,
	pub resolved: usize,
	pub failed: usize,
	/// Completions from earlier cycles that arrived during this one.
	pub stale: usize,
}

impl CycleStats {
	fn new(generation: Generation) -> Self {
		Self {
			generation,
			..Self::default()
		}
	}

	/// Every issued request has either resolved or failed.
	pub fn is_settled(&self) -> bool {
		self.resolved + self.failed == self.accepted
	}
}

/// What the browser side needs to start a cycle's catalog request.
#[derive(Clone, Debug, PartialEq)]
pub struct CyclePlan {
	pub generation: Generation,
	pub query_url: String,
	pub target_width: f64,
}

/// One thumbnail to load.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageRequest {
	pub generation: Generation,
	pub descriptor: ImageDescriptor,
	pub url: String,
	pub target_width: f64,
}

/// How an image completion was handled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Completion {
	Added,
	Failed,
	Stale,
}

/// Thumbnail width requested from the media host.
fn thumbnail_width(target_width: f64) -> u32 {
	target_width.round().max(1.0) as u32
}

/// Owns the particle store and drives load cycles.
pub struct PhotoField<H> {
	config: FieldConfig,
	bounds: Size,
	target_width: f64,
	store: ParticleStore<H>,
	stats: CycleStats,
}

impl<H> PhotoField<H> {
	pub fn new(config: FieldConfig, bounds: Size) -> Self {
		let target_width = config.target_width(bounds.width);
		Self {
			config,
			bounds,
			target_width,
			store: ParticleStore::new(),
			stats: CycleStats::default(),
		}
	}

	/// Empty the field and start a new cycle for a canvas of `bounds`.
	pub fn begin_cycle(&mut self, bounds: Size) -> CyclePlan {
		self.bounds = bounds;
		self.target_width = self.config.target_width(bounds.width);
		let generation = self.store.reset();
		self.stats = CycleStats::new(generation);

		info!(
			"photo-field: cycle {generation} started for {}x{} canvas, particle width {:.1}",
			bounds.width, bounds.height, self.target_width
		);

		CyclePlan {
			generation,
			query_url: self
				.config
				.endpoints
				.catalog_query(self.config.candidate_limit, self.config.preview_width),
			target_width: self.target_width,
		}
	}

	/// Turn the catalog result of cycle `generation` into thumbnail requests.
	///
	/// Returns nothing for superseded cycles, so their thumbnails are never
	/// fetched.
	pub fn accept_catalog(
		&mut self,
		generation: Generation,
		result: Result<String, CatalogError>,
	) -> Vec<ImageRequest> {
		if !self.store.is_current(generation) {
			debug!("photo-field: dropping catalog of superseded cycle {generation}");
			return Vec::new();
		}

		let listing = match result.and_then(|body| parse_catalog(&body, &self.config.endpoints)) {
			Ok(listing) => listing,
			Err(err) => {
				warn!("photo-field: cycle {generation} has no candidates: {err}");
				self.stats.catalog_failed = true;
				return Vec::new();
			}
		};

		let described = listing.descriptors.len();
		let (accepted, too_small) = filter_by_width(listing.descriptors, self.target_width);
		if too_small > 0 {
			debug!(
				"photo-field: {too_small} candidates narrower than {:.1}px",
				self.target_width
			);
		}

		self.stats.pages = listing.pages;
		self.stats.missing_info = listing.missing_info;
		self.stats.rejected_urls = listing.rejected_urls;
		self.stats.described = described;
		self.stats.too_small = too_small;
		self.stats.accepted = accepted.len();

		let width = thumbnail_width(self.target_width);
		let requests: Vec<ImageRequest> = accepted
			.into_iter()
			.map(|descriptor| ImageRequest {
				generation,
				url: self
					.config
					.endpoints
					.thumbnail(&descriptor.folder, &descriptor.file_name, width),
				target_width: self.target_width,
				descriptor,
			})
			.collect();

		info!(
			"photo-field: cycle {generation} listed {} pages, loading {} thumbnails",
			listing.pages,
			requests.len()
		);
		self.log_if_settled();
		requests
	}

	/// Record the outcome of loading `request`'s thumbnail.
	///
	/// On success the particle is placed uniformly at random within the
	/// current bounds; `unit` must yield values in `[0, 1)`.
	pub fn complete_image(
		&mut self,
		request: &ImageRequest,
		result: Result<H, ImageError>,
		unit: &mut impl FnMut() -> f64,
	) -> Completion {
		let image = match result {
			Ok(image) => image,
			Err(err) if self.store.is_current(request.generation) => {
				debug!("photo-field: {err}");
				self.stats.failed += 1;
				self.log_if_settled();
				return Completion::Failed;
			}
			Err(_) => return self.discard_stale(request.generation),
		};

		let position = Point::sample_in(self.bounds, unit);
		let particle = Particle::sized_for(
			image,
			position,
			request.target_width,
			request.descriptor.max_size,
		);

		match self.store.push(request.generation, particle) {
			Ok(()) => {
				self.stats.resolved += 1;
				self.log_if_settled();
				Completion::Added
			}
			Err(err) => {
				debug!("photo-field: {err}");
				self.discard_stale(request.generation)
			}
		}
	}

	/// Update the canvas bounds without starting a cycle.
	pub fn set_bounds(&mut self, bounds: Size) {
		self.bounds = bounds;
	}

	pub fn particles(&self) -> &[Particle<H>] {
		self.store.particles()
	}

	pub fn stats(&self) -> &CycleStats {
		&self.stats
	}

	pub fn generation(&self) -> Generation {
		self.store.generation()
	}

	pub fn bounds(&self) -> Size {
		self.bounds
	}

	pub fn config(&self) -> &FieldConfig {
		&self.config
	}

	fn discard_stale(&mut self, issued: Generation) -> Completion {
		debug!(
			"photo-field: discarding completion of cycle {issued} during {}",
			self.store.generation()
		);
		self.stats.stale += 1;
		Completion::Stale
	}

	fn log_if_settled(&self) {
		let s = &self.stats;
		if !s.is_settled() {
			return;
		}
		info!(
			"photo-field: cycle {} settled: {} of {} thumbnails shown, {} failed \
			 ({} pages, {} without metadata, {} unsupported, {} too small, {} stale)",
			s.generation,
			s.resolved,
			s.accepted,
			s.failed,
			s.pages,
			s.missing_info,
			s.rejected_urls,
			s.too_small,
			s.stale
		);
	}
}
