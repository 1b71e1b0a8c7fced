//! End-to-end load cycles driven through the public `PhotoField` API with a
//! fake image handle and a seeded sampler.

use photo_field::{
	CatalogError, Completion, FieldConfig, ImageError, PhotoField, Point, Size,
};

/// xorshift64* mapped onto `[0, 1)`.
fn seeded(mut state: u64) -> impl FnMut() -> f64 {
	move || {
		state ^= state >> 12;
		state ^= state << 25;
		state ^= state >> 27;
		let bits = state.wrapping_mul(0x2545_f491_4f6c_dd1d) >> 11;
		bits as f64 / (1u64 << 53) as f64
	}
}

const ONE_VALID_ONE_BARE: &str = r#"{
	"batchcomplete": "",
	"query": { "pages": {
		"-1": { "ns": 6, "title": "File:Missing.jpg", "missing": "" },
		"77": { "ns": 6, "title": "File:Lighthouse.jpg", "imageinfo": [{
			"url": "https://upload.wikimedia.org/wikipedia/commons/7/7e/Lighthouse.jpg",
			"width": 2400, "height": 1600, "sha1": "d1f0"
		}] }
	} }
}"#;

const ONLY_NARROW: &str = r#"{
	"query": { "pages": {
		"12": { "title": "File:Icon.jpg", "imageinfo": [{
			"url": "https://upload.wikimedia.org/wikipedia/commons/1/12/Icon.jpg",
			"width": 64, "height": 64
		}] }
	} }
}"#;

/// Run one cycle, resolving every requested thumbnail successfully.
fn run_cycle(field: &mut PhotoField<String>, bounds: Size, body: &str) -> usize {
	let mut unit = seeded(7);
	let plan = field.begin_cycle(bounds);
	let requests = field.accept_catalog(plan.generation, Ok(body.to_string()));
	for request in &requests {
		let handle = request.descriptor.file_name.clone();
		assert_eq!(
			field.complete_image(request, Ok(handle), &mut unit),
			Completion::Added
		);
	}
	requests.len()
}

#[test]
fn one_usable_page_makes_one_particle() {
	let mut field = PhotoField::new(FieldConfig::default(), Size::default());
	let bounds = Size::new(1200.0, 800.0);
	assert_eq!(run_cycle(&mut field, bounds, ONE_VALID_ONE_BARE), 1);

	let particles = field.particles();
	assert_eq!(particles.len(), 1);
	let p = &particles[0];
	assert_eq!(p.image, "Lighthouse.jpg");
	assert_eq!(p.size.width, 120.0);
	assert!((p.size.height - 120.0 / (2400.0 / 1600.0)).abs() < 1e-9);
	assert!((0.0..bounds.width).contains(&p.position.x));
	assert!((0.0..bounds.height).contains(&p.position.y));

	let stats = field.stats();
	assert_eq!((stats.pages, stats.missing_info, stats.resolved), (2, 1, 1));
	assert!(stats.is_settled());
}

#[test]
fn narrow_originals_make_no_particles() {
	let mut field = PhotoField::new(FieldConfig::default(), Size::default());
	assert_eq!(run_cycle(&mut field, Size::new(1200.0, 800.0), ONLY_NARROW), 0);
	assert!(field.particles().is_empty());
	assert_eq!(field.stats().too_small, 1);
}

#[test]
fn resize_mid_cycle_discards_late_loads() {
	let mut field = PhotoField::new(FieldConfig::default(), Size::default());
	let mut unit = seeded(99);

	let first = field.begin_cycle(Size::new(1200.0, 800.0));
	let stale = field.accept_catalog(first.generation, Ok(ONE_VALID_ONE_BARE.to_string()));
	assert_eq!(stale.len(), 1);

	// Window resized before the first thumbnail arrived.
	let second = field.begin_cycle(Size::new(600.0, 400.0));
	assert!(second.generation > first.generation);
	assert!(field.particles().is_empty());

	let fresh = field.accept_catalog(second.generation, Ok(ONE_VALID_ONE_BARE.to_string()));
	assert_eq!(
		field.complete_image(&fresh[0], Ok("new".to_string()), &mut unit),
		Completion::Added
	);
	assert_eq!(
		field.complete_image(&stale[0], Ok("old".to_string()), &mut unit),
		Completion::Stale
	);

	let images: Vec<&str> = field.particles().iter().map(|p| p.image.as_str()).collect();
	assert_eq!(images, vec!["new"]);
	assert_eq!(field.particles()[0].size.width, 60.0);
	assert_eq!(field.stats().stale, 1);
}

#[test]
fn failures_are_absorbed() {
	let mut field: PhotoField<String> = PhotoField::new(FieldConfig::default(), Size::default());
	let mut unit = seeded(3);

	let plan = field.begin_cycle(Size::new(1200.0, 800.0));
	let none = field.accept_catalog(
		plan.generation,
		Err(CatalogError::Transport("offline".into())),
	);
	assert!(none.is_empty());
	assert!(field.stats().catalog_failed);

	let plan = field.begin_cycle(Size::new(1200.0, 800.0));
	let requests = field.accept_catalog(plan.generation, Ok(ONE_VALID_ONE_BARE.to_string()));
	let err = ImageError::Load {
		url: requests[0].url.clone(),
	};
	assert_eq!(
		field.complete_image(&requests[0], Err(err), &mut unit),
		Completion::Failed
	);
	assert!(field.particles().is_empty());
	assert!(field.stats().is_settled());
}

#[test]
fn positions_are_roughly_uniform() {
	const SAMPLES: usize = 40_000;
	const CELLS: usize = 4;
	let bounds = Size::new(300.0, 200.0);
	let mut unit = seeded(0x5eed);
	let mut counts = [[0usize; CELLS]; CELLS];

	for _ in 0..SAMPLES {
		let p = Point::sample_in(bounds, &mut unit);
		assert!((0.0..bounds.width).contains(&p.x));
		assert!((0.0..bounds.height).contains(&p.y));
		let cx = (p.x / bounds.width * CELLS as f64) as usize;
		let cy = (p.y / bounds.height * CELLS as f64) as usize;
		counts[cy][cx] += 1;
	}

	let expected = (SAMPLES / (CELLS * CELLS)) as f64;
	for row in counts {
		for count in row {
			let deviation = (count as f64 - expected).abs() / expected;
			assert!(deviation < 0.1, "cell count {count} vs {expected}");
		}
	}
}
