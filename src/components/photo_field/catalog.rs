//! Decoding of the random-file catalog response into image descriptors, and
//! the width filter applied before any thumbnail is requested.

use std::collections::BTreeMap;

use log::debug;
use serde::Deserialize;

use super::endpoints::MediaEndpoints;
use super::error::CatalogError;
use super::types::{ImageDescriptor, Size};

#[derive(Debug, Deserialize)]
struct CatalogResponse {
	#[serde(default)]
	query: Option<QueryBlock>,
	#[serde(default)]
	error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct QueryBlock {
	#[serde(default)]
	pages: BTreeMap<String, Page>,
}

#[derive(Debug, Deserialize)]
struct Page {
	#[serde(default)]
	title: Option<String>,
	#[serde(default)]
	imageinfo: Option<Vec<ImageInfo>>,
}

#[derive(Debug, Deserialize)]
struct ImageInfo {
	#[serde(default)]
	url: Option<String>,
	#[serde(default)]
	width: Option<f64>,
	#[serde(default)]
	height: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
	#[serde(default)]
	code: String,
	#[serde(default)]
	info: String,
}

impl Page {
	/// Source URL and native size of the page's first revision, if complete.
	fn image_source(&self) -> Option<(&str, Size)> {
		let info = self.imageinfo.as_ref()?.first()?;
		let (width, height) = (info.width?, info.height?);
		if width <= 0.0 || height <= 0.0 {
			return None;
		}
		Some((info.url.as_deref()?, Size::new(width, height)))
	}
}

/// Descriptors decoded from one catalog response, with per-reason skip counts.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CatalogListing {
	pub descriptors: Vec<ImageDescriptor>,
	/// Pages present in the response.
	pub pages: usize,
	/// Pages without usable `imageinfo`.
	pub missing_info: usize,
	/// Pages whose source URL is not a two-level `.jpg` upload.
	pub rejected_urls: usize,
}

/// Decode a catalog response body.
///
/// A body without a `query` block is an empty listing; the API omits it when
/// the generator matched nothing.
pub fn parse_catalog(body: &str, endpoints: &MediaEndpoints) -> Result<CatalogListing, CatalogError> {
	let response: CatalogResponse =
		serde_json::from_str(body).map_err(|e| CatalogError::Decode(e.to_string()))?;

	if let Some(err) = response.error {
		return Err(CatalogError::Api {
			code: err.code,
			info: err.info,
		});
	}

	let pages = response.query.map(|q| q.pages).unwrap_or_default();
	let mut listing = CatalogListing {
		pages: pages.len(),
		..CatalogListing::default()
	};

	for (key, page) in &pages {
		let label = page.title.as_deref().unwrap_or(key);

		let Some((url, max_size)) = page.image_source() else {
			debug!("photo-field: skipping {label}: no usable image metadata");
			listing.missing_info += 1;
			continue;
		};

		let Some((folder, file_name)) = endpoints.parse_source(url) else {
			debug!("photo-field: skipping {label}: unsupported source {url}");
			listing.rejected_urls += 1;
			continue;
		};

		listing
			.descriptors
			.push(ImageDescriptor::new(max_size, folder, file_name));
	}

	Ok(listing)
}

/// Keep descriptors at least `target_width` wide natively, so thumbnails are
/// never upscaled. Returns the survivors and how many were dropped.
pub fn filter_by_width(
	descriptors: Vec<ImageDescriptor>,
	target_width: f64,
) -> (Vec<ImageDescriptor>, usize) {
	let total = descriptors.len();
	let kept: Vec<ImageDescriptor> = descriptors
		.into_iter()
		.filter(|d| target_width <= d.max_size.width)
		.collect();
	let dropped = total - kept.len();
	(kept, dropped)
}

#[cfg(test)]
mod tests {
	use super::*;

	const MIXED: &str = r#"{
		"batchcomplete": "",
		"query": {
			"pages": {
				"101": { "pageid": 101, "ns": 6, "title": "File:Notes.pdf" },
				"102": {
					"pageid": 102, "ns": 6, "title": "File:Harbour.jpg",
					"imageinfo": [{
						"url": "https://upload.wikimedia.org/wikipedia/commons/3/3c/Harbour.jpg",
						"width": 4000, "height": 3000, "sha1": "abc"
					}]
				},
				"103": {
					"title": "File:Diagram.svg",
					"imageinfo": [{
						"url": "https://upload.wikimedia.org/wikipedia/commons/d/d4/Diagram.svg",
						"width": 512, "height": 512
					}]
				},
				"104": { "title": "File:Broken.jpg", "imageinfo": [{ "url": "https://upload.wikimedia.org/wikipedia/commons/b/b1/Broken.jpg" }] },
				"105": { "title": "File:Empty.jpg", "imageinfo": [] }
			}
		}
	}"#;

	fn descriptor(width: f64) -> ImageDescriptor {
		ImageDescriptor::new(Size::new(width, 100.0), "a/ab/", "Example.jpg")
	}

	#[test]
	fn keeps_only_complete_jpeg_pages() {
		let listing = parse_catalog(MIXED, &MediaEndpoints::default()).unwrap();
		assert_eq!(listing.pages, 5);
		assert_eq!(listing.missing_info, 3);
		assert_eq!(listing.rejected_urls, 1);
		assert_eq!(
			listing.descriptors,
			vec![ImageDescriptor::new(
				Size::new(4000.0, 3000.0),
				"3/3c/",
				"Harbour.jpg"
			)]
		);
	}

	#[test]
	fn missing_query_block_is_empty() {
		let listing = parse_catalog(r#"{"batchcomplete":""}"#, &MediaEndpoints::default()).unwrap();
		assert_eq!(listing, CatalogListing::default());
	}

	#[test]
	fn zero_dimensions_count_as_missing_info() {
		let body = r#"{"query":{"pages":{"1":{"imageinfo":[{
			"url":"https://upload.wikimedia.org/wikipedia/commons/a/ab/Flat.jpg",
			"width":640,"height":0}]}}}}"#;
		let listing = parse_catalog(body, &MediaEndpoints::default()).unwrap();
		assert!(listing.descriptors.is_empty());
		assert_eq!(listing.missing_info, 1);
	}

	#[test]
	fn api_error_object_is_surfaced() {
		let body = r#"{"error":{"code":"maxlag","info":"Waiting for a database server"}}"#;
		assert_eq!(
			parse_catalog(body, &MediaEndpoints::default()),
			Err(CatalogError::Api {
				code: "maxlag".into(),
				info: "Waiting for a database server".into()
			})
		);
	}

	#[test]
	fn invalid_json_is_a_decode_error() {
		assert!(matches!(
			parse_catalog("<html>", &MediaEndpoints::default()),
			Err(CatalogError::Decode(_))
		));
	}

	#[test]
	fn width_filter_holds_invariant() {
		let input: Vec<_> = [50.0, 99.0, 100.0, 101.0, 3000.0]
			.into_iter()
			.map(descriptor)
			.collect();
		let (kept, dropped) = filter_by_width(input, 100.0);
		assert_eq!(dropped, 2);
		assert_eq!(kept.len(), 3);
		assert!(kept.iter().all(|d| 100.0 <= d.max_size.width));
		assert_eq!(kept[0].max_size.width, 100.0);
	}
}
