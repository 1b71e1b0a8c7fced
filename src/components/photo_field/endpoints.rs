//! URL construction and parsing for the Commons catalog and media hosts.
//!
//! Originals live under `/wikipedia/commons/{h1}/{h2}/{file}` where `h1` and
//! `h2` are the leading characters of the file name's hash. Thumbnails mirror
//! that layout under `/thumb/` with a `{width}px-` prefixed leaf.

use serde::Deserialize;

const COMMONS_PATH: &str = "/wikipedia/commons/";
/// MediaWiki namespace holding `File:` pages.
const FILE_NAMESPACE: u32 = 6;

/// Hosts the field talks to.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct MediaEndpoints {
	/// MediaWiki API endpoint used for the random-file query.
	pub api: String,
	/// Origin serving original uploads and scaled thumbnails.
	pub media_origin: String,
}

impl Default for MediaEndpoints {
	fn default() -> Self {
		Self {
			api: "https://commons.wikimedia.org/w/api.php".into(),
			media_origin: "https://upload.wikimedia.org".into(),
		}
	}
}

impl MediaEndpoints {
	/// Query for `limit` random files with url, size and sha1 metadata plus a
	/// server-side preview `preview_width` pixels wide.
	pub fn catalog_query(&self, limit: u32, preview_width: u32) -> String {
		format!(
			"{}?origin=*&action=query&format=json&prop=imageinfo&iiprop=url|size|sha1\
			 &generator=random&iiurlwidth={preview_width}&grnnamespace={FILE_NAMESPACE}\
			 &grnlimit={limit}",
			self.api
		)
	}

	/// Thumbnail of `file_name` scaled to `width` pixels.
	pub fn thumbnail(&self, folder: &str, file_name: &str, width: u32) -> String {
		format!(
			"{}{COMMONS_PATH}thumb/{folder}{file_name}/{width}px-{file_name}",
			self.origin()
		)
	}

	/// Split a full-resolution JPEG URL into `(folder, file_name)`.
	///
	/// Returns `None` for anything that is not exactly two hash segments
	/// followed by a `.jpg` leaf on the media origin.
	pub fn parse_source(&self, url: &str) -> Option<(String, String)> {
		let rest = url.strip_prefix(self.origin())?.strip_prefix(COMMONS_PATH)?;
		let mut parts = rest.splitn(3, '/');
		let (h1, h2, file_name) = (parts.next()?, parts.next()?, parts.next()?);

		if !is_hash_segment(h1) || !is_hash_segment(h2) || file_name.contains('/') {
			return None;
		}
		let stem = file_name.strip_suffix(".jpg")?;
		if stem.is_empty() {
			return None;
		}

		Some((format!("{h1}/{h2}/"), file_name.to_string()))
	}

	fn origin(&self) -> &str {
		self.media_origin.trim_end_matches('/')
	}
}

fn is_hash_segment(segment: &str) -> bool {
	(1..=2).contains(&segment.len())
		&& segment
			.bytes()
			.all(|b| b.is_ascii_digit() || b.is_ascii_lowercase())
}
