//! TMDB image URL construction.

/// Base URL of the TMDB image CDN.
pub const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/";

/// Default rendition for posters and backdrops.
pub const DEFAULT_IMAGE_SIZE: &str = "w500";

/// Image shown when a record has no artwork.
pub const PLACEHOLDER_IMAGE: &str = "/placeholder.svg";

/// Builds the full image URL for `path` at `size` (e.g. `w185`, `original`).
///
/// Returns `PLACEHOLDER_IMAGE` when `path` is absent or empty.
#[must_use]
pub fn image_url(path: Option<&str>, size: &str) -> String {
    match path {
        Some(p) if !p.is_empty() => format!("{IMAGE_BASE_URL}{size}{p}"),
        _ => String::from(PLACEHOLDER_IMAGE),
    }
}
