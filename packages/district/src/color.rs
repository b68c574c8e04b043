//! Deterministic district colors.
//!
//! A district's fill color is a pure function of its key text: the MD5
//! digest of the UTF-8 bytes, read as a little-endian integer, supplies
//! the low three bytes as blue, green, red. Identical keys hash to the
//! identical color on every run and every machine. MD5 serves as a
//! stable scrambler here, not as a cryptographic primitive.

use jochome_map_district_models::FillColor;

/// Derives the fill color of a district key.
///
/// Always called with the bare key, never with a label carrying the
/// disconnection marker.
#[must_use]
pub fn fill_color(key: &str) -> FillColor {
    let digest = md5::compute(key.as_bytes());
    let hash = u128::from_le_bytes(digest.0);

    #[allow(clippy::cast_possible_truncation)]
    let (b, g, r) = (
        (hash & 0xFF) as u8,
        ((hash >> 8) & 0xFF) as u8,
        ((hash >> 16) & 0xFF) as u8,
    );

    FillColor::new(r, g, b, FillColor::GROUP_ALPHA)
}
