//! Planar surface-area estimation for parcel boundaries.
//!
//! Points are projected onto a local planar frame using fixed
//! metres-per-degree scale factors evaluated at the ring's centroid latitude
//! (an equirectangular approximation), then the Shoelace formula yields the
//! enclosed area. The approximation is only valid for small, human-scale
//! parcels; it accumulates error for large or high-latitude polygons and is
//! not geodesically exact.

use thiserror::Error;

use super::geo::RawPoint;

/// Metres per degree of latitude (mean meridian arc length).
pub const METERS_PER_DEGREE_LAT: f64 = 111_320.0;

/// Decimal places kept when an area value is persisted.
pub const AREA_STORAGE_DECIMALS: u32 = 2;

/// Failures raised by the estimator.
///
/// The estimator cannot fail on well-formed input: `cos` is total over finite
/// latitudes and the formula divides by a constant. Only non-finite input is
/// refused, so a NaN never propagates into a stored area.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AreaError {
    /// A vertex carried a NaN or infinite coordinate.
    #[error("vertex {vertex} has a non-finite coordinate")]
    NonFiniteInput {
        /// Zero-based index of the offending vertex.
        vertex: usize,
    },
}

/// Estimate the enclosed planar area of a vertex ring, in square metres.
///
/// Fewer than 3 points is a degenerate polygon and returns exactly `0.0`;
/// that is a defined fallback, not an error, because the live call path only
/// reaches this function after boundary validation has guaranteed four
/// points. Vertices are consumed in the given order (no re-sorting, no
/// convex hull) and the result is winding-insensitive: clockwise and
/// counter-clockwise listings of the same ring yield the same magnitude.
///
/// # Examples
/// ```
/// use backend::domain::{RawPoint, estimate_area};
///
/// let unit_ring = [
///     RawPoint { lat: 0.0, lng: 0.0 },
///     RawPoint { lat: 0.0, lng: 0.001 },
///     RawPoint { lat: 0.001, lng: 0.001 },
///     RawPoint { lat: 0.001, lng: 0.0 },
/// ];
/// let area = estimate_area(&unit_ring).expect("finite input");
/// assert!(area > 0.0);
/// ```
pub fn estimate_area(points: &[RawPoint]) -> Result<f64, AreaError> {
    if let Some(vertex) = points
        .iter()
        .position(|p| !p.lat.is_finite() || !p.lng.is_finite())
    {
        return Err(AreaError::NonFiniteInput { vertex });
    }

    if points.len() < 3 {
        return Ok(0.0);
    }

    // Plain mean of the latitudes, not an area-weighted centroid. Good
    // enough for the small rings this service accepts.
    #[expect(
        clippy::cast_precision_loss,
        reason = "vertex counts are tiny; f64 represents them exactly"
    )]
    let centroid_lat = points.iter().map(|p| p.lat).sum::<f64>() / points.len() as f64;

    let meters_per_degree_lng = METERS_PER_DEGREE_LAT * centroid_lat.to_radians().cos();

    let projected: Vec<(f64, f64)> = points
        .iter()
        .map(|p| {
            (
                p.lng * meters_per_degree_lng,
                p.lat * METERS_PER_DEGREE_LAT,
            )
        })
        .collect();

    let mut sum = 0.0;
    for (i, &(x_i, y_i)) in projected.iter().enumerate() {
        let &(x_j, y_j) = &projected[(i + 1) % projected.len()];
        sum += x_i * y_j;
        sum -= x_j * y_i;
    }

    Ok(sum.abs() / 2.0)
}

/// Round an area to the precision kept by the storage layer.
///
/// The estimator itself returns full-precision doubles; rounding is a
/// persistence concern applied once, immediately before a write.
#[must_use]
pub fn round_for_storage(area: f64) -> f64 {
    let scale = 10f64.powi(AREA_STORAGE_DECIMALS as i32);
    (area * scale).round() / scale
}
