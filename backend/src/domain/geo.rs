//! Geographic primitives for parcel boundaries.
//!
//! A parcel boundary is an ordered ring of exactly [`BOUNDARY_VERTICES`]
//! coordinates; vertex *i* connects to vertex *i + 1 mod 4*, and insertion
//! order is significant both for rendering and for the area estimator.
//! Validation collects every violation instead of stopping at the first so
//! clients can surface all problems in one round trip.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of vertices in a parcel boundary ring.
pub const BOUNDARY_VERTICES: usize = 4;

/// Inclusive latitude bounds in degrees.
pub const LATITUDE_RANGE: (f64, f64) = (-90.0, 90.0);

/// Inclusive longitude bounds in degrees.
pub const LONGITUDE_RANGE: (f64, f64) = (-180.0, 180.0);

/// Axis of a geographic coordinate, used to pinpoint validation failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// North/south component.
    Lat,
    /// East/west component.
    Lng,
}

impl Axis {
    /// Field-name spelling used in client-facing error details.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lat => "lat",
            Self::Lng => "lng",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unvalidated latitude/longitude pair as submitted by clients.
///
/// Inbound adapters decode request payloads into this shape before handing
/// them to [`Boundary::from_points`]; nothing is guaranteed about the values,
/// including finiteness.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawPoint {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
}

/// Range failure for a single coordinate axis.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoordinateError {
    /// Latitude missing, non-finite, or outside [`LATITUDE_RANGE`].
    #[error("latitude must be between -90 and 90 degrees, got {value}")]
    LatitudeOutOfRange {
        /// Offending value.
        value: f64,
    },
    /// Longitude missing, non-finite, or outside [`LONGITUDE_RANGE`].
    #[error("longitude must be between -180 and 180 degrees, got {value}")]
    LongitudeOutOfRange {
        /// Offending value.
        value: f64,
    },
}

fn latitude_in_range(value: f64) -> bool {
    let (min, max) = LATITUDE_RANGE;
    value.is_finite() && value >= min && value <= max
}

fn longitude_in_range(value: f64) -> bool {
    let (min, max) = LONGITUDE_RANGE;
    value.is_finite() && value >= min && value <= max
}

/// One vertex of a parcel boundary.
///
/// ## Invariants
/// - `lat` is finite and within [`LATITUDE_RANGE`].
/// - `lng` is finite and within [`LONGITUDE_RANGE`].
///
/// Serialises as `{"lat": .., "lng": ..}`; deserialisation re-validates so
/// stored boundaries cannot smuggle out-of-range values back into the domain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CoordinateDto", into = "CoordinateDto")]
pub struct Coordinate {
    lat: f64,
    lng: f64,
}

impl Coordinate {
    /// Validate and construct a coordinate.
    ///
    /// Reports the latitude failure first when both axes are out of range;
    /// callers needing every violation at once should go through
    /// [`Boundary::from_points`].
    pub fn new(lat: f64, lng: f64) -> Result<Self, CoordinateError> {
        if !latitude_in_range(lat) {
            return Err(CoordinateError::LatitudeOutOfRange { value: lat });
        }
        if !longitude_in_range(lng) {
            return Err(CoordinateError::LongitudeOutOfRange { value: lng });
        }
        Ok(Self { lat, lng })
    }

    /// Latitude in degrees.
    #[must_use]
    pub const fn lat(&self) -> f64 {
        self.lat
    }

    /// Longitude in degrees.
    #[must_use]
    pub const fn lng(&self) -> f64 {
        self.lng
    }
}

impl From<Coordinate> for RawPoint {
    fn from(value: Coordinate) -> Self {
        Self {
            lat: value.lat,
            lng: value.lng,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct CoordinateDto {
    lat: f64,
    lng: f64,
}

impl From<Coordinate> for CoordinateDto {
    fn from(value: Coordinate) -> Self {
        Self {
            lat: value.lat,
            lng: value.lng,
        }
    }
}

impl TryFrom<CoordinateDto> for Coordinate {
    type Error = CoordinateError;

    fn try_from(value: CoordinateDto) -> Result<Self, Self::Error> {
        Self::new(value.lat, value.lng)
    }
}

/// A single boundary validation failure.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BoundaryViolation {
    /// Wrong vertex count; raised regardless of the vertices' content.
    #[error("a plot boundary must have exactly 4 points, got {actual}")]
    Shape {
        /// Number of points actually supplied.
        actual: usize,
    },
    /// A vertex axis is out of range (or non-finite).
    #[error("vertex {vertex}: {source}")]
    Range {
        /// Zero-based index of the offending vertex.
        vertex: usize,
        /// Axis that failed its bound.
        axis: Axis,
        /// Underlying range failure.
        source: CoordinateError,
    },
}

/// Every violation found while validating a submitted boundary.
///
/// Guaranteed non-empty when returned as the `Err` arm of
/// [`Boundary::from_points`].
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryViolations(Vec<BoundaryViolation>);

impl BoundaryViolations {
    /// Iterate over the collected violations.
    pub fn iter(&self) -> impl Iterator<Item = &BoundaryViolation> {
        self.0.iter()
    }

    /// Number of collected violations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no violations were collected; never true for returned errors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl IntoIterator for BoundaryViolations {
    type Item = BoundaryViolation;
    type IntoIter = std::vec::IntoIter<BoundaryViolation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl fmt::Display for BoundaryViolations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for violation in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{violation}")?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for BoundaryViolations {}

/// Ordered four-vertex polygon ring defining a parcel's extent.
///
/// The fixed-length array makes the cardinality invariant structural: a
/// constructed `Boundary` always holds exactly [`BOUNDARY_VERTICES`] valid
/// coordinates in submission order. JSON round-trips preserve order exactly
/// (no deduplication, no reordering).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Coordinate>", into = "Vec<Coordinate>")]
pub struct Boundary([Coordinate; BOUNDARY_VERTICES]);

impl Boundary {
    /// Validate a submitted point sequence into a boundary.
    ///
    /// Collects every violation: a wrong cardinality is reported alongside
    /// any per-vertex range failures found in the points that were supplied,
    /// so a five-point submission with one bad latitude yields both errors.
    pub fn from_points(points: &[RawPoint]) -> Result<Self, BoundaryViolations> {
        let mut violations = Vec::new();

        if points.len() != BOUNDARY_VERTICES {
            violations.push(BoundaryViolation::Shape {
                actual: points.len(),
            });
        }

        for (vertex, point) in points.iter().enumerate() {
            if !latitude_in_range(point.lat) {
                violations.push(BoundaryViolation::Range {
                    vertex,
                    axis: Axis::Lat,
                    source: CoordinateError::LatitudeOutOfRange { value: point.lat },
                });
            }
            if !longitude_in_range(point.lng) {
                violations.push(BoundaryViolation::Range {
                    vertex,
                    axis: Axis::Lng,
                    source: CoordinateError::LongitudeOutOfRange { value: point.lng },
                });
            }
        }

        if !violations.is_empty() {
            return Err(BoundaryViolations(violations));
        }

        let mut ring = [Coordinate { lat: 0.0, lng: 0.0 }; BOUNDARY_VERTICES];
        for (slot, point) in ring.iter_mut().zip(points) {
            *slot = Coordinate {
                lat: point.lat,
                lng: point.lng,
            };
        }
        Ok(Self(ring))
    }

    /// The ring's vertices in submission order.
    #[must_use]
    pub const fn points(&self) -> &[Coordinate; BOUNDARY_VERTICES] {
        &self.0
    }

    /// The ring's vertices as raw points, for the area estimator.
    #[must_use]
    pub fn raw_points(&self) -> [RawPoint; BOUNDARY_VERTICES] {
        self.0.map(RawPoint::from)
    }
}

impl From<Boundary> for Vec<Coordinate> {
    fn from(value: Boundary) -> Self {
        value.0.to_vec()
    }
}

impl TryFrom<Vec<Coordinate>> for Boundary {
    type Error = BoundaryViolations;

    fn try_from(value: Vec<Coordinate>) -> Result<Self, Self::Error> {
        let raw: Vec<RawPoint> = value.iter().copied().map(RawPoint::from).collect();
        Self::from_points(&raw)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn square_points() -> Vec<RawPoint> {
        vec![
            RawPoint {
                lat: -6.2000,
                lng: 106.8000,
            },
            RawPoint {
                lat: -6.2000,
                lng: 106.8100,
            },
            RawPoint {
                lat: -6.2100,
                lng: 106.8100,
            },
            RawPoint {
                lat: -6.2100,
                lng: 106.8000,
            },
        ]
    }

    #[rstest]
    #[case::empty(0)]
    #[case::too_few(2)]
    #[case::too_many(5)]
    fn wrong_cardinality_is_a_shape_violation(#[case] count: usize) {
        let points = vec![
            RawPoint {
                lat: 1.0,
                lng: 2.0
            };
            count
        ];
        let violations = Boundary::from_points(&points).expect_err("must fail");
        assert!(
            violations
                .iter()
                .any(|v| matches!(v, BoundaryViolation::Shape { actual } if *actual == count))
        );
    }

    #[rstest]
    fn four_points_in_range_validate() {
        let boundary = Boundary::from_points(&square_points()).expect("valid boundary");
        assert_eq!(boundary.points().len(), BOUNDARY_VERTICES);
        assert_eq!(boundary.points()[0].lat(), -6.2000);
    }

    #[rstest]
    fn out_of_range_latitude_names_the_vertex_without_a_shape_violation() {
        let mut points = square_points();
        points[0].lat = -100.0;
        let violations = Boundary::from_points(&points).expect_err("must fail");

        assert_eq!(violations.len(), 1);
        assert!(violations.iter().any(|v| matches!(
            v,
            BoundaryViolation::Range {
                vertex: 0,
                axis: Axis::Lat,
                ..
            }
        )));
        assert!(
            !violations
                .iter()
                .any(|v| matches!(v, BoundaryViolation::Shape { .. }))
        );
    }

    #[rstest]
    fn every_out_of_range_axis_is_reported() {
        let mut points = square_points();
        points[0].lat = 91.0;
        points[1].lng = -181.0;
        points[3].lat = -90.5;
        points[3].lng = 200.0;

        let violations = Boundary::from_points(&points).expect_err("must fail");
        assert_eq!(violations.len(), 4);
    }

    #[rstest]
    #[case::nan(f64::NAN)]
    #[case::infinite(f64::INFINITY)]
    fn non_finite_latitude_is_rejected(#[case] lat: f64) {
        let mut points = square_points();
        points[2].lat = lat;
        let violations = Boundary::from_points(&points).expect_err("must fail");
        assert!(violations.iter().any(|v| matches!(
            v,
            BoundaryViolation::Range {
                vertex: 2,
                axis: Axis::Lat,
                ..
            }
        )));
    }

    #[rstest]
    fn boundary_json_round_trip_preserves_order() {
        let boundary = Boundary::from_points(&square_points()).expect("valid boundary");
        let encoded = serde_json::to_value(boundary).expect("encode");
        assert_eq!(
            encoded,
            json!([
                { "lat": -6.2000, "lng": 106.8000 },
                { "lat": -6.2000, "lng": 106.8100 },
                { "lat": -6.2100, "lng": 106.8100 },
                { "lat": -6.2100, "lng": 106.8000 },
            ])
        );

        let decoded: Boundary = serde_json::from_value(encoded).expect("decode");
        assert_eq!(decoded, boundary);
    }

    #[rstest]
    fn boundary_json_with_three_points_fails_to_decode() {
        let result: Result<Boundary, _> = serde_json::from_value(json!([
            { "lat": 0.0, "lng": 0.0 },
            { "lat": 0.0, "lng": 1.0 },
            { "lat": 1.0, "lng": 1.0 },
        ]));
        assert!(result.is_err());
    }

    #[rstest]
    fn coordinate_new_reports_latitude_before_longitude() {
        let err = Coordinate::new(99.0, 999.0).expect_err("must fail");
        assert!(matches!(err, CoordinateError::LatitudeOutOfRange { .. }));
    }
}
