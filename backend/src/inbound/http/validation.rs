//! Shared validation helpers for inbound HTTP adapters.
//!
//! Parse functions translate raw request values into domain types and render
//! failures as field-keyed error details so clients can highlight exactly
//! which input is invalid. Boundary failures carry one entry per violation;
//! nothing short-circuits.

use serde_json::{Value, json};

use crate::domain::{
    Boundary, BoundaryViolation, BoundaryViolations, Error, PlotDescription, PlotName,
    PlotValidationError, RawPoint,
};

/// Validate a submitted point sequence, rendering every violation at once.
pub(crate) fn parse_boundary(points: &[RawPoint]) -> Result<Boundary, Error> {
    Boundary::from_points(points).map_err(boundary_violations_error)
}

fn violation_entry(violation: &BoundaryViolation) -> Value {
    match violation {
        BoundaryViolation::Shape { actual } => json!({
            "field": "boundaryPoints",
            "code": "invalid_cardinality",
            "actual": actual,
            "message": violation.to_string(),
        }),
        BoundaryViolation::Range {
            vertex,
            axis,
            source,
        } => json!({
            "field": format!("boundaryPoints[{vertex}].{}", axis.as_str()),
            "code": "out_of_range",
            "message": source.to_string(),
        }),
    }
}

/// Build the client-facing error for a failed boundary validation.
pub(crate) fn boundary_violations_error(violations: BoundaryViolations) -> Error {
    let entries: Vec<Value> = violations.iter().map(violation_entry).collect();
    Error::invalid_request("boundary validation failed")
        .with_details(json!({ "violations": entries }))
}

/// Parse and validate a plot name.
pub(crate) fn parse_plot_name(value: String) -> Result<PlotName, Error> {
    PlotName::new(value).map_err(|err| {
        let code = match err {
            PlotValidationError::EmptyName => "empty_name",
            _ => "too_long",
        };
        Error::invalid_request(err.to_string()).with_details(json!({
            "field": "name",
            "code": code,
        }))
    })
}

/// Parse an optional description.
///
/// Blank submissions clear the description rather than storing whitespace,
/// mirroring how the web form treats an emptied-out field.
pub(crate) fn parse_description(value: Option<String>) -> Result<Option<PlotDescription>, Error> {
    match value {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => PlotDescription::new(raw)
            .map(Some)
            .map_err(|err| {
                Error::invalid_request(err.to_string()).with_details(json!({
                    "field": "description",
                    "code": "too_long",
                }))
            }),
    }
}
