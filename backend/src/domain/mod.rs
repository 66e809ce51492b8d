//! Domain primitives, aggregates, and services.
//!
//! Purpose: keep every piece of parcel logic framework-free. Types are
//! immutable where practical and validate at construction; serde contracts
//! are documented on each type. Inbound and outbound adapters depend on this
//! module, never the other way around.
//!
//! The two pure cores of the system live here: boundary validation
//! ([`Boundary::from_points`]) and planar area estimation
//! ([`estimate_area`]). Everything else is orchestration around them.

pub mod area;
pub mod error;
pub mod geo;
pub mod land_plot;
pub mod land_plot_service;
pub mod ports;
pub mod trace_id;
pub mod user;

pub use self::area::{AREA_STORAGE_DECIMALS, AreaError, METERS_PER_DEGREE_LAT, estimate_area, round_for_storage};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::geo::{
    Axis, BOUNDARY_VERTICES, Boundary, BoundaryViolation, BoundaryViolations, Coordinate,
    CoordinateError, RawPoint,
};
pub use self::land_plot::{
    LandPlot, PLOT_DESCRIPTION_MAX, PLOT_NAME_MAX, PlotDescription, PlotId, PlotName,
    PlotValidationError,
};
pub use self::land_plot_service::LandPlotService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    DISPLAY_NAME_MAX, DisplayName, LoginCredentials, LoginValidationError, User, UserId,
    UserValidationError,
};

/// Convenient result alias for domain operations.
///
/// # Examples
/// ```
/// use backend::domain::{DomainResult, Error};
///
/// fn guard(authorised: bool) -> DomainResult<()> {
///     if authorised {
///         Ok(())
///     } else {
///         Err(Error::forbidden("nope"))
///     }
/// }
/// ```
pub type DomainResult<T> = Result<T, Error>;
