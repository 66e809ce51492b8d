//! Parcel registry backend library modules.
//!
//! A session-authenticated web service for recording user-owned land parcels
//! as four-point polygons. The domain core validates submitted boundaries and
//! estimates each parcel's planar surface area; inbound and outbound adapters
//! wire that core to Actix Web and PostgreSQL.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
/// Request tracing middleware re-exported for app wiring.
pub use middleware::Trace;
/// Request-scoped trace identifier.
pub use domain::TraceId;
