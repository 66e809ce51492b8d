//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the domain repository ports backed by
//! PostgreSQL via Diesel, with async support through `diesel-async` and
//! `bb8` connection pooling.
//!
//! # Architecture
//!
//! - **Thin adapters**: repository implementations only translate between
//!   Diesel models and domain types. No business logic resides here.
//! - **Internal models**: Diesel row structs (`models.rs`) and schema
//!   definitions (`schema.rs`) are implementation details, never exposed to
//!   the domain layer.
//! - **Strongly typed errors**: all database errors are mapped to domain
//!   persistence error types.

mod diesel_land_plot_repository;
mod diesel_login_service;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_land_plot_repository::DieselLandPlotRepository;
pub use diesel_login_service::DieselLoginService;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
