//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. They are used
//! by Diesel for compile-time query validation and type-safe SQL generation.
//! When migrations change the schema, regenerate or update this file
//! (`diesel print-schema` can generate it from a live database).

diesel::table! {
    /// User accounts table.
    ///
    /// Stores registered users with their display names and audit timestamps.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Human-readable display name.
        display_name -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Land plots table.
    ///
    /// One row per recorded parcel. The boundary is stored as a JSONB array
    /// of exactly four `{lat, lng}` objects in submission order; the area is
    /// the planar estimate in square metres rounded to two decimals.
    land_plots (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Owning user; cascade-deleted with the account.
        user_id -> Uuid,
        /// Display name (max 255 characters).
        name -> Varchar,
        /// Optional free-text description (max 1000 characters).
        description -> Nullable<Text>,
        /// Ordered boundary ring as a JSONB array of `{lat, lng}` objects.
        boundary_points -> Jsonb,
        /// Planar area in square metres, two decimal places.
        area_m2 -> Nullable<Float8>,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(land_plots -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(land_plots, users,);
