//! Land plot aggregate and its value types.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::geo::Boundary;
use super::user::UserId;

/// Maximum length for a plot name, in characters.
pub const PLOT_NAME_MAX: usize = 255;

/// Maximum length for a plot description, in characters.
pub const PLOT_DESCRIPTION_MAX: usize = 1000;

/// Validation errors for plot value types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlotValidationError {
    EmptyName,
    NameTooLong { max: usize },
    DescriptionTooLong { max: usize },
}

impl fmt::Display for PlotValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "plot name must not be empty"),
            Self::NameTooLong { max } => {
                write!(f, "plot name must be at most {max} characters")
            }
            Self::DescriptionTooLong { max } => {
                write!(f, "plot description must be at most {max} characters")
            }
        }
    }
}

impl std::error::Error for PlotValidationError {}

/// Stable plot identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlotId(Uuid);

impl PlotId {
    /// Wrap an already-parsed UUID.
    #[must_use]
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Generate a new random [`PlotId`].
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for PlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Plot name shown in listings and on the map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PlotName(String);

impl PlotName {
    /// Validate and construct a plot name.
    pub fn new(name: impl Into<String>) -> Result<Self, PlotValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(PlotValidationError::EmptyName);
        }
        if name.chars().count() > PLOT_NAME_MAX {
            return Err(PlotValidationError::NameTooLong { max: PLOT_NAME_MAX });
        }
        Ok(Self(name))
    }

    /// Borrow the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for PlotName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<PlotName> for String {
    fn from(value: PlotName) -> Self {
        value.0
    }
}

impl TryFrom<String> for PlotName {
    type Error = PlotValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Free-text plot description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PlotDescription(String);

impl PlotDescription {
    /// Validate and construct a description.
    pub fn new(description: impl Into<String>) -> Result<Self, PlotValidationError> {
        let description = description.into();
        if description.chars().count() > PLOT_DESCRIPTION_MAX {
            return Err(PlotValidationError::DescriptionTooLong {
                max: PLOT_DESCRIPTION_MAX,
            });
        }
        Ok(Self(description))
    }

    /// Borrow the description as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<PlotDescription> for String {
    fn from(value: PlotDescription) -> Self {
        value.0
    }
}

impl TryFrom<String> for PlotDescription {
    type Error = PlotValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// A user-owned land parcel.
///
/// The aggregate carries its boundary ring and the planar area computed from
/// it. `area_m2` holds the storage-rounded value (two decimal places) and is
/// `None` only for records created before area computation existed; the
/// service recomputes it whenever the boundary is replaced and leaves it
/// untouched otherwise.
///
/// Ownership invariant: only `owner` may read, mutate, or delete the plot.
/// The domain service enforces this on every operation, not just creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LandPlot {
    /// Stable identifier.
    pub id: PlotId,
    /// Owning user; the only principal allowed to touch this record.
    pub owner: UserId,
    /// Display name.
    pub name: PlotName,
    /// Optional free-text description.
    pub description: Option<PlotDescription>,
    /// Four-vertex boundary ring, in submission order.
    pub boundary: Boundary,
    /// Planar area in square metres, rounded for storage.
    pub area_m2: Option<f64>,
    /// Record creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}
