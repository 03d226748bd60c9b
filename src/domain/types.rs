//! Strongly-typed value objects used by list queries and entities.
//!
//! These wrappers enforce basic invariants (1-based pages, non-zero page
//! sizes, well-formed sort expressions, positive identifiers) so that once a
//! value reaches the controller it can be sent to the backend as-is.
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use phonenumber::{Mode, parse};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided identifier is zero or negative.
    #[error("id must be greater than zero")]
    NonPositiveId,
    /// Page numbers are 1-based.
    #[error("page number must be at least 1")]
    ZeroPage,
    /// Page size must allow at least one row.
    #[error("page size must be greater than zero")]
    ZeroPageSize,
    /// Phone number could not be parsed or is not a dialable number.
    #[error("invalid phone number")]
    InvalidPhone,
    /// Provided string contained no non-whitespace characters.
    #[error("value cannot be empty")]
    EmptyString,
    /// Provided value failed custom validation.
    #[error("invalid value: {0}")]
    InvalidValue(String),
}

/// Macro to generate newtypes over a strictly positive integer.
macro_rules! positive_newtype {
    ($name:ident, $inner:ty, $err:expr, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name($inner);

        impl $name {
            /// Creates a new value ensuring it is greater than zero.
            pub fn new(value: $inner) -> Result<Self, TypeConstraintError> {
                if value > 0 {
                    Ok(Self(value))
                } else {
                    Err($err)
                }
            }

            /// Returns the raw value.
            pub const fn get(self) -> $inner {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<$inner> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: $inner) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for $inner {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl FromStr for $name {
            type Err = TypeConstraintError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let value = s
                    .trim()
                    .parse::<$inner>()
                    .map_err(|_| TypeConstraintError::InvalidValue(s.to_string()))?;
                Self::new(value)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = <$inner>::deserialize(deserializer)?;
                Self::new(raw).map_err(serde::de::Error::custom)
            }
        }
    };
}

positive_newtype!(
    EntityId,
    i64,
    TypeConstraintError::NonPositiveId,
    "Backend identifier of a resource row."
);
positive_newtype!(
    PageNumber,
    usize,
    TypeConstraintError::ZeroPage,
    "1-based page number as shown to the user."
);
positive_newtype!(
    PageSize,
    usize,
    TypeConstraintError::ZeroPageSize,
    "Number of rows requested per page."
);

impl PageNumber {
    /// First page of any listing.
    pub const FIRST: PageNumber = PageNumber(1);

    /// 0-based page index expected by the backend.
    pub const fn offset(self) -> usize {
        self.0 - 1
    }
}

impl Default for PageNumber {
    fn default() -> Self {
        Self::FIRST
    }
}

impl PageSize {
    pub const DEFAULT: PageSize = PageSize(20);
}

impl Default for PageSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Direction component of a sort expression.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub const fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

impl FromStr for SortDirection {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "unknown sort direction `{other}`"
            ))),
        }
    }
}

impl Display for SortDirection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Backend sort expression in the `field,direction` form.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SortSpec {
    field: String,
    direction: SortDirection,
}

impl SortSpec {
    /// Builds a sort expression, rejecting blank or comma-bearing field names.
    pub fn new<S: Into<String>>(
        field: S,
        direction: SortDirection,
    ) -> Result<Self, TypeConstraintError> {
        let field = field.into().trim().to_string();
        if field.is_empty() {
            return Err(TypeConstraintError::EmptyString);
        }
        if field.contains(',') {
            return Err(TypeConstraintError::InvalidValue(field));
        }
        Ok(Self { field, direction })
    }

    pub fn asc<S: Into<String>>(field: S) -> Result<Self, TypeConstraintError> {
        Self::new(field, SortDirection::Asc)
    }

    pub fn desc<S: Into<String>>(field: S) -> Result<Self, TypeConstraintError> {
        Self::new(field, SortDirection::Desc)
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn direction(&self) -> SortDirection {
        self.direction
    }
}

/// Newest rows first.
impl Default for SortSpec {
    fn default() -> Self {
        Self {
            field: "id".to_string(),
            direction: SortDirection::Desc,
        }
    }
}

impl FromStr for SortSpec {
    type Err = TypeConstraintError;

    /// Parses `field[,direction]`; the direction defaults to ascending.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(',') {
            Some((field, direction)) => Self::new(field, direction.parse()?),
            None => Self::new(s, SortDirection::Asc),
        }
    }
}

impl Display for SortSpec {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.field, self.direction)
    }
}

impl TryFrom<&str> for SortSpec {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl Serialize for SortSpec {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SortSpec {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Parses an international phone number and formats it as E.164.
pub fn normalize_phone_to_e164(value: &str) -> Result<String, TypeConstraintError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(TypeConstraintError::EmptyString);
    }
    let parsed = parse(None, trimmed).map_err(|_| TypeConstraintError::InvalidPhone)?;
    if !phonenumber::is_valid(&parsed) {
        return Err(TypeConstraintError::InvalidPhone);
    }
    Ok(parsed.format().mode(Mode::E164).to_string())
}
