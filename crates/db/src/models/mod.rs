//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - An update DTO (all `Option` fields) for patches; nullable columns use
//!   `Option<Option<T>>` with [`nullable`] so `null` clears and absence keeps
//! - A filter struct for the paginated list query

pub mod category;
pub mod event;
pub mod review;
pub mod user;

use serde::{Deserialize, Deserializer};

/// Deserializer for `Option<Option<T>>` patch fields.
///
/// Use with `#[serde(default, deserialize_with = "nullable")]`: an absent
/// field stays `None` (keep the column), an explicit `null` becomes
/// `Some(None)` (clear it), and a value becomes `Some(Some(v))`.
pub fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
