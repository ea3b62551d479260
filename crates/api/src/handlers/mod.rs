//! HTTP handlers, one module per resource.

pub mod admin;
pub mod auth;
pub mod categories;
pub mod events;
pub mod reviews;
