//! Domain layer shared by the database, API, and client crates.
//!
//! Nothing in here performs I/O. Modules hold the identifier aliases, the
//! domain error type, pagination arithmetic, the sort allow-lists, and the
//! validation rules for events, categories, reviews, and users.

pub mod category;
pub mod error;
pub mod event;
pub mod pagination;
pub mod review;
pub mod roles;
pub mod sorting;
pub mod types;
pub mod user;
