//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. List queries come in
//! `count` / `list` pairs that share one WHERE clause so pagination totals
//! always describe the same predicate as the returned page.

pub mod category_repo;
pub mod event_repo;
pub mod review_repo;
pub mod user_repo;

pub use category_repo::CategoryRepo;
pub use event_repo::EventRepo;
pub use review_repo::ReviewRepo;
pub use user_repo::UserRepo;
