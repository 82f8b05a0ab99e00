//! Generic repository layer over Sea-ORM: a uniform facade for CRUD,
//! filtering, sorting, and pagination of database-backed entities.
//!
//! The interesting part lives in [`criteria`]: request parameters such
//! as `?search=tolkien&searchFields=author.name&orderBy=title` are
//! parsed into structured directives and applied to a Sea-ORM
//! [`Select`](sea_orm::Select). Everything else delegates to the
//! query builder.

pub mod config;
pub mod criteria;
pub mod errors;
pub mod models;
pub mod pagination;
pub mod repository;

pub use config::{CriteriaParamNames, RepositoryConfig};
pub use criteria::{CriteriaApplication, apply_criteria};
pub use errors::RepositoryError;
pub use models::CriteriaParams;
pub use pagination::{Page, paginate_collection};
pub use repository::{ApplyUpdate, Repository};
