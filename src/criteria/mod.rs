//! # Request criteria
//!
//! Turns loosely structured request parameters into structured filter,
//! sort, projection, and eager-load directives applied to a Sea-ORM
//! [`Select`](sea_orm::Select).
//!
//! ## Query parameter examples
//!
//! ```rust,ignore
//! // Free text across every searchable field
//! GET /books?search=tolkien
//!
//! // Per-field values
//! GET /books?search=title:hobbit;genre:fantasy
//!
//! // Restrict to a subset of the searchable fields, overriding the
//! // comparison operator per field
//! GET /books?search=tolkien&searchFields=author.name;title:like
//!
//! // Sort by a column, or by a joined table's column
//! GET /books?orderBy=title&sortedBy=desc
//! GET /books?orderBy=authors|name&sortedBy=asc
//!
//! // Select a column subset and eager-load relations
//! GET /books?filter=id;title&with=author
//! ```
//!
//! The pipeline: [`resolve_search_fields`] reconciles the entity's
//! declared searchable fields with the requested subset,
//! [`SearchValue::parse`] splits the search input into per-field pairs
//! or a scalar, and [`build_search_condition`] combines both into one
//! OR group attached to the query. Sort, projection, and eager-load
//! directives are applied after. Fields that cannot contribute a
//! predicate are reported in the outcome instead of silently dropped.

pub mod fields;
pub mod predicate;
pub mod projection;
pub mod sort;
pub mod value;

pub use fields::{CompareOperator, SearchRelation, SearchableField, resolve_search_fields};
pub use predicate::{
    AppliedField, PredicateOutcome, SkipReason, SkippedField, build_search_condition,
};
pub use projection::{apply_projection, parse_eager_load, parse_projection};
pub use sort::{SortDirection, SortDirective, apply_sort, resolve_sort, resolve_sort_strict};
pub use value::SearchValue;

use sea_orm::{EntityTrait, QueryFilter, Select};

use crate::config::RepositoryConfig;
use crate::errors::RepositoryError;
use crate::models::CriteriaParams;
use crate::repository::Repository;

/// Result of applying criteria to a query: the amended query, the
/// applied/skipped field report, and the eager-load directive for the
/// caller to resolve after fetching.
#[derive(Debug)]
pub struct CriteriaApplication<E: EntityTrait> {
    pub query: Select<E>,
    pub applied: Vec<AppliedField>,
    pub skipped: Vec<SkippedField>,
    pub eager: Vec<String>,
}

/// Apply search, sort, projection, and eager-load criteria to a query.
///
/// Order of operations: search predicate, then order-by, then
/// projection, then the eager-load directive.
///
/// # Errors
///
/// Propagates `RepositoryError::Configuration` from
/// [`resolve_search_fields`] when the requested search-field subset is
/// disjoint from the entity's declared set. Per-field skips (no value,
/// undeclared relation) are reported in the outcome and logged at
/// debug level, never raised.
pub fn apply_criteria<R>(
    query: Select<R::EntityType>,
    params: &CriteriaParams,
    config: &RepositoryConfig,
) -> Result<CriteriaApplication<R::EntityType>, RepositoryError>
where
    R: Repository,
{
    let mut query = query;
    let mut applied = Vec::new();
    let mut skipped = Vec::new();

    let declared = R::searchable_fields();
    if let Some(search) = params
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        && !declared.is_empty()
    {
        let fields = resolve_search_fields(&declared, params.search_fields.as_deref(), config)?;
        let value = SearchValue::parse(search);
        let outcome =
            build_search_condition(R::TABLE_NAME, &fields, &value, &R::search_relations());
        for skip in &outcome.skipped {
            tracing::debug!(field = %skip.field, reason = %skip.reason, "search field skipped");
        }
        if let Some(condition) = outcome.condition {
            query = query.filter(condition);
        }
        applied = outcome.applied;
        skipped = outcome.skipped;
    }

    if let Some(directive) = resolve_sort(params.order_by.as_deref(), params.sorted_by.as_deref())
    {
        query = apply_sort(query, R::TABLE_NAME, &directive);
    }

    if let Some(filter) = params
        .filter
        .as_deref()
        .map(str::trim)
        .filter(|f| !f.is_empty())
    {
        query = apply_projection(query, &parse_projection(filter));
    }

    let eager = params
        .with
        .as_deref()
        .map(parse_eager_load)
        .unwrap_or_default();

    Ok(CriteriaApplication {
        query,
        applied,
        skipped,
        eager,
    })
}
