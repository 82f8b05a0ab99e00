//! Projection and eager-load directives.

use sea_orm::{
    EntityTrait, QueryTrait, Select,
    sea_query::{Alias, Expr},
};

/// Split a `;`-delimited directive into an ordered set: entries
/// trimmed, empties and duplicates dropped, order preserved.
fn split_list(raw: &str) -> Vec<String> {
    let mut entries: Vec<String> = Vec::new();
    for entry in raw.split(';').map(str::trim).filter(|e| !e.is_empty()) {
        if !entries.iter().any(|existing| existing == entry) {
            entries.push(entry.to_string());
        }
    }
    entries
}

/// Parse a projection directive into the ordered column set to select.
#[must_use]
pub fn parse_projection(raw: &str) -> Vec<String> {
    split_list(raw)
}

/// Parse an eager-load directive into the ordered relation name set.
#[must_use]
pub fn parse_eager_load(raw: &str) -> Vec<String> {
    split_list(raw)
}

/// Restrict the select list to exactly the given columns, in order.
///
/// The existing selection is cleared first, so reapplying the same
/// directive leaves the query unchanged.
#[must_use]
pub fn apply_projection<E: EntityTrait>(mut query: Select<E>, columns: &[String]) -> Select<E> {
    if columns.is_empty() {
        return query;
    }
    let stmt = QueryTrait::query(&mut query);
    stmt.clear_selects();
    for column in columns {
        stmt.expr(Expr::col(Alias::new(column)));
    }
    query
}
