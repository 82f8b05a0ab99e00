use std::collections::HashMap;

use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::config::CriteriaParamNames;

/// Query parameters for searching, sorting, and paginating resources.
///
/// # Searching
/// - **Free text:** `search=tolkien` matches every searchable field.
/// - **Per field:** `search=title:hobbit;genre:fantasy` matches each
///   named field against its own value.
/// - **Field subset:** `searchFields=title:like;genre` restricts the
///   search to the given fields, optionally overriding the comparison
///   operator per field.
///
/// # Sorting
/// - `orderBy=title&sortedBy=desc` orders by a column.
/// - `orderBy=authors|name` left-joins `authors` before ordering; the
///   join key defaults to the singular table name plus `_id` and can
///   be named explicitly with `authors:writer_id|name`.
///
/// # Projection and eager loading
/// - `filter=id;title` restricts the selected columns.
/// - `with=author;reviews` eager-loads the named relations.
#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct CriteriaParams {
    /// Searched value: free text, or compound `field:value` pairs
    /// separated by `;`.
    #[param(example = "title:hobbit;genre:fantasy")]
    pub search: Option<String>,
    /// `;`-separated subset of the searchable fields, each optionally
    /// annotated with an accepted operator.
    #[serde(rename = "searchFields")]
    #[param(example = "title:like;genre")]
    pub search_fields: Option<String>,
    /// `;`-separated columns to select.
    #[param(example = "id;title")]
    pub filter: Option<String>,
    /// Sort column, or `table|column` to join the named table before
    /// ordering.
    #[serde(rename = "orderBy")]
    #[param(example = "title")]
    pub order_by: Option<String>,
    /// Sort direction, `asc` or `desc`.
    #[serde(rename = "sortedBy")]
    #[param(example = "desc")]
    pub sorted_by: Option<String>,
    /// `;`-separated relation names to eager-load.
    #[param(example = "author")]
    pub with: Option<String>,
    /// 1-based page number.
    #[param(example = 1)]
    pub page: Option<u64>,
    /// Page size; falls back to the configured pagination limit.
    #[param(example = 10)]
    pub per_page: Option<u64>,
    /// Sort column for the strict list-view variant; only declared
    /// sortable columns are accepted.
    #[param(example = "title")]
    pub sort_by: Option<String>,
    /// Sort direction for the strict list-view variant.
    #[param(example = "asc")]
    pub sort_dir: Option<String>,
}

impl CriteriaParams {
    /// Build params from an untyped key/value bag using configured
    /// parameter names, for hosts that do not extract a typed query
    /// struct. Empty values count as absent.
    #[must_use]
    pub fn from_map(map: &HashMap<String, String>, names: &CriteriaParamNames) -> Self {
        let get = |key: &String| map.get(key).map(String::as_str).filter(|v| !v.is_empty());
        Self {
            search: get(&names.search).map(str::to_string),
            search_fields: get(&names.search_fields).map(str::to_string),
            filter: get(&names.filter).map(str::to_string),
            order_by: get(&names.order_by).map(str::to_string),
            sorted_by: get(&names.sorted_by).map(str::to_string),
            with: get(&names.with).map(str::to_string),
            page: get(&names.page).and_then(|v| v.parse().ok()),
            per_page: get(&names.per_page).and_then(|v| v.parse().ok()),
            sort_by: get(&names.sort_by).map(str::to_string),
            sort_dir: get(&names.sort_dir).map(str::to_string),
        }
    }
}
