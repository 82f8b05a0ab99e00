use axum::http::header::HeaderMap;
use serde::Serialize;
use utoipa::ToSchema;

use crate::config::RepositoryConfig;

/// One page of results with 1-based page accounting.
///
/// `total` reports the full pre-slice item count so callers can
/// compute page links downstream.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    #[must_use]
    pub fn new(items: Vec<T>, total: u64, page: u64, per_page: u64) -> Self {
        let total_pages = if per_page == 0 {
            0
        } else {
            total.div_ceil(per_page)
        };
        Self {
            items,
            total,
            page,
            per_page,
            total_pages,
        }
    }
}

/// Paginate an in-memory collection.
///
/// Pages are 1-based and the offset is `page × size − size`. A missing
/// page means the first; a missing page size falls back to the
/// configured pagination limit.
#[must_use]
pub fn paginate_collection<T>(
    items: Vec<T>,
    page: Option<u64>,
    per_page: Option<u64>,
    config: &RepositoryConfig,
) -> Page<T> {
    let per_page = per_page.unwrap_or(config.pagination_limit);
    let page = page.unwrap_or(1).max(1);
    let total = items.len() as u64;
    let offset = page.saturating_mul(per_page).saturating_sub(per_page);

    let items = items
        .into_iter()
        .skip(usize::try_from(offset).unwrap_or(usize::MAX))
        .take(usize::try_from(per_page).unwrap_or(usize::MAX))
        .collect();
    Page::new(items, total, page, per_page)
}

/// Remove characters that would break an HTTP header.
fn sanitize_resource_name(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii() && !c.is_ascii_control())
        .collect()
}

/// Build a `Content-Range` header describing a page, in the
/// `resource start-end/total` form list clients expect.
#[must_use]
pub fn content_range_headers<T>(page: &Page<T>, resource_name: &str) -> HeaderMap {
    let offset = page.page.saturating_sub(1) * page.per_page;
    let end = (offset + page.per_page).saturating_sub(1).min(page.total);
    let safe_name = sanitize_resource_name(resource_name);
    let content_range = format!("{safe_name} {offset}-{end}/{}", page.total);

    let mut headers = HeaderMap::new();
    if let Ok(value) = content_range.parse() {
        headers.insert("Content-Range", value);
    } else {
        // sanitized names always parse; keep a fallback anyway
        headers.insert(
            "Content-Range",
            format!("items {offset}-{end}/{}", page.total)
                .parse()
                .unwrap_or_else(|_| "items 0-0/0".parse().unwrap()),
        );
    }

    headers
}
