use crate::criteria::fields::CompareOperator;

/// Request parameter names recognized by the criteria parser.
///
/// Hosts that expose different query-string keys rename them here and
/// feed requests through [`CriteriaParams::from_map`](crate::models::CriteriaParams::from_map).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CriteriaParamNames {
    pub search: String,
    pub search_fields: String,
    pub filter: String,
    pub order_by: String,
    pub sorted_by: String,
    pub with: String,
    pub page: String,
    pub per_page: String,
    pub sort_by: String,
    pub sort_dir: String,
}

impl Default for CriteriaParamNames {
    fn default() -> Self {
        Self {
            search: "search".to_string(),
            search_fields: "searchFields".to_string(),
            filter: "filter".to_string(),
            order_by: "orderBy".to_string(),
            sorted_by: "sortedBy".to_string(),
            with: "with".to_string(),
            page: "page".to_string(),
            per_page: "per_page".to_string(),
            sort_by: "sort_by".to_string(),
            sort_dir: "sort_dir".to_string(),
        }
    }
}

/// Process-wide repository configuration.
///
/// Constructed once at startup and passed by reference to the
/// components that need it; nothing reads ambient state after that.
#[derive(Debug, Clone)]
pub struct RepositoryConfig {
    /// Records per page when the request does not say.
    pub pagination_limit: u64,
    /// Comparison operators accepted in `searchFields` annotations.
    pub accepted_operators: Vec<CompareOperator>,
    /// Request parameter names.
    pub params: CriteriaParamNames,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            pagination_limit: 10,
            accepted_operators: vec![CompareOperator::Eq, CompareOperator::Like],
            params: CriteriaParamNames::default(),
        }
    }
}

impl RepositoryConfig {
    /// Whether an operator annotation is accepted in `searchFields`.
    #[must_use]
    pub fn accepts(&self, operator: CompareOperator) -> bool {
        self.accepted_operators.contains(&operator)
    }
}
