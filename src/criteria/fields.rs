//! Searchable-field declarations and the field-search resolver.

use crate::config::RepositoryConfig;
use crate::errors::RepositoryError;

/// Comparison operator usable in search criteria.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOperator {
    /// Exact equality.
    Eq,
    /// `LIKE` with the value wrapped in `%` wildcards.
    Like,
    /// Case-insensitive `LIKE`, expressed portably as
    /// `UPPER(column) LIKE UPPER(pattern)`.
    ILike,
}

impl CompareOperator {
    /// Parse an operator annotation, case-insensitively. Unknown
    /// annotations yield `None`.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw == "=" {
            Some(Self::Eq)
        } else if raw.eq_ignore_ascii_case("like") {
            Some(Self::Like)
        } else if raw.eq_ignore_ascii_case("ilike") {
            Some(Self::ILike)
        } else {
            None
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Like => "like",
            Self::ILike => "ilike",
        }
    }

    /// Whether values are wrapped in `%…%` wildcards.
    #[must_use]
    pub const fn is_pattern(self) -> bool {
        matches!(self, Self::Like | Self::ILike)
    }
}

/// A field an entity declares as eligible for dynamic search, with its
/// default comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchableField {
    pub name: &'static str,
    pub operator: CompareOperator,
}

impl SearchableField {
    /// A searchable field compared with `=` by default.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            operator: CompareOperator::Eq,
        }
    }

    #[must_use]
    pub const fn with_operator(name: &'static str, operator: CompareOperator) -> Self {
        Self { name, operator }
    }
}

/// A relation usable in relation-qualified search fields
/// (`relation.column`), described by its join columns.
///
/// `local_key` lives on the base table, `related_key` on the related
/// table. An `author` relation on a `books` table is
/// `SearchRelation::new("author", "authors", "author_id", "id")`; a
/// has-many `reviews` relation inverts the keys:
/// `SearchRelation::new("reviews", "reviews", "id", "book_id")`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchRelation {
    pub name: &'static str,
    pub table: &'static str,
    pub local_key: &'static str,
    pub related_key: &'static str,
}

impl SearchRelation {
    #[must_use]
    pub const fn new(
        name: &'static str,
        table: &'static str,
        local_key: &'static str,
        related_key: &'static str,
    ) -> Self {
        Self {
            name,
            table,
            local_key,
            related_key,
        }
    }
}

/// Reconcile the entity's declared searchable fields with the
/// requested subset, producing the `field -> operator` mapping in
/// declaration order.
///
/// With no requested subset every declared field keeps its default
/// operator. Otherwise each `;`-separated token names a field,
/// optionally annotated `field:operator`; an accepted annotation
/// overrides the operator, an unrecognized one is dropped (the field
/// stays usable with `=`). Fields not declared searchable are
/// discarded.
///
/// # Errors
///
/// `RepositoryError::Configuration` when a non-empty requested subset
/// shares no field with the declared set — a misconfigured caller
/// should hear about it rather than silently search nothing.
pub fn resolve_search_fields(
    declared: &[SearchableField],
    requested: Option<&str>,
    config: &RepositoryConfig,
) -> Result<Vec<(String, CompareOperator)>, RepositoryError> {
    let Some(raw) = requested.map(str::trim).filter(|r| !r.is_empty()) else {
        return Ok(declared
            .iter()
            .map(|field| (field.name.to_string(), field.operator))
            .collect());
    };

    // requested field -> operator override; None means "keep the
    // declared default"
    let mut tokens: Vec<(&str, Option<CompareOperator>)> = Vec::new();
    for token in raw.split(';').map(str::trim).filter(|t| !t.is_empty()) {
        match token.split_once(':') {
            Some((field, annotation)) => {
                let operator = CompareOperator::parse(annotation)
                    .filter(|op| config.accepts(*op))
                    .unwrap_or(CompareOperator::Eq);
                tokens.push((field.trim(), Some(operator)));
            }
            None => tokens.push((token, None)),
        }
    }

    let mut fields = Vec::new();
    for field in declared {
        if let Some((_, operator)) = tokens.iter().find(|(name, _)| *name == field.name) {
            fields.push((field.name.to_string(), operator.unwrap_or(field.operator)));
        }
    }

    if fields.is_empty() {
        let requested: Vec<&str> = tokens.iter().map(|(name, _)| *name).collect();
        return Err(RepositoryError::configuration(format!(
            "unsupported search fields => {}",
            requested.join(",")
        )));
    }

    Ok(fields)
}
