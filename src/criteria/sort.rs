//! Sort directive resolution and application.

use sea_orm::{
    ColumnTrait, EntityTrait, Order, QueryTrait, Select,
    sea_query::{Alias, Expr, ExprTrait, OrderedStatement},
};

/// Sort direction, validated against the two accepted values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// Case-insensitive parse; anything but `desc` is ascending.
    #[must_use]
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some(value) if value.eq_ignore_ascii_case("desc") => Self::Desc,
            _ => Self::Asc,
        }
    }

    #[must_use]
    pub fn into_order(self) -> Order {
        match self {
            Self::Asc => Order::Asc,
            Self::Desc => Order::Desc,
        }
    }
}

/// A resolved sort directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortDirective {
    /// Order by a column on the base table.
    Column {
        column: String,
        direction: SortDirection,
    },
    /// Left-join another table and order by one of its columns.
    Joined {
        table: String,
        join_key: String,
        column: String,
        direction: SortDirection,
    },
}

/// Resolve the search-scope sort directive from raw request input.
///
/// `orderBy=title` orders by the column directly; this variant does
/// not validate the column (callers wanting an allow-list use
/// [`resolve_sort_strict`]). `orderBy=products|description` left-joins
/// `products` on `base.product_id = products.id` before ordering —
/// the join key defaults to the singular of the join table (one
/// trailing `s` stripped) plus `_id`, and
/// `products:custom_id|description` names it explicitly.
#[must_use]
pub fn resolve_sort(raw_column: Option<&str>, raw_direction: Option<&str>) -> Option<SortDirective> {
    let raw = raw_column.map(str::trim).filter(|c| !c.is_empty())?;
    let direction = SortDirection::parse(raw_direction);

    match raw.split_once('|') {
        Some((table_spec, column)) => {
            let (table, join_key) = match table_spec.split_once(':') {
                Some((table, key)) => (table.to_string(), key.to_string()),
                None => {
                    let singular = table_spec.strip_suffix('s').unwrap_or(table_spec);
                    (table_spec.to_string(), format!("{singular}_id"))
                }
            };
            Some(SortDirective::Joined {
                table,
                join_key,
                column: column.to_string(),
                direction,
            })
        }
        None => Some(SortDirective::Column {
            column: raw.to_string(),
            direction,
        }),
    }
}

/// Apply a sort directive to a select.
///
/// The joined form needs no re-select of the base table's columns:
/// Sea-ORM selects them explicitly, so the join cannot pollute the
/// selection.
#[must_use]
pub fn apply_sort<E: EntityTrait>(
    mut query: Select<E>,
    table: &str,
    directive: &SortDirective,
) -> Select<E> {
    match directive {
        SortDirective::Column { column, direction } => {
            QueryTrait::query(&mut query).order_by(Alias::new(column), direction.into_order());
        }
        SortDirective::Joined {
            table: sort_table,
            join_key,
            column,
            direction,
        } => {
            QueryTrait::query(&mut query)
                .left_join(
                    Alias::new(sort_table),
                    Expr::col((Alias::new(table), Alias::new(join_key)))
                        .equals((Alias::new(sort_table), Alias::new("id"))),
                )
                .order_by(Alias::new(column), direction.into_order());
        }
    }
    query
}

/// Strict variant for simple list views: only a literal member of the
/// entity's sortable column listing is accepted; anything else means
/// no sort was requested.
#[must_use]
pub fn resolve_sort_strict<C>(
    raw_column: Option<&str>,
    raw_direction: Option<&str>,
    columns: &[(&str, C)],
) -> Option<(C, SortDirection)>
where
    C: ColumnTrait + Copy,
{
    let requested = raw_column.map(str::trim).filter(|c| !c.is_empty())?;
    let column = columns
        .iter()
        .find(|(name, _)| *name == requested)
        .map(|&(_, column)| column)?;
    Some((column, SortDirection::parse(raw_direction)))
}
