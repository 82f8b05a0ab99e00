//! Builds the grouped search condition over the resolved fields.

use std::fmt;

use sea_orm::{
    Condition,
    sea_query::{Alias, ConditionalStatement, Expr, ExprTrait, Func, Query, SimpleExpr},
};

use super::fields::{CompareOperator, SearchRelation};
use super::value::SearchValue;

/// A search field that contributed a predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedField {
    pub field: String,
    pub operator: CompareOperator,
}

/// Why a resolved field contributed no predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Neither a per-field pair nor a scalar value was available.
    NoValue,
    /// The field names a relation the entity does not declare.
    UnknownRelation(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoValue => write!(f, "no value"),
            Self::UnknownRelation(relation) => write!(f, "undeclared relation '{relation}'"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedField {
    pub field: String,
    pub reason: SkipReason,
}

/// Outcome of predicate building: the grouped condition, plus a report
/// of which fields were applied and which were skipped and why. The
/// report replaces silent suppression — callers decide whether a skip
/// is worth logging or failing over.
#[derive(Debug, Clone)]
pub struct PredicateOutcome {
    /// The OR group, absent when every field was skipped.
    pub condition: Option<Condition>,
    pub applied: Vec<AppliedField>,
    pub skipped: Vec<SkippedField>,
}

/// Build the search condition over the resolved fields, visited in
/// declaration order.
///
/// Every field with an effective value contributes one predicate to a
/// single OR group; attaching the group with `filter(..)` ANDs it
/// against everything outside, giving "match any of these fields"
/// semantics bounded by one outer AND group. Flat fields compare
/// qualified by the base table name so joined queries stay
/// unambiguous; `relation.column` fields become correlated sub-selects
/// against the declared relation.
#[must_use]
pub fn build_search_condition(
    table: &str,
    fields: &[(String, CompareOperator)],
    value: &SearchValue,
    relations: &[SearchRelation],
) -> PredicateOutcome {
    let mut group = Condition::any();
    let mut applied = Vec::new();
    let mut skipped = Vec::new();

    for (field, operator) in fields {
        let Some(raw) = value.value_for(field) else {
            skipped.push(SkippedField {
                field: field.clone(),
                reason: SkipReason::NoValue,
            });
            continue;
        };
        let operand = if operator.is_pattern() {
            format!("%{raw}%")
        } else {
            raw.to_string()
        };

        let expr = if let Some((relation, column)) = field.rsplit_once('.') {
            let Some(spec) = relations.iter().find(|r| r.name == relation) else {
                tracing::warn!(
                    field = %field,
                    relation = %relation,
                    "skipping search field with undeclared relation"
                );
                skipped.push(SkippedField {
                    field: field.clone(),
                    reason: SkipReason::UnknownRelation(relation.to_string()),
                });
                continue;
            };
            relation_predicate(table, spec, column, *operator, &operand)
        } else {
            compare(qualified(table, field), *operator, &operand)
        };

        group = group.add(expr);
        applied.push(AppliedField {
            field: field.clone(),
            operator: *operator,
        });
    }

    PredicateOutcome {
        condition: if applied.is_empty() { None } else { Some(group) },
        applied,
        skipped,
    }
}

fn qualified(table: &str, column: &str) -> Expr {
    Expr::col((Alias::new(table), Alias::new(column)))
}

/// Correlated sub-select: the base row must have a related row
/// satisfying the comparison.
fn relation_predicate(
    table: &str,
    relation: &SearchRelation,
    column: &str,
    operator: CompareOperator,
    operand: &str,
) -> SimpleExpr {
    let matching = Query::select()
        .column(Alias::new(relation.related_key))
        .from(Alias::new(relation.table))
        .and_where(compare(qualified(relation.table, column), operator, operand))
        .to_owned();
    qualified(table, relation.local_key).in_subquery(matching)
}

fn compare(column: Expr, operator: CompareOperator, operand: &str) -> SimpleExpr {
    match operator {
        CompareOperator::Eq => column.eq(operand),
        CompareOperator::Like => column.like(operand),
        CompareOperator::ILike => Func::upper(column).like(operand.to_uppercase()),
    }
}
