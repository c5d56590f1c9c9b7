//! Query descriptor types
//!
//! These serialize to the Datastore v1 REST `Query` shape.

use crate::types::{Cursor, JsonValue};
use serde::{Deserialize, Serialize};

/// A kind to query over
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KindExpression {
    /// Kind name
    pub name: String,
}

/// Reference to a property by name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyReference {
    /// Property name
    pub name: String,
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Direction {
    /// Ascending order
    #[default]
    Ascending,
    /// Descending order
    Descending,
}

/// Ordering on a single property
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyOrder {
    /// Property to order by
    pub property: PropertyReference,
    /// Direction
    pub direction: Direction,
}

/// Comparison operator of a property filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FilterOp {
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
    Equal,
    NotEqual,
    In,
    NotIn,
    HasAncestor,
}

/// Filter on a single property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyFilter {
    /// Property to filter on
    pub property: PropertyReference,
    /// Operator
    pub op: FilterOp,
    /// Value in its wire encoding (see [`crate::query::value`])
    pub value: JsonValue,
}

/// Operator joining the filters of a composite filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CompositeOp {
    And,
    Or,
}

/// Filter combining other filters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeFilter {
    /// Operator
    pub op: CompositeOp,
    /// Filters to combine
    pub filters: Vec<Filter>,
}

/// A query filter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Filter {
    /// Filter on a single property
    PropertyFilter(PropertyFilter),
    /// Combination of filters
    CompositeFilter(CompositeFilter),
}

impl Filter {
    /// Create a property filter
    pub fn property(name: impl Into<String>, op: FilterOp, value: JsonValue) -> Self {
        Self::PropertyFilter(PropertyFilter {
            property: PropertyReference { name: name.into() },
            op,
            value,
        })
    }

    /// Combine filters with AND
    pub fn and(filters: Vec<Filter>) -> Self {
        Self::CompositeFilter(CompositeFilter {
            op: CompositeOp::And,
            filters,
        })
    }

    /// Combine filters with OR
    pub fn or(filters: Vec<Filter>) -> Self {
        Self::CompositeFilter(CompositeFilter {
            op: CompositeOp::Or,
            filters,
        })
    }
}

/// Query descriptor
///
/// Built with the chained setters below and then handed by value to
/// [`crate::Dataset::run`]. Continuation requests are derived with
/// [`Query::continue_from`], which leaves the original untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Query {
    /// Kinds to query
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub kind: Vec<KindExpression>,
    /// Filter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<Filter>,
    /// Sort orders
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub order: Vec<PropertyOrder>,
    /// Position to start from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_cursor: Option<Cursor>,
    /// Position to stop at
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_cursor: Option<Cursor>,
    /// Results to skip
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
    /// Maximum results overall
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl Query {
    /// Create an empty (kindless) query
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a kind
    #[must_use]
    pub fn kind(mut self, name: impl Into<String>) -> Self {
        self.kind.push(KindExpression { name: name.into() });
        self
    }

    /// Add a property filter, AND-ing it with any existing filter
    #[must_use]
    pub fn filter(mut self, name: impl Into<String>, op: FilterOp, value: JsonValue) -> Self {
        let filter = Filter::property(name, op, value);
        self.filter = Some(match self.filter.take() {
            None => filter,
            Some(Filter::CompositeFilter(CompositeFilter {
                op: CompositeOp::And,
                mut filters,
            })) => {
                filters.push(filter);
                Filter::and(filters)
            }
            Some(existing) => Filter::and(vec![existing, filter]),
        });
        self
    }

    /// Add a sort order
    #[must_use]
    pub fn order(mut self, name: impl Into<String>, direction: Direction) -> Self {
        self.order.push(PropertyOrder {
            property: PropertyReference { name: name.into() },
            direction,
        });
        self
    }

    /// Set the start cursor
    #[must_use]
    pub fn start(mut self, cursor: Cursor) -> Self {
        self.start_cursor = Some(cursor);
        self
    }

    /// Set the end cursor
    #[must_use]
    pub fn end(mut self, cursor: Cursor) -> Self {
        self.end_cursor = Some(cursor);
        self
    }

    /// Set the offset
    #[must_use]
    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Set the overall result limit
    #[must_use]
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Derive the query that resumes at `cursor`
    ///
    /// The start cursor is replaced and the offset dropped, since the cursor
    /// already points past the skipped results. Everything else is kept.
    pub fn continue_from(&self, cursor: &Cursor) -> Self {
        Self {
            start_cursor: Some(cursor.clone()),
            offset: None,
            ..self.clone()
        }
    }

    /// Names of the queried kinds
    pub fn kinds(&self) -> impl Iterator<Item = &str> {
        self.kind.iter().map(|k| k.name.as_str())
    }
}
