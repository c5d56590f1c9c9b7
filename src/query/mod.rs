//! Query module
//!
//! The query descriptor sent with every page fetch.
//!
//! # Overview
//!
//! A `Query` is an immutable description of what to fetch: kinds, an
//! optional filter, orders, offset, limit and cursors. The pagination engine
//! never mutates a query; it derives continuation copies with
//! [`Query::continue_from`].

mod types;
pub mod value;

pub use types::{
    CompositeFilter, CompositeOp, Direction, Filter, FilterOp, KindExpression, PropertyFilter,
    PropertyOrder, PropertyReference, Query,
};

#[cfg(test)]
mod tests;
