//! Tests for query module

use super::*;
use crate::entity::Key;
use crate::types::Cursor;
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn test_query_kind_serializes_to_rest_shape() {
    let query = Query::new().kind("Task");
    let json = serde_json::to_value(&query).unwrap();
    assert_eq!(json, json!({"kind": [{"name": "Task"}]}));
}

#[test]
fn test_query_full_shape() {
    let query = Query::new()
        .kind("Task")
        .filter("done", FilterOp::Equal, value::boolean(false))
        .filter("priority", FilterOp::GreaterThanOrEqual, value::integer(4))
        .order("priority", Direction::Descending)
        .start(Cursor::from("abc"))
        .offset(5)
        .limit(100);

    let json = serde_json::to_value(&query).unwrap();
    assert_eq!(
        json,
        json!({
            "kind": [{"name": "Task"}],
            "filter": {
                "compositeFilter": {
                    "op": "AND",
                    "filters": [
                        {"propertyFilter": {
                            "property": {"name": "done"},
                            "op": "EQUAL",
                            "value": {"booleanValue": false}
                        }},
                        {"propertyFilter": {
                            "property": {"name": "priority"},
                            "op": "GREATER_THAN_OR_EQUAL",
                            "value": {"integerValue": "4"}
                        }}
                    ]
                }
            },
            "order": [{"property": {"name": "priority"}, "direction": "DESCENDING"}],
            "startCursor": "YWJj",
            "offset": 5,
            "limit": 100
        })
    );
}

#[test]
fn test_single_filter_is_not_wrapped() {
    let query = Query::new().filter("name", FilterOp::Equal, value::string("thingamajig"));
    assert_eq!(
        query.filter,
        Some(Filter::property(
            "name",
            FilterOp::Equal,
            json!({"stringValue": "thingamajig"})
        ))
    );
}

#[test]
fn test_third_filter_extends_existing_and() {
    let query = Query::new()
        .filter("a", FilterOp::Equal, value::integer(1))
        .filter("b", FilterOp::Equal, value::integer(2))
        .filter("c", FilterOp::Equal, value::integer(3));

    match query.filter {
        Some(Filter::CompositeFilter(CompositeFilter { op, filters })) => {
            assert_eq!(op, CompositeOp::And);
            assert_eq!(filters.len(), 3);
        }
        other => panic!("Expected AND composite, got {other:?}"),
    }
}

#[test]
fn test_continue_from_only_replaces_start_cursor() {
    let original = Query::new()
        .kind("Task")
        .filter("done", FilterOp::Equal, value::boolean(false))
        .order("created", Direction::Ascending);
    let snapshot = original.clone();

    let cursor = Cursor::from("second-page-cursor");
    let next = original.continue_from(&cursor);

    assert_eq!(original, snapshot);
    assert_eq!(next.start_cursor, Some(cursor));
    assert_eq!(next.kind, original.kind);
    assert_eq!(next.filter, original.filter);
    assert_eq!(next.order, original.order);
}

#[test]
fn test_continue_from_is_idempotent() {
    let original = Query::new().kind("Task").limit(10);
    let cursor = Cursor::from("second-page-cursor");

    let first = serde_json::to_value(original.continue_from(&cursor)).unwrap();
    let second = serde_json::to_value(original.continue_from(&cursor)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_continue_from_replaces_existing_start_and_drops_offset() {
    let original = Query::new()
        .kind("Task")
        .start(Cursor::from("first"))
        .offset(3);
    let next = original.continue_from(&Cursor::from("second"));

    assert_eq!(next.start_cursor, Some(Cursor::from("second")));
    assert_eq!(next.offset, None);
    assert_eq!(original.offset, Some(3));
}

#[test]
fn test_query_kinds() {
    let query = Query::new().kind("Task").kind("List");
    assert_eq!(query.kinds().collect::<Vec<_>>(), vec!["Task", "List"]);
}

#[test]
fn test_value_helpers() {
    assert_eq!(value::null(), json!({"nullValue": null}));
    assert_eq!(value::double(1.5), json!({"doubleValue": 1.5}));
    assert_eq!(
        value::key(&Key::with_name("Task", "t1")),
        json!({"keyValue": {"path": [{"kind": "Task", "name": "t1"}]}})
    );
}

#[test]
fn test_query_deserialize_roundtrip_shape() {
    let query: Query = serde_json::from_value(json!({
        "kind": [{"name": "Task"}],
        "startCursor": "YWJj",
        "limit": 5
    }))
    .unwrap();

    assert_eq!(query.kinds().next(), Some("Task"));
    assert_eq!(query.start_cursor, Some(Cursor::from("abc")));
    assert_eq!(query.limit, Some(5));
}
