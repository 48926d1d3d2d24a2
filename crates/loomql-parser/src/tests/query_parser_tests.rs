//! Tests for the query-language parser.

use crate::parse_query;
use serde_json::json;

#[test]
fn empty_query() {
    assert!(parse_query("").unwrap().messages.is_empty());
    assert!(parse_query("\n\n").unwrap().messages.is_empty());
}

#[test]
fn message_invocation_with_inputs_and_wants() {
    let document = parse_query(
        r#"
        message UpdateUser (_id: "abc", friends: { test: 1 }) {
            _id
            firstName
            friends(limit: 5) {
                items {
                    firstName
                }
            }
        }
        "#,
    )
    .unwrap();

    assert_eq!(document.messages.len(), 1);
    let message = &document.messages[0];
    assert_eq!(message.field_name, "UpdateUser");
    assert_eq!(message.alias, "UpdateUser");
    assert_eq!(message.args["_id"], json!("abc"));
    assert_eq!(message.args["friends"], json!({ "test": 1.0 }));

    let aliases: Vec<_> = message.wants.iter().map(|w| w.alias.clone()).collect();
    assert_eq!(aliases, vec!["_id", "firstName", "friends"]);

    let friends = &message.wants[2];
    assert_eq!(friends.args["limit"], json!(5.0));
    assert_eq!(friends.wants[0].field_name, "items");
    assert_eq!(friends.wants[0].wants[0].field_name, "firstName");
}

/// `Alias: FieldName` targets `FieldName` but assigns the result under
/// `Alias`; invocation order is preserved.
#[test]
fn aliased_invocations() {
    let document = parse_query(
        "
        message first: User (n: 1) { _id }
        message second: User (n: 2) { _id }
        ",
    )
    .unwrap();

    assert_eq!(document.messages.len(), 2);
    assert_eq!(document.messages[0].alias, "first");
    assert_eq!(document.messages[0].field_name, "User");
    assert_eq!(document.messages[1].alias, "second");
}

#[test]
fn nested_array_and_object_literals() {
    let document = parse_query(
        r#"message M (tags: ["a", "b"], meta: { inner: [1, 2], flag: true, none: null })"#,
    )
    .unwrap();

    let args = &document.messages[0].args;
    assert_eq!(args["tags"], json!(["a", "b"]));
    assert_eq!(
        args["meta"],
        json!({ "inner": [1.0, 2.0], "flag": true, "none": null }),
    );
}

/// A want with no nested block is a scalar leaf: empty wants.
#[test]
fn scalar_leaf_wants() {
    let document = parse_query("message Me { firstName }").unwrap();
    assert!(document.messages[0].wants[0].wants.is_empty());
}

// =============================================================================
// Errors
// =============================================================================

#[test]
fn alias_without_field_name_is_an_error() {
    let err = parse_query("message Get: (n: 1)").unwrap_err();
    assert!(err.message().contains("expected a name"));
    assert_eq!(err.path(), "Get");
}

#[test]
fn non_message_at_top_level_is_an_error() {
    let err = parse_query("UpdateUser { _id }").unwrap_err();
    assert!(err.message().contains("expected keyword `message`"));
}

#[test]
fn bare_identifier_is_not_a_literal_value() {
    let err = parse_query("message M (id: abc)").unwrap_err();
    assert!(err.message().contains("not a valid literal value"));
    assert_eq!(err.path(), "M.id");
}

#[test]
fn unterminated_wants_block_is_an_error() {
    let err = parse_query("message M { _id").unwrap_err();
    assert!(err.message().contains("before end of input"));
}
