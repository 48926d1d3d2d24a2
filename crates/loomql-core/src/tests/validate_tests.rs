//! Tests for query validation against the linked schema.

use crate::GraphErrorKind;
use crate::schema::Schema;
use crate::schema::link;
use crate::validate::validate;
use loomql_parser::parse_query;
use loomql_parser::parse_schema;

fn test_schema() -> Schema {
    let raw = parse_schema(
        "
        scalar Number
        scalar String
        type FriendsInput { test: Number }
        type User {
            _id: String
            firstName: String
            friends(limit: Number!): [User]
        }
        message UpdateUser(
            _id: String!
            firstName: String
            friends: FriendsInput
            tags: [String]
        ): User
        ",
    )
    .unwrap();
    link(&raw).unwrap()
}

fn check(query: &str) -> Result<(), crate::GraphError> {
    validate(&parse_query(query).unwrap(), &test_schema())
}

#[test]
fn valid_query_passes() {
    check(
        r#"
        message UpdateUser (_id: "a", friends: { test: 1 }) {
            _id
            friends(limit: 5) { firstName }
        }
        "#,
    )
    .unwrap();
}

#[test]
fn unknown_message() {
    let err = check("message Unknown").unwrap_err();
    assert_eq!(err.kind(), GraphErrorKind::Validation);
    assert_eq!(err.message(), "no recognized message type: Unknown");
}

#[test]
fn unrecognized_input() {
    let err = check(r#"message UpdateUser (_id: "a", bogus: 1)"#).unwrap_err();
    assert_eq!(err.message(), "unrecognized input UpdateUser.bogus");
    assert_eq!(err.path(), "UpdateUser.bogus");
}

#[test]
fn unrecognized_nested_input() {
    let err = check(r#"message UpdateUser (_id: "a", friends: { bogus: 1 })"#).unwrap_err();
    assert_eq!(err.path(), "UpdateUser.friends.bogus");
}

#[test]
fn missing_required_input() {
    let err = check("message UpdateUser (firstName: \"B\")").unwrap_err();
    assert_eq!(err.message(), "missing required input UpdateUser._id");
}

/// Supplying `null` for a required input is the same as omitting it.
#[test]
fn null_required_input() {
    let err = check("message UpdateUser (_id: null)").unwrap_err();
    assert_eq!(err.message(), "missing required input UpdateUser._id");
}

#[test]
fn type_input_must_be_object_shaped() {
    let err = check(r#"message UpdateUser (_id: "a", friends: 5)"#).unwrap_err();
    assert_eq!(
        err.message(),
        "input UpdateUser.friends is not of type FriendsInput",
    );
}

#[test]
fn array_input_must_be_sequence_shaped() {
    let err = check(r#"message UpdateUser (_id: "a", tags: "x")"#).unwrap_err();
    assert_eq!(err.message(), "input UpdateUser.tags is not an array");
}

#[test]
fn unknown_want_field() {
    let err = check(r#"message UpdateUser (_id: "a") { bogus }"#).unwrap_err();
    assert_eq!(err.message(), "no such field UpdateUser.bogus");
}

/// A want targeting a composite field must select something beneath it.
#[test]
fn composite_want_requires_nested_wants() {
    let err = check(r#"message UpdateUser (_id: "a") { friends(limit: 1) }"#).unwrap_err();
    assert_eq!(err.message(), "no wants provided for UpdateUser.friends");
}

/// Want call-site arguments are validated like inputs, including required
/// argument presence.
#[test]
fn want_arguments_are_validated() {
    let err = check(r#"message UpdateUser (_id: "a") { friends { firstName } }"#).unwrap_err();
    assert_eq!(
        err.message(),
        "missing required input UpdateUser.friends.limit",
    );

    let err =
        check(r#"message UpdateUser (_id: "a") { friends(limit: 1, x: 2) { firstName } }"#)
            .unwrap_err();
    assert_eq!(err.message(), "unrecognized input UpdateUser.friends.x");
}

/// Aliased wants are validated against their target field, and paths use
/// the alias.
#[test]
fn aliased_want_paths() {
    let err = check(r#"message U: UpdateUser (_id: "a") { pals: friends { bogus } }"#)
        .unwrap_err();
    assert_eq!(err.message(), "missing required input U.pals.limit");
}
