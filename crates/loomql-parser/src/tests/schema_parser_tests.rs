//! Tests for the schema-language parser.

use crate::ast::DirectiveSite;
use crate::ast::InputDecl;
use crate::ast::TypeExpr;
use crate::parse_schema;
use serde_json::json;

// =============================================================================
// Top-level declarations
// =============================================================================

#[test]
fn scalar_declarations() {
    let schema = parse_schema("scalar ObjectID\nscalar Date").unwrap();
    assert_eq!(schema.scalar_types, vec!["ObjectID", "Date"]);
}

#[test]
fn type_declaration_with_fields() {
    let schema = parse_schema(
        "
        type User {
            _id: ObjectID
            firstName: String
            roles: [String]
        }
        ",
    )
    .unwrap();

    let user = &schema.types["User"];
    let field_names: Vec<_> = user.fields.keys().cloned().collect();
    assert_eq!(field_names, vec!["_id", "firstName", "roles"]);
    assert_eq!(
        user.fields["roles"].type_expr,
        TypeExpr::List {
            item: "String".to_string(),
            item_nullable: true,
        },
    );
}

/// Commas and line breaks are interchangeable item separators.
#[test]
fn comma_separated_fields() {
    let schema = parse_schema("type Point { x: Number, y: Number }").unwrap();
    assert_eq!(schema.types["Point"].fields.len(), 2);
}

#[test]
fn message_declaration() {
    let schema = parse_schema(
        "message UpdateUser(_id: ObjectID, email: String!): User @cost(cost: 5)",
    )
    .unwrap();

    let message = &schema.messages["UpdateUser"];
    assert_eq!(message.output, TypeExpr::Named { name: "User".to_string() });
    assert!(message.nullable);
    assert_eq!(message.directives[0].name, "cost");
    assert_eq!(message.directives[0].args["cost"], json!(5.0));

    let InputDecl::Field(email) = &message.inputs[1] else {
        panic!("expected a field declaration");
    };
    assert!(!email.nullable);
}

#[test]
fn directive_declaration_with_sites() {
    let schema = parse_schema(
        "directive hasScope(scope: String!) INPUT FIELD OBJECT\ndirective lowercase INPUT",
    )
    .unwrap();

    let has_scope = &schema.directives["hasScope"];
    assert_eq!(
        has_scope.sites,
        vec![
            DirectiveSite::Input,
            DirectiveSite::Field,
            DirectiveSite::Object,
        ],
    );
    assert!(!has_scope.args["scope"].nullable);
    assert_eq!(schema.directives["lowercase"].sites, vec![DirectiveSite::Input]);
}

#[test]
fn paginator_declaration_and_shorthand() {
    let schema = parse_schema(
        "
        paginator CursorPaginator {
            nextPage: Boolean
        }

        type User {
            friends(test: Number, ...PaginationInput): CursorPaginator[User]
        }
        ",
    )
    .unwrap();

    assert!(schema.paginators.contains_key("CursorPaginator"));
    let friends = &schema.types["User"].fields["friends"];
    assert_eq!(
        friends.type_expr,
        TypeExpr::Paginator {
            paginator: "CursorPaginator".to_string(),
            item: "User".to_string(),
            item_nullable: true,
        },
    );
    assert!(matches!(
        friends.args[1],
        InputDecl::Spread { ref type_name } if type_name == "PaginationInput",
    ));
}

/// Directive uses keep their declared order and literal argument values,
/// including array literals.
#[test]
fn directive_uses_on_fields() {
    let schema = parse_schema(
        r#"
        message M(email: String! @lowercase @email): User
            @cost(cost: 5, multipliers: ["friends"])
            @hasScope(scope: "updateProfile")
        "#,
    )
    .unwrap();

    let message = &schema.messages["M"];
    let names: Vec<_> = message.directives.iter().map(|d| d.name.clone()).collect();
    assert_eq!(names, vec!["cost", "hasScope"]);
    assert_eq!(message.directives[0].args["multipliers"], json!(["friends"]));

    let InputDecl::Field(email) = &message.inputs[0] else {
        panic!("expected a field declaration");
    };
    let names: Vec<_> = email.directives.iter().map(|d| d.name.clone()).collect();
    assert_eq!(names, vec!["lowercase", "email"]);
}

// =============================================================================
// Errors
// =============================================================================

#[test]
fn missing_colon_is_an_error() {
    let err = parse_schema("type User { firstName String }").unwrap_err();
    assert_eq!(err.path(), "User.firstName");
    assert!(err.message().contains("expected `:`"));
}

#[test]
fn directive_without_site_is_an_error() {
    let err = parse_schema("directive lowercase\ntype User { a: String }").unwrap_err();
    assert!(err.message().contains("at least one site"));
}

#[test]
fn unknown_site_keyword_is_an_error() {
    let err = parse_schema("directive lowercase INPUTS").unwrap_err();
    assert!(err.message().contains("not a directive site"));
}

#[test]
fn scalar_without_name_is_an_error() {
    let err = parse_schema("scalar").unwrap_err();
    assert!(err.message().contains("expected a name"));
}

#[test]
fn stray_token_at_top_level_is_an_error() {
    let err = parse_schema("User { a: String }").unwrap_err();
    assert!(err.message().contains("expected a top-level declaration"));
}

#[test]
fn unterminated_field_block_is_an_error() {
    let err = parse_schema("type User { a: String").unwrap_err();
    assert!(err.message().contains("before end of input"));
}
