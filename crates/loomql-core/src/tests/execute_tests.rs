//! End-to-end engine tests: parse, validate, cost-check, and resolve
//! queries against small schemas with in-memory resolvers.

use crate::Graph;
use crate::GraphError;
use crate::GraphErrorKind;
use crate::ExecuteOptions;
use crate::resolver::Data;
use crate::resolver::DirectiveResolver;
use crate::resolver::FieldInfo;
use crate::resolver::FieldResolver;
use crate::resolver::FieldVisit;
use crate::resolver::InputVisit;
use crate::resolver::ScalarResolver;
use crate::tests::support::EchoInputs;
use crate::tests::support::EchoN;
use crate::tests::support::StaticMessage;
use async_trait::async_trait;
use indexmap::IndexMap;
use serde_json::Value;
use serde_json::json;
use std::sync::atomic::Ordering;

// =============================================================================
// Basic message execution
// =============================================================================

#[tokio::test]
async fn echo_message_round_trip() {
    let (echo, calls) = EchoN::new();
    let graph = Graph::builder()
        .schema("message Echo(n: Number!): Number")
        .message_resolver("Echo", echo)
        .build()
        .unwrap();

    let result = graph
        .execute("message Echo(n: 5)", ExecuteOptions::default())
        .await
        .unwrap();

    assert_eq!(result, json!({ "Echo": 5.0 }));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

/// Result keys follow query source order, one per message alias.
#[tokio::test]
async fn message_order_is_preserved_in_result_keys() {
    let (echo, _) = EchoN::new();
    let graph = Graph::builder()
        .schema("message Echo(n: Number!): Number")
        .message_resolver("Echo", echo)
        .build()
        .unwrap();

    let result = graph
        .execute(
            "message b: Echo(n: 2)\nmessage a: Echo(n: 1)",
            ExecuteOptions::default(),
        )
        .await
        .unwrap();

    let keys: Vec<_> = result.as_object().unwrap().keys().cloned().collect();
    assert_eq!(keys, vec!["b", "a"]);
    assert_eq!(result["b"], json!(2.0));
    assert_eq!(result["a"], json!(1.0));
}

#[tokio::test]
async fn unknown_message_is_rejected() {
    let (echo, calls) = EchoN::new();
    let graph = Graph::builder()
        .schema("message Echo(n: Number!): Number")
        .message_resolver("Echo", echo)
        .build()
        .unwrap();

    let err = graph
        .execute("message Unknown", ExecuteOptions::default())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), GraphErrorKind::Validation);
    assert_eq!(err.message(), "no recognized message type: Unknown");
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn malformed_query_is_a_syntax_error() {
    let (echo, _) = EchoN::new();
    let graph = Graph::builder()
        .schema("message Echo(n: Number!): Number")
        .message_resolver("Echo", echo)
        .build()
        .unwrap();

    let err = graph
        .execute("message Echo(n: )", ExecuteOptions::default())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), GraphErrorKind::Syntax);
}

// =============================================================================
// Nullability policy
// =============================================================================

#[tokio::test]
async fn nullable_field_yields_null_without_error() {
    let graph = Graph::builder()
        .schema("type Post { title: String }\nmessage Post: Post")
        .message_resolver("Post", StaticMessage(Data::Object(IndexMap::new())))
        .build()
        .unwrap();

    let result = graph
        .execute("message Post { title }", ExecuteOptions::default())
        .await
        .unwrap();
    assert_eq!(result, json!({ "Post": { "title": null } }));
}

#[tokio::test]
async fn non_nullable_field_receiving_null_is_an_error() {
    let graph = Graph::builder()
        .schema("type Post { title: String! }\nmessage Post: Post")
        .message_resolver("Post", StaticMessage(Data::Object(IndexMap::new())))
        .build()
        .unwrap();

    let err = graph
        .execute("message Post { title }", ExecuteOptions::default())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), GraphErrorKind::Resolution);
    assert_eq!(err.message(), "non-nullable field received null");
    assert_eq!(err.path(), "Post.title");
}

#[tokio::test]
async fn nullable_message_output_yields_null() {
    let graph = Graph::builder()
        .schema("type User { name: String }\nmessage Me: User")
        .message_resolver("Me", StaticMessage(Data::null()))
        .build()
        .unwrap();

    let result = graph
        .execute("message Me { name }", ExecuteOptions::default())
        .await
        .unwrap();
    assert_eq!(result, json!({ "Me": null }));
}

#[tokio::test]
async fn non_nullable_message_output_receiving_null_is_an_error() {
    let graph = Graph::builder()
        .schema("type User { name: String }\nmessage Me: User!")
        .message_resolver("Me", StaticMessage(Data::null()))
        .build()
        .unwrap();

    let err = graph
        .execute("message Me { name }", ExecuteOptions::default())
        .await
        .unwrap_err();
    assert_eq!(err.path(), "Me");
}

#[tokio::test]
async fn non_nullable_array_item_receiving_null_is_an_error() {
    let graph = Graph::builder()
        .schema("type T { xs: [Number!] }\nmessage T: T")
        .message_resolver(
            "T",
            StaticMessage(Data::Value(json!({ "xs": [1.0, null] }))),
        )
        .build()
        .unwrap();

    let err = graph
        .execute("message T { xs }", ExecuteOptions::default())
        .await
        .unwrap_err();
    assert_eq!(err.path(), "T.xs.1");
}

// =============================================================================
// Scalar coercion
// =============================================================================

#[tokio::test]
async fn input_coercion_failure_is_path_tagged() {
    let (echo, calls) = EchoN::new();
    let graph = Graph::builder()
        .schema("message Echo(n: Number!): Number")
        .message_resolver("Echo", echo)
        .build()
        .unwrap();

    let err = graph
        .execute(r#"message Echo(n: "five")"#, ExecuteOptions::default())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), GraphErrorKind::Resolution);
    assert_eq!(err.path(), "Echo.n");
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

/// The `String` scalar stringifies defined non-string output values.
#[tokio::test]
async fn string_outgoing_stringifies() {
    let graph = Graph::builder()
        .schema("type T { n: String }\nmessage T: T")
        .message_resolver("T", StaticMessage(Data::Value(json!({ "n": 7.0 }))))
        .build()
        .unwrap();

    let result = graph
        .execute("message T { n }", ExecuteOptions::default())
        .await
        .unwrap();
    assert_eq!(result, json!({ "T": { "n": "7.0" } }));
}

/// A registered custom scalar coerces inputs before the message resolver
/// sees them.
#[tokio::test]
async fn custom_scalar_incoming_conversion() {
    struct ObjectId;

    #[async_trait]
    impl ScalarResolver for ObjectId {
        async fn incoming(&self, value: Value) -> Result<Value, GraphError> {
            match value {
                Value::String(s) => Ok(Value::String(format!("oid:{s}"))),
                other => Err(GraphError::reject(format!("not an object id: {other}"))),
            }
        }

        async fn outgoing(&self, value: Value) -> Result<Value, GraphError> {
            Ok(value)
        }
    }

    let graph = Graph::builder()
        .schema("scalar ObjectID\ntype Saved { id: String }\nmessage Save(id: ObjectID): Saved")
        .scalar_resolver("ObjectID", ObjectId)
        .message_resolver("Save", EchoInputs)
        .build()
        .unwrap();

    let result = graph
        .execute(r#"message Save(id: "abc") { id }"#, ExecuteOptions::default())
        .await
        .unwrap();
    assert_eq!(result, json!({ "Save": { "id": "oid:abc" } }));
}

#[tokio::test]
async fn builtin_scalars_round_trip() {
    use crate::resolver::BooleanScalar;
    use crate::resolver::NumberScalar;
    use crate::resolver::StringScalar;

    let n = NumberScalar.incoming(json!(1.5)).await.unwrap();
    assert_eq!(NumberScalar.outgoing(n).await.unwrap(), json!(1.5));

    let s = StringScalar.incoming(json!("x")).await.unwrap();
    assert_eq!(StringScalar.outgoing(s).await.unwrap(), json!("x"));

    let b = BooleanScalar.incoming(json!(true)).await.unwrap();
    assert_eq!(BooleanScalar.outgoing(b).await.unwrap(), json!(true));
}

// =============================================================================
// Directive chains
// =============================================================================

/// An input directive transforms the coerced value returned by the rest
/// of the chain.
#[tokio::test]
async fn input_directive_transforms_value() {
    struct Lowercase;

    #[async_trait]
    impl DirectiveResolver for Lowercase {
        async fn input_visitor(&self, visit: InputVisit<'_>) -> Result<Value, GraphError> {
            match visit.chain.proceed().await? {
                Value::String(s) => Ok(Value::String(s.to_lowercase())),
                other => Ok(other),
            }
        }
    }

    let graph = Graph::builder()
        .schema(
            "directive lowercase INPUT\n\
             type Saved { email: String }\n\
             message Save(email: String @lowercase): Saved",
        )
        .directive_resolver("lowercase", Lowercase)
        .message_resolver("Save", EchoInputs)
        .build()
        .unwrap();

    let result = graph
        .execute(r#"message Save(email: "A@B.C") { email }"#, ExecuteOptions::default())
        .await
        .unwrap();
    assert_eq!(result, json!({ "Save": { "email": "a@b.c" } }));
}

/// A field directive can reject without invoking the rest of the chain;
/// the error surfaces with the field's dotted path.
#[tokio::test]
async fn field_directive_short_circuits() {
    struct Deny;

    #[async_trait]
    impl DirectiveResolver for Deny {
        async fn field_visitor(&self, _visit: FieldVisit<'_>) -> Result<Value, GraphError> {
            Err(GraphError::reject("not authorized"))
        }
    }

    let graph = Graph::builder()
        .schema(
            "directive deny FIELD OBJECT\n\
             type Doc { code: String @deny }\n\
             message Doc: Doc",
        )
        .directive_resolver("deny", Deny)
        .message_resolver("Doc", StaticMessage(Data::Value(json!({ "code": "x" }))))
        .build()
        .unwrap();

    let err = graph
        .execute("message Doc { code }", ExecuteOptions::default())
        .await
        .unwrap_err();
    assert_eq!(err.message(), "not authorized");
    assert_eq!(err.path(), "Doc.code");
}

/// Message-level directives wrap the resolver invocation, so a guard can
/// abort a message before it runs.
#[tokio::test]
async fn message_directive_guards_resolver() {
    struct Deny;

    #[async_trait]
    impl DirectiveResolver for Deny {
        async fn field_visitor(&self, _visit: FieldVisit<'_>) -> Result<Value, GraphError> {
            Err(GraphError::reject("not authorized"))
        }
    }

    let (echo, calls) = EchoN::new();
    let graph = Graph::builder()
        .schema("directive deny OBJECT\nmessage Echo(n: Number): Number @deny")
        .directive_resolver("deny", Deny)
        .message_resolver("Echo", echo)
        .build()
        .unwrap();

    let err = graph
        .execute("message Echo(n: 1)", ExecuteOptions::default())
        .await
        .unwrap_err();
    assert_eq!(err.message(), "not authorized");
    assert_eq!(err.path(), "Echo");
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

/// Built-in directives are metadata-only pass-throughs.
#[tokio::test]
async fn deprecated_fields_still_resolve() {
    let graph = Graph::builder()
        .schema(
            "type T { old: String @deprecated(reason: \"use new\") }\nmessage T: T",
        )
        .message_resolver("T", StaticMessage(Data::Value(json!({ "old": "v" }))))
        .build()
        .unwrap();

    let result = graph
        .execute("message T { old }", ExecuteOptions::default())
        .await
        .unwrap();
    assert_eq!(result, json!({ "T": { "old": "v" } }));
}

// =============================================================================
// Cost gating
// =============================================================================

/// If cost analysis rejects the query, no message resolver runs.
#[tokio::test]
async fn cost_limit_is_a_strict_precondition() {
    let (echo, calls) = EchoN::new();
    let graph = Graph::builder()
        .schema("message Echo(n: Number): Number @cost(cost: 100)")
        .message_resolver("Echo", echo)
        .build()
        .unwrap();

    let err = graph
        .execute(
            "message Echo(n: 1)",
            ExecuteOptions {
                max_cost: 50.0,
                ..ExecuteOptions::default()
            },
        )
        .await
        .unwrap_err();

    assert_eq!(err.kind(), GraphErrorKind::CostLimit);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

// =============================================================================
// Deferred fields, arrays, and paginators
// =============================================================================

/// An object entry may defer to a field resolver, which receives the
/// want's resolved call-site arguments.
#[tokio::test]
async fn lazy_fields_receive_resolved_arguments() {
    struct Friends;

    #[async_trait]
    impl FieldResolver for Friends {
        async fn resolve(&self, args: Value, _info: FieldInfo<'_>) -> Result<Data, GraphError> {
            let limit = args.get("limit").and_then(Value::as_f64).unwrap_or(0.0) as usize;
            let all = vec![
                json!({ "name": "ann" }),
                json!({ "name": "bob" }),
                json!({ "name": "cy" }),
            ];
            Ok(Data::Value(Value::Array(
                all.into_iter().take(limit).collect(),
            )))
        }
    }

    let mut me = IndexMap::new();
    me.insert("name".to_string(), Data::Value(json!("zed")));
    me.insert("friends".to_string(), Data::lazy(Friends));

    let graph = Graph::builder()
        .schema(
            "type User { name: String, friends(limit: Number): [User] }\nmessage Me: User",
        )
        .message_resolver("Me", StaticMessage(Data::Object(me)))
        .build()
        .unwrap();

    let result = graph
        .execute(
            "message Me { name, friends(limit: 2) { name } }",
            ExecuteOptions::default(),
        )
        .await
        .unwrap();

    assert_eq!(
        result,
        json!({
            "Me": {
                "name": "zed",
                "friends": [{ "name": "ann" }, { "name": "bob" }],
            },
        }),
    );
}

/// Paginator containers resolve like ordinary types: an `items` array
/// plus the paginator's own fields.
#[tokio::test]
async fn paginator_containers_resolve() {
    let graph = Graph::builder()
        .schema(
            "paginator Cursor { nextPage: Boolean }\n\
             type User { name: String, pals: Cursor[User] }\n\
             message Me: User",
        )
        .message_resolver(
            "Me",
            StaticMessage(Data::Value(json!({
                "name": "z",
                "pals": { "items": [{ "name": "a" }], "nextPage": false },
            }))),
        )
        .build()
        .unwrap();

    let result = graph
        .execute(
            "message Me { pals { items { name }, nextPage } }",
            ExecuteOptions::default(),
        )
        .await
        .unwrap();

    assert_eq!(
        result,
        json!({
            "Me": { "pals": { "items": [{ "name": "a" }], "nextPage": false } },
        }),
    );
}

/// Aliased wants land under their alias while resolving the target field.
#[tokio::test]
async fn aliased_wants_resolve_target_fields() {
    let graph = Graph::builder()
        .schema("type User { name: String }\nmessage Me: User")
        .message_resolver("Me", StaticMessage(Data::Value(json!({ "name": "z" }))))
        .build()
        .unwrap();

    let result = graph
        .execute("message Me { moniker: name }", ExecuteOptions::default())
        .await
        .unwrap();
    assert_eq!(result, json!({ "Me": { "moniker": "z" } }));
}
