//! Cross-checks a parsed query tree against the linked schema, before any
//! cost analysis or resolver execution. Fails on the first violation.

use crate::GraphError;
use crate::schema::FieldDef;
use crate::schema::FieldKind;
use crate::schema::Schema;
use indexmap::IndexMap;
use loomql_parser::ast::QueryDocument;
use loomql_parser::ast::Want;
use serde_json::Map;
use serde_json::Value;

pub(crate) fn validate(document: &QueryDocument, schema: &Schema) -> Result<(), GraphError> {
    for message in &document.messages {
        let Some(def) = schema.message(&message.field_name) else {
            return Err(GraphError::validation(
                format!("no recognized message type: {}", message.field_name),
                &message.alias,
            ));
        };
        check_unrecognized_inputs(schema, &message.args, &def.inputs, &message.alias)?;
        check_missing_inputs(&message.args, &def.inputs, &message.alias)?;
        if let Some(fields) = schema.composite_fields(&def.output) {
            for want in &message.wants {
                check_want(schema, want, fields, &message.alias)?;
            }
        }
    }
    Ok(())
}

/// Every supplied input key must correspond to a declared input, and the
/// supplied value's structure must match the declared kind, recursively.
fn check_unrecognized_inputs(
    schema: &Schema,
    supplied: &Map<String, Value>,
    defs: &IndexMap<String, FieldDef>,
    parent_path: &str,
) -> Result<(), GraphError> {
    for (name, value) in supplied {
        let path = format!("{parent_path}.{name}");
        let Some(def) = defs.get(name) else {
            return Err(GraphError::validation(
                format!("unrecognized input {path}"),
                path,
            ));
        };
        check_input_structure(schema, value, def, &path)?;
    }
    Ok(())
}

fn check_input_structure(
    schema: &Schema,
    value: &Value,
    def: &FieldDef,
    path: &str,
) -> Result<(), GraphError> {
    if value.is_null() {
        // Presence of required inputs is checked separately.
        return Ok(());
    }
    match &def.kind {
        FieldKind::Scalar { .. } => Ok(()),
        FieldKind::Object { type_name } => {
            let Some(supplied) = value.as_object() else {
                return Err(GraphError::validation(
                    format!("input {path} is not of type {type_name}"),
                    path,
                ));
            };
            let fields = schema.fields_of(type_name, path)?;
            check_unrecognized_inputs(schema, supplied, fields, path)?;
            check_missing_inputs(supplied, fields, path)
        }
        FieldKind::List { item } => {
            let Some(supplied) = value.as_array() else {
                return Err(GraphError::validation(
                    format!("input {path} is not an array"),
                    path,
                ));
            };
            for (index, element) in supplied.iter().enumerate() {
                let element_path = format!("{path}.{index}");
                if element.is_null() && !item.nullable {
                    return Err(GraphError::validation(
                        format!("missing required input {element_path}"),
                        element_path,
                    ));
                }
                check_input_structure(schema, element, item, &element_path)?;
            }
            Ok(())
        }
    }
}

/// Every declared non-nullable input must be present (and non-null).
fn check_missing_inputs(
    supplied: &Map<String, Value>,
    defs: &IndexMap<String, FieldDef>,
    parent_path: &str,
) -> Result<(), GraphError> {
    for (name, def) in defs {
        if def.nullable {
            continue;
        }
        let path = format!("{parent_path}.{name}");
        let present = matches!(supplied.get(name), Some(value) if !value.is_null());
        if !present {
            return Err(GraphError::validation(
                format!("missing required input {path}"),
                path,
            ));
        }
    }
    Ok(())
}

/// Every requested want must name a declared output field; composite
/// targets must carry a non-empty nested selection; call-site arguments
/// are validated like inputs.
fn check_want(
    schema: &Schema,
    want: &Want,
    fields: &IndexMap<String, FieldDef>,
    parent_path: &str,
) -> Result<(), GraphError> {
    let path = format!("{parent_path}.{}", want.alias);
    let Some(def) = fields.get(&want.field_name) else {
        return Err(GraphError::validation(
            format!("no such field {path}"),
            path,
        ));
    };

    check_unrecognized_inputs(schema, &want.args, &def.args, &path)?;
    check_missing_inputs(&want.args, &def.args, &path)?;

    if let Some(nested_fields) = schema.composite_fields(def) {
        if want.wants.is_empty() {
            return Err(GraphError::validation(
                format!("no wants provided for {path}"),
                path,
            ));
        }
        for child in &want.wants {
            check_want(schema, child, nested_fields, &path)?;
        }
    }
    Ok(())
}
