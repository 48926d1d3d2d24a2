//! Static cost analysis: walks the validated query tree in lock-step with
//! the schema, accumulating a running total driven by `cost` directive
//! annotations, and aborts before any resolver executes once the total
//! would exceed the caller's budget.

use crate::GraphError;
use crate::schema::FieldDef;
use crate::schema::FieldKind;
use crate::schema::Schema;
use indexmap::IndexMap;
use loomql_parser::ast::DirectiveUse;
use loomql_parser::ast::QueryDocument;
use loomql_parser::ast::Want;
use serde_json::Map;
use serde_json::Value;

/// Walks the query tree and returns its total static cost, or fails with
/// a cost-limit error as soon as the running total would exceed `max`.
///
/// A node with no `cost` directive contributes `default_cost`. A node's
/// own computed cost is the parent cost for its immediate children
/// (applied by `cost(multiplyParent: true)` annotations).
pub(crate) fn analyse(
    document: &QueryDocument,
    schema: &Schema,
    max: f64,
    default_cost: f64,
) -> Result<f64, GraphError> {
    let mut analyser = CostAnalyser {
        schema,
        max,
        default_cost,
        total: 0.0,
    };

    for message in &document.messages {
        let Some(def) = schema.message(&message.field_name) else {
            return Err(GraphError::validation(
                format!("no recognized message type: {}", message.field_name),
                &message.alias,
            ));
        };
        let input = Value::Object(message.args.clone());
        let own = analyser.node_cost(&def.directives, Some(&input), 1.0, &message.alias)?;
        analyser.input_costs(&def.inputs, &message.args, own, &message.alias)?;
        if let Some(fields) = schema.composite_fields(&def.output) {
            analyser.wants_costs(fields, &message.wants, own, &message.alias)?;
        }
    }

    Ok(analyser.total)
}

struct CostAnalyser<'a> {
    schema: &'a Schema,
    max: f64,
    default_cost: f64,
    total: f64,
}

impl CostAnalyser<'_> {
    /// Computes one node's own cost from its `cost` directive uses, adds
    /// it to the running total, and returns it for use as the children's
    /// parent cost.
    fn node_cost(
        &mut self,
        directives: &[DirectiveUse],
        input: Option<&Value>,
        parent_cost: f64,
        path: &str,
    ) -> Result<f64, GraphError> {
        let mut own = 0.0;
        let mut annotated = false;

        for use_ in directives.iter().filter(|d| d.name == "cost") {
            annotated = true;
            let base = use_.args.get("cost").and_then(Value::as_f64).unwrap_or(1.0);
            let multiply_parent = use_
                .args
                .get("multiplyParent")
                .and_then(Value::as_bool)
                .unwrap_or(false);

            let mut multiplier_amount = 1.0;
            if let Some(Value::Array(multipliers)) = use_.args.get("multipliers") {
                for multiplier in multipliers {
                    let Some(dotted) = multiplier.as_str() else {
                        continue;
                    };
                    if let Some(found) = lookup_path(input, dotted) {
                        // A numeric value at the multiplier path contributes
                        // its value; any other present value contributes 1.
                        multiplier_amount += found.as_f64().unwrap_or(1.0);
                    }
                }
            }

            own += (multiplier_amount * base) * if multiply_parent { parent_cost } else { 1.0 };
        }

        if !annotated {
            own = self.default_cost;
        }
        self.add(own, path)?;
        Ok(own)
    }

    /// Adds `amount` to the running total, failing the whole analysis the
    /// moment the budget is exceeded.
    fn add(&mut self, amount: f64, path: &str) -> Result<(), GraphError> {
        if self.total + amount > self.max {
            return Err(GraphError::cost_limit(
                format!("query cost exceeded max budget: {}", self.max),
                path,
            ));
        }
        self.total += amount;
        Ok(())
    }

    fn input_costs(
        &mut self,
        defs: &IndexMap<String, FieldDef>,
        supplied: &Map<String, Value>,
        parent_cost: f64,
        parent_path: &str,
    ) -> Result<(), GraphError> {
        for (name, value) in supplied {
            let Some(def) = defs.get(name) else {
                continue;
            };
            let path = format!("{parent_path}.{name}");
            let own = self.node_cost(&def.directives, Some(value), parent_cost, &path)?;

            match &def.kind {
                FieldKind::Scalar { .. } => {}
                FieldKind::Object { type_name } => {
                    if let Some(nested) = value.as_object() {
                        let fields = self.schema.fields_of(type_name, &path)?;
                        self.input_costs(fields, nested, own, &path)?;
                    }
                }
                FieldKind::List { item } => {
                    if let Some(elements) = value.as_array() {
                        self.element_costs(item, elements, own, &path)?;
                    }
                }
            }
        }
        Ok(())
    }

    /// Array literals visit the item definition once per supplied element,
    /// so larger literals admit proportionally more cost.
    fn element_costs(
        &mut self,
        item: &FieldDef,
        elements: &[Value],
        parent_cost: f64,
        parent_path: &str,
    ) -> Result<(), GraphError> {
        for (index, element) in elements.iter().enumerate() {
            let path = format!("{parent_path}.{index}");
            let own = self.node_cost(&item.directives, Some(element), parent_cost, &path)?;
            match &item.kind {
                FieldKind::Scalar { .. } => {}
                FieldKind::Object { type_name } => {
                    if let Some(nested) = element.as_object() {
                        let fields = self.schema.fields_of(type_name, &path)?;
                        self.input_costs(fields, nested, own, &path)?;
                    }
                }
                FieldKind::List { item } => {
                    if let Some(nested) = element.as_array() {
                        self.element_costs(item, nested, own, &path)?;
                    }
                }
            }
        }
        Ok(())
    }

    fn wants_costs(
        &mut self,
        fields: &IndexMap<String, FieldDef>,
        wants: &[Want],
        parent_cost: f64,
        parent_path: &str,
    ) -> Result<(), GraphError> {
        for want in wants {
            let Some(def) = fields.get(&want.field_name) else {
                continue;
            };
            let path = format!("{parent_path}.{}", want.alias);
            let args = Value::Object(want.args.clone());
            let own = self.node_cost(&def.directives, Some(&args), parent_cost, &path)?;
            self.input_costs(&def.args, &want.args, own, &path)?;
            if let Some(nested) = self.schema.composite_fields(def) {
                self.wants_costs(nested, &want.wants, own, &path)?;
            }
        }
        Ok(())
    }
}

/// Dotted-path lookup into a literal value: `friends.test` finds
/// `input.friends.test` through nested objects.
fn lookup_path<'v>(root: Option<&'v Value>, dotted: &str) -> Option<&'v Value> {
    let mut current = root?;
    for segment in dotted.split('.') {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}
