//! Dependency-free structural validator for a reduced JSON Schema subset.
//!
//! Supported keywords: `type`, `required`, `properties`, `patternProperties`,
//! `items` (single schema), `enum`, `minimum`, `maximum`, `pattern`, `anyOf`.
//! Not supported: `$ref`, `oneOf`, `allOf`, `not`, `additionalProperties`,
//! `format`. Unknown keywords are ignored.
//!
//! Errors are `<path>: <message>` strings, where the path is dotted with
//! `[index]` array segments and `root` stands for the document itself.

use super::{SchemaValidator, ValidationReport};
use regex::Regex;
use serde_json::{Map, Value};

/// The built-in fallback validator.
#[derive(Debug, Clone, Copy, Default)]
pub struct StructuralValidator;

impl SchemaValidator for StructuralValidator {
    fn name(&self) -> &'static str {
        "structural"
    }

    fn validate(&self, data: &Value, schema: &Value) -> ValidationReport {
        validate(data, schema)
    }
}

/// Validate `data` against `schema`. Never fails; every defect is reported.
pub fn validate(data: &Value, schema: &Value) -> ValidationReport {
    let mut errors = Vec::new();
    check(data, schema, "", &mut errors);
    ValidationReport::from_errors(errors)
}

fn check(data: &Value, schema: &Value, path: &str, errors: &mut Vec<String>) {
    let schema = match schema {
        Value::Object(map) => map,
        Value::Bool(true) => return,
        Value::Bool(false) => {
            report(errors, path, "no value is allowed here".to_string());
            return;
        }
        _ => return,
    };

    if let Some(expected) = schema.get("type")
        && !type_matches(data, expected)
    {
        report(
            errors,
            path,
            format!("expected type {}, got {}", render_types(expected), json_type(data)),
        );
        return;
    }

    if let Some(Value::Array(allowed)) = schema.get("enum")
        && !allowed.contains(data)
    {
        report(
            errors,
            path,
            format!("value {} is not one of {}", data, Value::Array(allowed.clone())),
        );
    }

    match data {
        Value::Object(object) => check_object(object, schema, path, errors),
        Value::Array(items) => {
            if let Some(item_schema) = schema.get("items").filter(|s| s.is_object() || s.is_boolean()) {
                for (i, item) in items.iter().enumerate() {
                    check(item, item_schema, &index_path(path, i), errors);
                }
            }
        }
        Value::Number(n) => {
            if let Some(value) = n.as_f64() {
                check_bounds(value, schema, path, errors);
            }
        }
        Value::String(s) => {
            if let Some(Value::String(pattern)) = schema.get("pattern") {
                match Regex::new(pattern) {
                    Ok(re) if !re.is_match(s) => report(
                        errors,
                        path,
                        format!("value {} does not match pattern {}", data, pattern),
                    ),
                    Ok(_) => {}
                    Err(_) => report(errors, path, format!("invalid pattern {} in schema", pattern)),
                }
            }
        }
        Value::Bool(_) | Value::Null => {}
    }

    if let Some(Value::Array(branches)) = schema.get("anyOf") {
        // Each branch gets its own buffer; branch errors are not surfaced.
        let matched = branches.iter().any(|branch| {
            let mut scratch = Vec::new();
            check(data, branch, path, &mut scratch);
            scratch.is_empty()
        });
        if !matched {
            report(
                errors,
                path,
                format!("value does not match any of the {} allowed schemas", branches.len()),
            );
        }
    }
}

fn check_object(
    object: &Map<String, Value>,
    schema: &Map<String, Value>,
    path: &str,
    errors: &mut Vec<String>,
) {
    if let Some(Value::Array(required)) = schema.get("required") {
        for key in required.iter().filter_map(Value::as_str) {
            if !object.contains_key(key) {
                report(errors, path, format!("missing required property '{}'", key));
            }
        }
    }

    if let Some(Value::Object(properties)) = schema.get("properties") {
        for (key, property_schema) in properties {
            if let Some(child) = object.get(key) {
                check(child, property_schema, &child_path(path, key), errors);
            }
        }
    }

    if let Some(Value::Object(patterns)) = schema.get("patternProperties") {
        for (pattern, property_schema) in patterns {
            let re = match Regex::new(pattern) {
                Ok(re) => re,
                Err(_) => {
                    report(errors, path, format!("invalid pattern {} in schema", pattern));
                    continue;
                }
            };
            for (key, child) in object.iter().filter(|(k, _)| re.is_match(k)) {
                check(child, property_schema, &child_path(path, key), errors);
            }
        }
    }
}

fn check_bounds(value: f64, schema: &Map<String, Value>, path: &str, errors: &mut Vec<String>) {
    if let Some(min) = schema.get("minimum").and_then(Value::as_f64)
        && value < min
    {
        report(errors, path, format!("value {} is less than minimum {}", value, min));
    }
    if let Some(max) = schema.get("maximum").and_then(Value::as_f64)
        && value > max
    {
        report(errors, path, format!("value {} is greater than maximum {}", value, max));
    }
}

/// `object` means a JSON object only: arrays and `null` do not count.
fn type_matches(data: &Value, expected: &Value) -> bool {
    match expected {
        Value::String(name) => is_type(data, name),
        Value::Array(names) => names
            .iter()
            .filter_map(Value::as_str)
            .any(|name| is_type(data, name)),
        _ => true,
    }
}

fn is_type(data: &Value, name: &str) -> bool {
    match name {
        "object" => data.is_object(),
        "array" => data.is_array(),
        "string" => data.is_string(),
        "boolean" => data.is_boolean(),
        "null" => data.is_null(),
        "number" => data.is_number(),
        "integer" => match data {
            Value::Number(n) => n.is_i64() || n.is_u64() || n.as_f64().is_some_and(|f| f.fract() == 0.0),
            _ => false,
        },
        // Unknown type names never match.
        _ => false,
    }
}

fn json_type(data: &Value) -> &'static str {
    match data {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn render_types(expected: &Value) -> String {
    match expected {
        Value::String(name) => name.clone(),
        Value::Array(names) => names
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join(" | "),
        other => other.to_string(),
    }
}

fn child_path(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", path, key)
    }
}

fn index_path(path: &str, index: usize) -> String {
    format!("{}[{}]", path, index)
}

fn report(errors: &mut Vec<String>, path: &str, message: String) {
    let path = if path.is_empty() { "root" } else { path };
    errors.push(format!("{}: {}", path, message));
}
