//! Structural validation of a parsed compose tree.
//!
//! Every check runs to completion and records its findings, so a single
//! call reports all violations instead of stopping at the first one.

use serde_yaml::{Mapping, Value};

use crate::error::{ComposeError, Result, SchemaViolation};

use super::ast::ComposeTree;

/// Validates a parsed compose tree against the structural contract.
///
/// # Checks performed
///
/// 1. The root is a map; `version`, when present, is a string.
/// 2. `services` exists, is a map of names to objects, and is not empty.
/// 3. Checked service fields have their declared types. Other service
///    keys pass through unchecked.
/// 4. `volumes` and `networks`, when present, map names to `null` or to
///    an object whose `driver`, `external`, and `name` have the right types.
///
/// # Errors
///
/// Returns [`ComposeError::Schema`] carrying every violation found.
pub fn validate(tree: &ComposeTree) -> Result<()> {
    let violations = violations(tree);
    if violations.is_empty() {
        tracing::debug!("compose document passed schema validation");
        Ok(())
    } else {
        tracing::debug!(count = violations.len(), "compose document failed schema validation");
        Err(ComposeError::Schema { violations })
    }
}

/// Collects all schema violations of a tree, in traversal order.
#[must_use]
pub fn violations(tree: &ComposeTree) -> Vec<SchemaViolation> {
    let mut checker = Checker::default();
    checker.check_root(tree.root());
    checker.violations
}

#[derive(Default)]
struct Checker {
    violations: Vec<SchemaViolation>,
}

impl Checker {
    fn fail(&mut self, path: &str, message: impl Into<String>) {
        self.violations.push(SchemaViolation::new(path, message));
    }

    fn mismatch(&mut self, path: &str, expected: &str, found: &Value) {
        self.fail(
            path,
            format!("expected {expected}, received {}", type_name(found)),
        );
    }

    fn check_root(&mut self, root: &Value) {
        let Some(root) = root.as_mapping() else {
            self.mismatch("(root)", "a map of top-level keys", root);
            return;
        };

        if let Some(version) = root.get("version") {
            self.expect_string("version", version);
        }

        match root.get("services") {
            None => self.fail("services", "required"),
            Some(Value::Mapping(services)) => self.check_services(services),
            Some(other) => self.mismatch("services", "a map of services", other),
        }

        for key in ["volumes", "networks"] {
            match root.get(key) {
                None | Some(Value::Null) => {}
                Some(Value::Mapping(section)) => self.check_resources(key, section),
                Some(other) => self.mismatch(key, "a map", other),
            }
        }
    }

    fn check_services(&mut self, services: &Mapping) {
        if services.is_empty() {
            self.fail("services", "no services found");
            return;
        }
        for (name, definition) in services {
            let Some(name) = name.as_str() else {
                self.mismatch("services", "string service names", name);
                continue;
            };
            let path = format!("services.{name}");
            match definition {
                Value::Mapping(fields) => self.check_service(&path, fields),
                other => self.mismatch(&path, "a service object", other),
            }
        }
    }

    fn check_service(&mut self, path: &str, fields: &Mapping) {
        for (key, value) in fields {
            let Some(key) = key.as_str() else { continue };
            let field = format!("{path}.{key}");
            match key {
                "image" | "restart" | "entrypoint" | "working_dir" => {
                    self.expect_string(&field, value);
                }
                "build" => {
                    if !value.is_string() && !value.is_mapping() {
                        self.mismatch(&field, "a string or an object", value);
                    }
                }
                "ports" | "volumes" | "networks" => self.expect_string_list(&field, value),
                "env_file" | "command" => self.expect_string_or_list(&field, value),
                "environment" => {
                    if !value.is_mapping() {
                        self.expect_string_list(&field, value);
                    }
                }
                "labels" => self.check_labels(&field, value),
                "depends_on" => self.check_depends_on(&field, value),
                "healthcheck" => self.check_healthcheck(&field, value),
                _ => {}
            }
        }
    }

    fn check_labels(&mut self, path: &str, value: &Value) {
        match value {
            Value::Mapping(labels) => {
                for (key, label) in labels {
                    let key = key.as_str().unwrap_or("?");
                    self.expect_string(&format!("{path}.{key}"), label);
                }
            }
            Value::Sequence(items) => {
                for (i, item) in items.iter().enumerate() {
                    let item_path = format!("{path}.{i}");
                    match item.as_str() {
                        Some(s) if is_label_assignment(s) => {}
                        Some(_) => self.fail(&item_path, "expected a \"key=value\" label"),
                        None => self.mismatch(&item_path, "string", item),
                    }
                }
            }
            other => self.mismatch(path, "a map or a list of strings", other),
        }
    }

    fn check_depends_on(&mut self, path: &str, value: &Value) {
        match value {
            Value::Sequence(_) => self.expect_string_list(path, value),
            Value::Mapping(deps) => {
                for (name, condition) in deps {
                    let name = name.as_str().unwrap_or("?");
                    let dep_path = format!("{path}.{name}");
                    match condition {
                        Value::Mapping(c) => match c.get("condition") {
                            Some(v) => self.expect_string(&format!("{dep_path}.condition"), v),
                            None => self.fail(&format!("{dep_path}.condition"), "required"),
                        },
                        other => self.mismatch(&dep_path, "a condition object", other),
                    }
                }
            }
            other => self.mismatch(path, "a list of strings or a map of conditions", other),
        }
    }

    fn check_healthcheck(&mut self, path: &str, value: &Value) {
        let Some(check) = value.as_mapping() else {
            self.mismatch(path, "an object", value);
            return;
        };
        match check.get("test") {
            Some(test) => self.expect_string_or_list(&format!("{path}.test"), test),
            None => self.fail(&format!("{path}.test"), "required"),
        }
        match check.get("timeout") {
            Some(timeout) => self.expect_string(&format!("{path}.timeout"), timeout),
            None => self.fail(&format!("{path}.timeout"), "required"),
        }
        match check.get("retries") {
            Some(retries) if !retries.is_number() => {
                self.mismatch(&format!("{path}.retries"), "number", retries);
            }
            Some(_) => {}
            None => self.fail(&format!("{path}.retries"), "required"),
        }
    }

    fn check_resources(&mut self, section: &str, entries: &Mapping) {
        for (name, definition) in entries {
            let Some(name) = name.as_str() else {
                self.mismatch(section, "string names", name);
                continue;
            };
            let path = format!("{section}.{name}");
            match definition {
                Value::Null => {}
                Value::Mapping(fields) => {
                    if let Some(driver) = fields.get("driver") {
                        self.expect_string(&format!("{path}.driver"), driver);
                    }
                    if let Some(external) = fields.get("external") {
                        if !external.is_bool() {
                            self.mismatch(&format!("{path}.external"), "boolean", external);
                        }
                    }
                    if let Some(custom) = fields.get("name") {
                        self.expect_string(&format!("{path}.name"), custom);
                    }
                }
                other => self.mismatch(&path, "null or an object", other),
            }
        }
    }

    fn expect_string(&mut self, path: &str, value: &Value) {
        if !value.is_string() {
            self.mismatch(path, "string", value);
        }
    }

    fn expect_string_list(&mut self, path: &str, value: &Value) {
        let Some(items) = value.as_sequence() else {
            self.mismatch(path, "a list of strings", value);
            return;
        };
        for (i, item) in items.iter().enumerate() {
            self.expect_string(&format!("{path}.{i}"), item);
        }
    }

    fn expect_string_or_list(&mut self, path: &str, value: &Value) {
        if !value.is_string() {
            self.expect_string_list(path, value);
        }
    }
}

fn is_label_assignment(label: &str) -> bool {
    label.split_once('=').is_some_and(|(key, _)| !key.is_empty())
}

const fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "list",
        Value::Mapping(_) => "map",
        Value::Tagged(_) => "tagged value",
    }
}
