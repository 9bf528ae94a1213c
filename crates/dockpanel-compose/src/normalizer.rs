//! Strict-mode environment binding.
//!
//! When strict mode is on and at least one variable is declared, every
//! service references the generated environment file exactly once.
//! Applying the pass to its own output changes nothing.

use dockpanel_common::types::CollectionKind;
use serde_yaml::{Mapping, Value};

use crate::parser::ast::ComposeTree;

/// Inputs of a normalization pass.
#[derive(Debug, Clone, Copy)]
pub struct NormalizeOptions<'a> {
    /// Whether strict mode is on.
    pub strict: bool,
    /// Number of declared project variables.
    pub variable_count: usize,
    /// Path of the generated environment file.
    pub env_file: &'a str,
}

/// Binds the generated environment file into every service.
///
/// Returns the number of services that were modified. The pass is a no-op
/// when strict mode is off or no variable is declared.
///
/// For each service:
/// - `env_file` absent: set to a one-element list holding the path.
/// - `env_file` already references the path: left untouched.
/// - `env_file` present without the path: the path is appended, turning
///   a single string into a list.
pub fn normalize(tree: &mut ComposeTree, options: NormalizeOptions<'_>) -> usize {
    if !options.strict || options.variable_count == 0 {
        return 0;
    }
    let Some(services) = tree.section_mut(CollectionKind::Services) else {
        return 0;
    };

    let mut changed = 0;
    for (name, definition) in services.iter_mut() {
        if bind_env_file(definition, options.env_file) {
            changed += 1;
            tracing::debug!(
                service = name.as_str().unwrap_or_default(),
                env_file = options.env_file,
                "bound environment file"
            );
        }
    }
    changed
}

fn bind_env_file(definition: &mut Value, env_file: &str) -> bool {
    if definition.is_null() {
        *definition = Value::Mapping(Mapping::new());
    }
    let Some(fields) = definition.as_mapping_mut() else {
        return false;
    };

    let bound = Value::from(env_file);
    match fields.get_mut("env_file") {
        None => {
            let _ = fields.insert(Value::from("env_file"), Value::Sequence(vec![bound]));
            true
        }
        Some(Value::Sequence(files)) => {
            if files.contains(&bound) {
                false
            } else {
                files.push(bound);
                true
            }
        }
        Some(single) => {
            if *single == bound {
                false
            } else {
                let existing = std::mem::take(single);
                *single = Value::Sequence(vec![existing, bound]);
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{parse, serialize};

    const ENV: &str = ".env";

    fn strict(count: usize) -> NormalizeOptions<'static> {
        NormalizeOptions {
            strict: true,
            variable_count: count,
            env_file: ENV,
        }
    }

    fn env_files(tree: &ComposeTree, service: &str) -> Vec<String> {
        tree.entries(CollectionKind::Services)
            .find(|(n, _)| *n == service)
            .map(|(_, v)| crate::parser::ast::ServiceView::new(v).env_files())
            .unwrap_or_default()
    }

    #[test]
    fn lax_mode_is_a_noop() {
        let mut tree = parse("services:\n  web:\n    image: nginx\n").expect("parse");
        let before = tree.clone();
        let options = NormalizeOptions {
            strict: false,
            ..strict(3)
        };
        assert_eq!(normalize(&mut tree, options), 0);
        assert_eq!(tree, before);
    }

    #[test]
    fn no_variables_is_a_noop() {
        let mut tree = parse("services:\n  web:\n    image: nginx\n").expect("parse");
        let before = tree.clone();
        assert_eq!(normalize(&mut tree, strict(0)), 0);
        assert_eq!(tree, before);
    }

    #[test]
    fn absent_env_file_becomes_single_entry_list() {
        let mut tree = parse("services:\n  web:\n    image: nginx\n").expect("parse");
        assert_eq!(normalize(&mut tree, strict(1)), 1);
        assert_eq!(env_files(&tree, "web"), vec![".env"]);
    }

    #[test]
    fn existing_list_gets_path_appended() {
        let mut tree =
            parse("services:\n  web:\n    env_file:\n      - base.env\n").expect("parse");
        let _ = normalize(&mut tree, strict(2));
        assert_eq!(env_files(&tree, "web"), vec!["base.env", ".env"]);
    }

    #[test]
    fn existing_string_becomes_list() {
        let mut tree = parse("services:\n  web:\n    env_file: base.env\n").expect("parse");
        let _ = normalize(&mut tree, strict(2));
        assert_eq!(env_files(&tree, "web"), vec!["base.env", ".env"]);
    }

    #[test]
    fn already_bound_is_untouched() {
        let mut tree = parse("services:\n  a:\n    env_file: .env\n  b:\n    env_file: [x, .env]\n")
            .expect("parse");
        let before = tree.clone();
        assert_eq!(normalize(&mut tree, strict(5)), 0);
        assert_eq!(tree, before);
    }

    #[test]
    fn null_service_gets_env_file() {
        let mut tree = parse("services:\n  web:\n").expect("parse");
        assert_eq!(normalize(&mut tree, strict(1)), 1);
        assert_eq!(env_files(&tree, "web"), vec![".env"]);
    }

    #[test]
    fn env_file_is_appended_after_existing_keys() {
        let mut tree =
            parse("services:\n  web:\n    image: nginx\n    ports: ['80:80']\n").expect("parse");
        let _ = normalize(&mut tree, strict(1));
        let keys: Vec<&str> = tree
            .entries(CollectionKind::Services)
            .flat_map(|(_, v)| v.as_mapping().into_iter().flat_map(Mapping::keys))
            .filter_map(Value::as_str)
            .collect();
        assert_eq!(keys, vec!["image", "ports", "env_file"]);
    }

    #[test]
    fn second_pass_is_byte_identical() {
        let text = "services:\n  web:\n    image: nginx\n    env_file: base.env\n  db:\n    image: postgres\nvolumes:\n  db_data:\n";
        let mut first = parse(text).expect("parse");
        let _ = normalize(&mut first, strict(3));
        let once = serialize(&first).expect("serialize");

        let mut second = parse(&once).expect("reparse");
        assert_eq!(normalize(&mut second, strict(3)), 0);
        let twice = serialize(&second).expect("serialize");
        assert_eq!(once, twice);
    }
}
