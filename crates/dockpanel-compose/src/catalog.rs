//! Read-only access to a project's declared variables.
//!
//! The engine only counts variable keys; it never reads their values.

/// Ordered list of declared variable keys.
pub trait VariableCatalog {
    /// Declared keys, in declaration order.
    fn keys(&self) -> Vec<&str>;

    /// Number of declared keys.
    fn count(&self) -> usize {
        self.keys().len()
    }
}

impl VariableCatalog for [String] {
    fn keys(&self) -> Vec<&str> {
        self.iter().map(String::as_str).collect()
    }

    fn count(&self) -> usize {
        self.len()
    }
}

impl VariableCatalog for Vec<String> {
    fn keys(&self) -> Vec<&str> {
        self.as_slice().keys()
    }

    fn count(&self) -> usize {
        self.len()
    }
}

impl VariableCatalog for [&str] {
    fn keys(&self) -> Vec<&str> {
        self.to_vec()
    }

    fn count(&self) -> usize {
        self.len()
    }
}
