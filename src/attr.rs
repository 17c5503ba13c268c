//! Attributes for elements and hiccup payloads
//!
//! Attributes are ordered key-value pairs. Order is preserved so rendered
//! output is deterministic and matches insertion order.

/// Ordered attribute list
pub type Attrs = Vec<(String, String)>;

/// Extension trait for attribute operations on Attrs
pub trait AttrsExt {
    /// Get an attribute value by name
    fn get_attr(&self, name: &str) -> Option<&str>;

    /// Check if an attribute exists
    fn has_attr(&self, name: &str) -> bool;

    /// Set an attribute value (insert or update in place)
    fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>);

    /// Remove an attribute by name, returning the old value if present
    fn remove_attr(&mut self, name: &str) -> Option<String>;

    /// Append a class to the `class` attribute, creating it if missing
    fn add_class(&mut self, class: &str);
}

impl AttrsExt for Attrs {
    fn get_attr(&self, name: &str) -> Option<&str> {
        self.iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    fn has_attr(&self, name: &str) -> bool {
        self.iter().any(|(k, _)| k == name)
    }

    fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.iter_mut().find(|(k, _)| *k == name) {
            Some(attr) => attr.1 = value,
            None => self.push((name, value)),
        }
    }

    fn remove_attr(&mut self, name: &str) -> Option<String> {
        self.iter()
            .position(|(k, _)| k == name)
            .map(|pos| self.remove(pos).1)
    }

    fn add_class(&mut self, class: &str) {
        if class.is_empty() {
            return;
        }
        match self.iter_mut().find(|(k, _)| k == "class") {
            Some((_, value)) if value.split_whitespace().any(|c| c == class) => {}
            Some((_, value)) if value.is_empty() => value.push_str(class),
            Some((_, value)) => {
                value.push(' ');
                value.push_str(class);
            }
            None => self.push(("class".to_string(), class.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attrs_operations() {
        let mut attrs: Attrs = Vec::new();

        attrs.set_attr("src", "x.png");
        attrs.set_attr("alt", "diagram");
        assert_eq!(attrs.len(), 2);
        assert_eq!(attrs.get_attr("src"), Some("x.png"));
        assert!(!attrs.has_attr("href"));

        // Update keeps position
        attrs.set_attr("src", "y.png");
        assert_eq!(attrs[0], ("src".to_string(), "y.png".to_string()));

        assert_eq!(attrs.remove_attr("alt").as_deref(), Some("diagram"));
        assert_eq!(attrs.len(), 1);
    }

    #[test]
    fn test_add_class() {
        let mut attrs: Attrs = Vec::new();
        attrs.add_class("note");
        attrs.add_class("wide");
        attrs.add_class("note");
        attrs.add_class("");
        assert_eq!(attrs.get_attr("class"), Some("note wide"));
    }
}
