// ABOUTME: Namespace to label-selector transform
// ABOUTME: Derives the selector string injected as NS_SELECTOR on every generation

/// Derive a label-selector-style string from a namespace identifier.
/// Pure and total; no validation of the namespace shape.
pub fn namespace_selector(namespace: &str) -> String {
    format!("namespace={}", namespace)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selector_shape() {
        assert_eq!(namespace_selector("team-a"), "namespace=team-a");
        assert_eq!(namespace_selector(""), "namespace=");
    }
}
