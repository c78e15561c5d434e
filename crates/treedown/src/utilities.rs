//! Element classification tables for the host adapter and serializer.

/// Elements whose subtree is a text-only region. The host context flags
/// descendants of these so the engine knows it is inside text.
pub const TEXT_CONTAINER_ELEMENTS: &[&str] = &["text", "span"];

/// Elements that contribute no markup of their own; their children pass
/// through unchanged.
pub const PASSTHROUGH_ELEMENTS: &[&str] = &[
    "root", "div", "span", "section", "article", "main", "aside", "header",
    "footer", "nav",
];

/// Check if an element kind opens a text-only region.
pub fn is_text_container(kind: &str) -> bool {
    TEXT_CONTAINER_ELEMENTS.contains(&kind)
}

/// Check if an element kind is structural passthrough.
pub fn is_passthrough(kind: &str) -> bool {
    PASSTHROUGH_ELEMENTS.contains(&kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_text_container() {
        assert!(is_text_container("text"));
        assert!(is_text_container("span"));
        assert!(!is_text_container("p"));
        assert!(!is_text_container("div"));
    }

    #[test]
    fn test_is_passthrough() {
        assert!(is_passthrough("div"));
        assert!(is_passthrough("root"));
        assert!(!is_passthrough("li"));
        assert!(!is_passthrough("custom-widget"));
    }
}
