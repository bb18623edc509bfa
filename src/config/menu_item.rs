use crate::shared::{next_item_id, ItemId};
use serde::Serialize;

/// A node in the menu tree. `key` is kept as an arbitrary string so shape
/// violations surface as readable validation errors instead of decode
/// failures; the flag fields distinguish absent from explicit false.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MenuItem {
    #[serde(skip_serializing)]
    pub id: ItemId,
    pub key: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sticky: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notify: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hidden: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hotkey: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submenu: Option<Vec<MenuItem>>,
}

impl MenuItem {
    pub fn new(key: &str, title: &str) -> Self {
        Self {
            id: next_item_id(),
            key: key.to_string(),
            title: title.to_string(),
            icon: None,
            action: None,
            sticky: None,
            notify: None,
            batch: None,
            hidden: None,
            hotkey: None,
            submenu: None,
        }
    }

    pub fn with_action(key: &str, title: &str, action: &str) -> Self {
        let mut item = Self::new(key, title);
        item.action = Some(action.to_string());
        item
    }

    pub fn with_submenu(key: &str, title: &str, submenu: Vec<MenuItem>) -> Self {
        let mut item = Self::new(key, title);
        item.submenu = Some(submenu);
        item
    }

    pub fn is_branch(&self) -> bool {
        self.submenu.as_ref().is_some_and(|s| !s.is_empty())
    }

    pub fn is_leaf(&self) -> bool {
        !self.is_branch() && self.action.is_some()
    }

    pub fn is_sticky(&self) -> bool {
        self.sticky.unwrap_or(false)
    }

    pub fn is_notify(&self) -> bool {
        self.notify.unwrap_or(false)
    }

    pub fn is_batch(&self) -> bool {
        self.batch.unwrap_or(false)
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden.unwrap_or(false)
    }

    /// Symbolic icon for rendering surfaces: the explicit `icon` when set,
    /// otherwise a default derived from what the item does.
    pub fn effective_icon(&self) -> &str {
        if let Some(icon) = &self.icon {
            return icon;
        }
        if self.is_branch() {
            return "folder";
        }
        self.action
            .as_deref()
            .and_then(|action| crate::actions::ActionDescriptor::parse(action).ok())
            .map(|descriptor| descriptor.kind.default_icon())
            .unwrap_or("circle")
    }

    /// The single navigation character for this item, when the key has the
    /// valid one-character shape.
    pub fn key_char(&self) -> Option<char> {
        let mut chars = self.key.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => Some(ch),
            _ => None,
        }
    }

    /// Built-in fallback configuration used when no readable menu document
    /// exists.
    pub fn sample_items() -> Vec<MenuItem> {
        let mut first = MenuItem::with_submenu(
            "a",
            "Applications",
            vec![MenuItem::with_action(
                "b",
                "Example Site",
                "open://https://www.example.com",
            )],
        );
        first.action = Some("launch://Calculator".to_string());
        vec![
            first,
            MenuItem::with_action("c", "Say Hello", "shell://echo 'Hello, World!'"),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn branch_and_leaf_classification() {
        let leaf = MenuItem::with_action("a", "App", "launch:///Applications/App.app");
        assert!(leaf.is_leaf());
        assert!(!leaf.is_branch());

        let branch = MenuItem::with_submenu("b", "More", vec![leaf.clone()]);
        assert!(branch.is_branch());
        assert!(!branch.is_leaf());

        let mut empty_submenu = MenuItem::new("c", "Empty");
        empty_submenu.submenu = Some(Vec::new());
        assert!(!empty_submenu.is_branch());
    }

    #[test]
    fn key_char_requires_exactly_one_character() {
        assert_eq!(MenuItem::new("a", "A").key_char(), Some('a'));
        assert_eq!(MenuItem::new("ab", "AB").key_char(), None);
        assert_eq!(MenuItem::new("", "Empty").key_char(), None);
    }

    #[test]
    fn flag_accessors_default_absent_to_false() {
        let item = MenuItem::new("a", "A");
        assert!(!item.is_sticky());
        assert!(!item.is_notify());
        assert!(!item.is_batch());
        assert!(!item.is_hidden());
        assert_eq!(item.sticky, None);
    }

    #[test]
    fn effective_icon_prefers_explicit_then_derives_from_the_action() {
        let mut item = MenuItem::with_action("a", "App", "launch://App");
        assert_eq!(item.effective_icon(), "app");
        item.icon = Some("star".to_string());
        assert_eq!(item.effective_icon(), "star");

        let branch = MenuItem::with_submenu("b", "More", vec![item]);
        assert_eq!(branch.effective_icon(), "folder");
        assert_eq!(
            MenuItem::with_action("s", "Run", "shell://echo hi").effective_icon(),
            "terminal"
        );
    }

    #[test]
    fn sample_items_match_the_shipped_fallback_shape() {
        let items = MenuItem::sample_items();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].key, "a");
        assert_eq!(items[0].action.as_deref(), Some("launch://Calculator"));
        let submenu = items[0].submenu.as_ref().expect("first item has submenu");
        assert_eq!(submenu.len(), 1);
        assert_eq!(submenu[0].key, "b");
        assert_eq!(items[1].action.as_deref(), Some("shell://echo 'Hello, World!'"));
    }
}
