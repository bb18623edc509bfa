use crate::config::validate::item_rule_violations;
use crate::config::MenuItem;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueSeverity {
    /// Blocks saving.
    Error,
    /// Surfaced in the issues panel but does not block saving.
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub severity: IssueSeverity,
    /// Index path of the offending item from the root.
    pub path: Vec<usize>,
    pub field: &'static str,
    pub message: String,
}

/// Accumulating validation for editing surfaces: every violation across the
/// whole tree is collected instead of failing on the first, so an issues
/// panel can show them all at once.
pub fn collect_issues(items: &[MenuItem]) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    collect_level(items, &mut Vec::new(), &mut issues);
    issues
}

pub fn has_blocking_issues(issues: &[ValidationIssue]) -> bool {
    issues
        .iter()
        .any(|issue| issue.severity == IssueSeverity::Error)
}

fn collect_level(items: &[MenuItem], path: &mut Vec<usize>, issues: &mut Vec<ValidationIssue>) {
    for (index, item) in items.iter().enumerate() {
        if items[..index].iter().any(|prev| prev.key == item.key) {
            path.push(index);
            issues.push(ValidationIssue {
                severity: IssueSeverity::Error,
                path: path.clone(),
                field: "key",
                message: format!("duplicate key `{}` among siblings", item.key),
            });
            path.pop();
        }
    }

    for (index, item) in items.iter().enumerate() {
        path.push(index);
        for (field, message) in item_rule_violations(item) {
            issues.push(ValidationIssue {
                severity: IssueSeverity::Error,
                path: path.clone(),
                field,
                message,
            });
        }
        collect_warnings(item, path, issues);
        if let Some(submenu) = &item.submenu {
            collect_level(submenu, path, issues);
        }
        path.pop();
    }
}

fn collect_warnings(item: &MenuItem, path: &[usize], issues: &mut Vec<ValidationIssue>) {
    if item.is_branch() && item.action.is_some() {
        issues.push(ValidationIssue {
            severity: IssueSeverity::Warning,
            path: path.to_vec(),
            field: "action",
            message: format!(
                "menu item `{}`: action on a submenu item is never invoked; direct selection navigates and batch runs the children",
                item.title
            ),
        });
    }
    if item.is_hidden() && item.hotkey.is_none() {
        issues.push(ValidationIssue {
            severity: IssueSeverity::Warning,
            path: path.to_vec(),
            field: "hidden",
            message: format!(
                "menu item `{}`: hidden without a hotkey is only reachable by typing its key blind",
                item.title
            ),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_every_error_instead_of_failing_fast() {
        let items = vec![
            MenuItem::with_action("xx", "Bad Key", "launch://A"),
            MenuItem::new("b", "   "),
            MenuItem::with_action("c", "Bad Scheme", "bogus://x"),
        ];
        let issues = collect_issues(&items);
        let errors: Vec<_> = issues
            .iter()
            .filter(|i| i.severity == IssueSeverity::Error)
            .collect();
        // Bad key, blank title, missing action/submenu on item 2, bad scheme.
        assert_eq!(errors.len(), 4);
        assert!(has_blocking_issues(&issues));
    }

    #[test]
    fn issue_paths_point_into_nested_submenus() {
        let items = vec![MenuItem::with_submenu(
            "a",
            "Tools",
            vec![
                MenuItem::with_action("b", "Fine", "launch://B"),
                MenuItem::with_action("bb", "Broken", "launch://C"),
            ],
        )];
        let issues = collect_issues(&items);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].path, vec![0, 1]);
        assert_eq!(issues[0].field, "key");
    }

    #[test]
    fn branch_with_action_is_a_warning_not_an_error() {
        let mut item = MenuItem::with_submenu(
            "a",
            "Both",
            vec![MenuItem::with_action("b", "Child", "launch://B")],
        );
        item.action = Some("launch://Parent".to_string());
        let issues = collect_issues(&[item]);

        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, IssueSeverity::Warning);
        assert!(!has_blocking_issues(&issues));
    }

    #[test]
    fn hidden_without_hotkey_is_a_warning() {
        let mut item = MenuItem::with_action("h", "Hidden", "launch://H");
        item.hidden = Some(true);
        let issues = collect_issues(&[item]);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].field, "hidden");
        assert_eq!(issues[0].severity, IssueSeverity::Warning);

        let mut with_hotkey = MenuItem::with_action("h", "Hidden", "launch://H");
        with_hotkey.hidden = Some(true);
        with_hotkey.hotkey = Some("cmd+h".to_string());
        assert!(collect_issues(&[with_hotkey]).is_empty());
    }

    #[test]
    fn a_clean_tree_produces_no_issues() {
        assert!(collect_issues(&MenuItem::sample_items()).is_empty());
    }
}
