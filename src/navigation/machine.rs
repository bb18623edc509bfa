use super::{NavInput, NavKeyPress, NavigationState};
use crate::actions::{ActionDescriptor, ActionKind};
use crate::config::MenuItem;

/// Presentation context supplied by the caller. Panel-style surfaces
/// auto-dismiss on any dispatched action, which changes the signal emitted
/// for items with an explicit `sticky: false`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NavContext {
    pub panel_presentation: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavSignal {
    /// Caller resets state and dismisses the surface; the machine itself
    /// leaves the stack untouched.
    Escape,
    Up,
    Help,
    /// No sibling carries the pressed key, or a dynamic resolution failed.
    Error(char),
    SubmenuPushed(String),
    ActionExecuted,
    /// A dynamic resolution was started; the pushed submenu arrives through
    /// `complete_dynamic`.
    Loading,
    NoOp,
}

/// One action to run in the background, in sibling order for batches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionRequest {
    pub title: String,
    pub action: String,
    pub notify: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DynamicRequest {
    pub key: char,
    pub title: String,
    pub command: String,
    /// Navigation generation at request time; completions whose token no
    /// longer matches are discarded.
    pub token: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavEffect {
    None,
    Dispatch(Vec<ActionRequest>),
    ResolveDynamic(DynamicRequest),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavTransition {
    pub signal: NavSignal,
    pub effect: NavEffect,
}

impl NavTransition {
    fn signal_only(signal: NavSignal) -> Self {
        Self {
            signal,
            effect: NavEffect::None,
        }
    }
}

/// Interpret one normalized key press against the current position. Pure
/// with respect to IO: side effects are described in the returned effect and
/// performed by the caller.
pub fn navigate(
    state: &mut NavigationState,
    root: &[MenuItem],
    press: NavKeyPress,
    ctx: &NavContext,
) -> NavTransition {
    let ch = match press.input {
        NavInput::Escape => return NavTransition::signal_only(NavSignal::Escape),
        NavInput::Up => {
            state.pop();
            return NavTransition::signal_only(NavSignal::Up);
        }
        NavInput::Help => return NavTransition::signal_only(NavSignal::Help),
        NavInput::Key(ch) => ch,
    };

    state.set_last_key(ch);
    // Hidden items stay reachable by direct key; only listings exclude them.
    let item = state
        .current_submenu(root)
        .iter()
        .find(|item| item.key_char() == Some(ch))
        .cloned();
    let Some(item) = item else {
        return NavTransition::signal_only(NavSignal::Error(ch));
    };

    if let Some(command) = dynamic_command(&item) {
        return NavTransition {
            signal: NavSignal::Loading,
            effect: NavEffect::ResolveDynamic(DynamicRequest {
                key: ch,
                title: item.title.clone(),
                command,
                token: state.generation(),
            }),
        };
    }

    if item.is_branch() {
        if item.is_batch() || press.alt {
            let requests = batch_requests(item.submenu.as_deref().unwrap_or_default());
            return NavTransition {
                signal: NavSignal::ActionExecuted,
                effect: NavEffect::Dispatch(requests),
            };
        }
        let submenu = item.submenu.clone().unwrap_or_default();
        state.push(submenu, item.title.clone());
        return NavTransition::signal_only(NavSignal::SubmenuPushed(item.title));
    }

    if let Some(action) = item.action.clone() {
        // Panel surfaces auto-dismiss on any result; an explicit
        // `sticky: false` there means the caller already knows, so avoid a
        // redundant dismiss/notify round.
        let signal = if item.sticky == Some(false) && ctx.panel_presentation {
            NavSignal::NoOp
        } else {
            NavSignal::ActionExecuted
        };
        let notify = item.is_notify();
        return NavTransition {
            signal,
            effect: NavEffect::Dispatch(vec![ActionRequest {
                title: item.title,
                action,
                notify,
            }]),
        };
    }

    NavTransition::signal_only(NavSignal::NoOp)
}

fn dynamic_command(item: &MenuItem) -> Option<String> {
    let action = item.action.as_deref()?;
    let descriptor = ActionDescriptor::parse(action).ok()?;
    (descriptor.kind == ActionKind::Dynamic).then_some(descriptor.payload)
}

/// Direct children with a non-dynamic action, in sibling order. Dynamic
/// children are never auto-resolved as a batch side effect.
fn batch_requests(children: &[MenuItem]) -> Vec<ActionRequest> {
    children
        .iter()
        .filter_map(|child| {
            let action = child.action.as_deref()?;
            let descriptor = ActionDescriptor::parse(action).ok()?;
            (descriptor.kind != ActionKind::Dynamic).then(|| ActionRequest {
                title: child.title.clone(),
                action: action.to_string(),
                notify: child.is_notify(),
            })
        })
        .collect()
}

/// Apply a finished dynamic resolution. Returns `None` when the result is
/// stale (the state was reset after the request) and must be discarded.
pub fn complete_dynamic(
    state: &mut NavigationState,
    request: &DynamicRequest,
    items: Vec<MenuItem>,
) -> Option<NavSignal> {
    if request.token != state.generation() {
        return None;
    }
    state.push(items, request.title.clone());
    Some(NavSignal::SubmenuPushed(request.title.clone()))
}

/// Surface a failed dynamic resolution, unless the result is stale.
pub fn fail_dynamic(state: &NavigationState, request: &DynamicRequest) -> Option<NavSignal> {
    if request.token != state.generation() {
        return None;
    }
    Some(NavSignal::Error(request.key))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_root() -> Vec<MenuItem> {
        vec![
            MenuItem::with_submenu(
                "a",
                "Apps",
                vec![MenuItem::with_action(
                    "b",
                    "Example",
                    "open://https://www.example.com",
                )],
            ),
            MenuItem::with_action("c", "Hello", "shell://echo 'Hello, World!'"),
        ]
    }

    #[test]
    fn pressing_a_branch_key_pushes_submenu_and_breadcrumb() {
        let root = sample_root();
        let mut state = NavigationState::new();
        let ctx = NavContext::default();

        let transition = navigate(&mut state, &root, NavKeyPress::key('a'), &ctx);
        assert_eq!(
            transition.signal,
            NavSignal::SubmenuPushed("Apps".to_string())
        );
        assert_eq!(state.breadcrumbs(), ["Apps".to_string()]);

        let transition = navigate(&mut state, &root, NavKeyPress::key('b'), &ctx);
        assert_eq!(transition.signal, NavSignal::ActionExecuted);
        match transition.effect {
            NavEffect::Dispatch(requests) => {
                assert_eq!(requests.len(), 1);
                assert_eq!(requests[0].action, "open://https://www.example.com");
            }
            other => panic!("unexpected effect: {other:?}"),
        }
    }

    #[test]
    fn up_pops_back_to_root_and_escape_leaves_stack_alone() {
        let root = sample_root();
        let mut state = NavigationState::new();
        let ctx = NavContext::default();

        navigate(&mut state, &root, NavKeyPress::key('a'), &ctx);
        let transition = navigate(&mut state, &root, NavKeyPress::up(), &ctx);
        assert_eq!(transition.signal, NavSignal::Up);
        assert!(state.breadcrumbs().is_empty());
        assert_eq!(state.current_submenu(&root).len(), 2);

        navigate(&mut state, &root, NavKeyPress::key('a'), &ctx);
        let transition = navigate(&mut state, &root, NavKeyPress::escape(), &ctx);
        assert_eq!(transition.signal, NavSignal::Escape);
        assert_eq!(state.depth(), 1, "escape does not mutate the stack itself");
    }

    #[test]
    fn unmatched_keys_signal_an_error_without_mutation() {
        let root = sample_root();
        let mut state = NavigationState::new();
        let transition = navigate(
            &mut state,
            &root,
            NavKeyPress::key('z'),
            &NavContext::default(),
        );
        assert_eq!(transition.signal, NavSignal::Error('z'));
        assert_eq!(transition.effect, NavEffect::None);
        assert_eq!(state.depth(), 0);
        assert_eq!(state.last_key(), Some('z'));
    }

    #[test]
    fn keys_are_case_sensitive() {
        let root = vec![MenuItem::with_action("A", "Upper", "launch://Upper")];
        let mut state = NavigationState::new();
        let transition = navigate(
            &mut state,
            &root,
            NavKeyPress::key('a'),
            &NavContext::default(),
        );
        assert_eq!(transition.signal, NavSignal::Error('a'));
    }

    #[test]
    fn hidden_items_stay_reachable_by_direct_key() {
        let mut hidden = MenuItem::with_action("h", "Hidden", "launch://Hidden");
        hidden.hidden = Some(true);
        let root = vec![hidden];
        let mut state = NavigationState::new();
        let transition = navigate(
            &mut state,
            &root,
            NavKeyPress::key('h'),
            &NavContext::default(),
        );
        assert_eq!(transition.signal, NavSignal::ActionExecuted);
    }

    #[test]
    fn dynamic_items_signal_loading_with_a_resolution_request() {
        let root = vec![MenuItem::with_action("w", "Windows", "dynamic://list-windows")];
        let mut state = NavigationState::new();
        let transition = navigate(
            &mut state,
            &root,
            NavKeyPress::key('w'),
            &NavContext::default(),
        );
        assert_eq!(transition.signal, NavSignal::Loading);
        match transition.effect {
            NavEffect::ResolveDynamic(request) => {
                assert_eq!(request.command, "list-windows");
                assert_eq!(request.token, state.generation());
            }
            other => panic!("unexpected effect: {other:?}"),
        }
        assert_eq!(state.depth(), 0, "no mutation until resolution completes");
    }

    #[test]
    fn batch_flag_dispatches_children_without_navigating() {
        let branch = {
            let mut branch = MenuItem::with_submenu(
                "g",
                "Group",
                vec![
                    MenuItem::with_action("1", "One", "shell://echo one"),
                    MenuItem::with_action("2", "Two", "dynamic://never-run"),
                    MenuItem::with_action("3", "Three", "shell://echo three"),
                ],
            );
            branch.batch = Some(true);
            branch
        };
        let root = vec![branch];
        let mut state = NavigationState::new();

        let transition = navigate(
            &mut state,
            &root,
            NavKeyPress::key('g'),
            &NavContext::default(),
        );
        assert_eq!(transition.signal, NavSignal::ActionExecuted);
        match transition.effect {
            NavEffect::Dispatch(requests) => {
                let actions: Vec<&str> = requests.iter().map(|r| r.action.as_str()).collect();
                assert_eq!(actions, vec!["shell://echo one", "shell://echo three"]);
            }
            other => panic!("unexpected effect: {other:?}"),
        }
        assert_eq!(state.depth(), 0);
    }

    #[test]
    fn alt_modifier_batches_even_without_the_flag() {
        let root = vec![MenuItem::with_submenu(
            "g",
            "Group",
            vec![MenuItem::with_action("1", "One", "shell://echo one")],
        )];
        let mut state = NavigationState::new();

        let transition = navigate(
            &mut state,
            &root,
            NavKeyPress::alt_key('g'),
            &NavContext::default(),
        );
        assert_eq!(transition.signal, NavSignal::ActionExecuted);
        assert_eq!(state.depth(), 0);
    }

    #[test]
    fn explicit_non_sticky_in_panel_mode_signals_noop_but_still_dispatches() {
        let mut item = MenuItem::with_action("s", "Quick", "shell://echo hi");
        item.sticky = Some(false);
        let root = vec![item];
        let mut state = NavigationState::new();

        let panel = NavContext {
            panel_presentation: true,
        };
        let transition = navigate(&mut state, &root, NavKeyPress::key('s'), &panel);
        assert_eq!(transition.signal, NavSignal::NoOp);
        assert!(matches!(transition.effect, NavEffect::Dispatch(ref r) if r.len() == 1));

        // Absent sticky behaves normally even in panel mode.
        let mut state = NavigationState::new();
        let root = vec![MenuItem::with_action("s", "Quick", "shell://echo hi")];
        let transition = navigate(&mut state, &root, NavKeyPress::key('s'), &panel);
        assert_eq!(transition.signal, NavSignal::ActionExecuted);
    }

    #[test]
    fn stale_dynamic_results_are_discarded_after_reset() {
        let root = vec![MenuItem::with_action("w", "Windows", "dynamic://list")];
        let mut state = NavigationState::new();
        let transition = navigate(
            &mut state,
            &root,
            NavKeyPress::key('w'),
            &NavContext::default(),
        );
        let request = match transition.effect {
            NavEffect::ResolveDynamic(request) => request,
            other => panic!("unexpected effect: {other:?}"),
        };

        state.reset();

        let resolved = complete_dynamic(
            &mut state,
            &request,
            vec![MenuItem::with_action("x", "X", "launch://X")],
        );
        assert_eq!(resolved, None);
        assert_eq!(state.depth(), 0);
        assert_eq!(fail_dynamic(&state, &request), None);
    }

    #[test]
    fn fresh_dynamic_results_push_the_resolved_submenu() {
        let root = vec![MenuItem::with_action("w", "Windows", "dynamic://list")];
        let mut state = NavigationState::new();
        let transition = navigate(
            &mut state,
            &root,
            NavKeyPress::key('w'),
            &NavContext::default(),
        );
        let request = match transition.effect {
            NavEffect::ResolveDynamic(request) => request,
            other => panic!("unexpected effect: {other:?}"),
        };

        let signal = complete_dynamic(
            &mut state,
            &request,
            vec![MenuItem::with_action("x", "Window X", "shell://echo focus")],
        );
        assert_eq!(signal, Some(NavSignal::SubmenuPushed("Windows".to_string())));
        assert_eq!(state.breadcrumbs(), ["Windows".to_string()]);
        assert_eq!(state.current_submenu(&root)[0].title, "Window X");
    }

    #[test]
    fn failed_dynamic_resolution_surfaces_the_pressed_key() {
        let root = vec![MenuItem::with_action("w", "Windows", "dynamic://list")];
        let mut state = NavigationState::new();
        let transition = navigate(
            &mut state,
            &root,
            NavKeyPress::key('w'),
            &NavContext::default(),
        );
        let request = match transition.effect {
            NavEffect::ResolveDynamic(request) => request,
            other => panic!("unexpected effect: {other:?}"),
        };
        assert_eq!(fail_dynamic(&state, &request), Some(NavSignal::Error('w')));
    }
}
