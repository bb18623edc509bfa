use crate::actions::{run_action, ActionOutcome, DispatchBinaries, DispatchError, Notifier};
use crate::config::MenuItem;
use crate::deeplink::{resolve_open_path, DeepLink, DeepLinkError, PathTarget};
use crate::navigation::{
    complete_dynamic, fail_dynamic, navigate, resolve_dynamic_submenu, ActionRequest,
    DynamicRequest, NavContext, NavEffect, NavKeyPress, NavSignal, NavigationState,
};
use crate::shared::append_event_log_line;
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("no menu configuration has been installed yet")]
    ConfigNotReady,
    #[error(transparent)]
    DeepLink(#[from] DeepLinkError),
}

/// Completions marshaled back onto the interaction thread. Workers never
/// touch `NavigationState` themselves.
#[derive(Debug)]
pub enum SessionEvent {
    DynamicResolved {
        request: DynamicRequest,
        result: Result<Vec<MenuItem>, String>,
    },
    ActionFinished {
        title: String,
        notify: bool,
        result: Result<ActionOutcome, DispatchError>,
    },
}

#[derive(Debug, PartialEq, Eq)]
pub enum DeepLinkOutcome {
    /// The walk ran through the navigation machine; this is its last signal.
    Navigated(NavSignal),
    /// The presentation layer should open the snippet gallery here.
    ShowSnippets(String),
}

/// The single interaction context. All keystroke-driven transitions are
/// serialized through `&mut self`; dispatch and dynamic resolution fan out
/// to worker threads and report back through the event channel.
pub struct Session {
    root: Option<Arc<Vec<MenuItem>>>,
    nav: NavigationState,
    ctx: NavContext,
    binaries: DispatchBinaries,
    notifier: Arc<dyn Notifier>,
    state_root: PathBuf,
    events_tx: Sender<SessionEvent>,
    events_rx: Receiver<SessionEvent>,
}

impl Session {
    pub fn new(
        ctx: NavContext,
        binaries: DispatchBinaries,
        notifier: Arc<dyn Notifier>,
        state_root: PathBuf,
    ) -> Self {
        let (events_tx, events_rx) = channel();
        Self {
            root: None,
            nav: NavigationState::new(),
            ctx,
            binaries,
            notifier,
            state_root,
            events_tx,
            events_rx,
        }
    }

    /// Install (or swap) the live tree. Mid-navigation partial swaps are not
    /// permitted, so the navigation state always fully resets.
    pub fn install_root(&mut self, items: Arc<Vec<MenuItem>>) {
        self.root = Some(items);
        self.nav.reset();
    }

    pub fn reset(&mut self) {
        self.nav.reset();
    }

    pub fn breadcrumbs(&self) -> &[String] {
        self.nav.breadcrumbs()
    }

    pub fn last_key(&self) -> Option<char> {
        self.nav.last_key()
    }

    /// Items for listing surfaces: hidden items are excluded here but stay
    /// reachable by direct key press.
    pub fn visible_items(&self) -> Result<Vec<MenuItem>, SessionError> {
        let root = self.root.as_ref().ok_or(SessionError::ConfigNotReady)?;
        Ok(self
            .nav
            .current_submenu(root)
            .iter()
            .filter(|item| !item.is_hidden())
            .cloned()
            .collect())
    }

    /// Interpret one key press and start any resulting background work.
    /// Never blocks on action completion.
    pub fn handle_key(&mut self, press: NavKeyPress) -> Result<NavSignal, SessionError> {
        let root = Arc::clone(self.root.as_ref().ok_or(SessionError::ConfigNotReady)?);
        let transition = navigate(&mut self.nav, &root, press, &self.ctx);
        match transition.effect {
            NavEffect::None => {}
            NavEffect::Dispatch(requests) => self.spawn_dispatches(requests),
            NavEffect::ResolveDynamic(request) => self.spawn_dynamic(request),
        }
        Ok(transition.signal)
    }

    fn spawn_dispatches(&self, requests: Vec<ActionRequest>) {
        for request in requests {
            let tx = self.events_tx.clone();
            let binaries = self.binaries.clone();
            thread::spawn(move || {
                let result = run_action(&request.action, &binaries);
                let _ = tx.send(SessionEvent::ActionFinished {
                    title: request.title,
                    notify: request.notify,
                    result,
                });
            });
        }
    }

    fn spawn_dynamic(&self, request: DynamicRequest) {
        let tx = self.events_tx.clone();
        let binaries = self.binaries.clone();
        thread::spawn(move || {
            let result =
                resolve_dynamic_submenu(&request.command, &binaries).map_err(|err| err.to_string());
            let _ = tx.send(SessionEvent::DynamicResolved { request, result });
        });
    }

    /// Apply all completions that have arrived, returning the signals the
    /// presentation layer should react to. Runs on the interaction thread.
    pub fn drain_events(&mut self) -> Vec<NavSignal> {
        let mut signals = Vec::new();
        while let Ok(event) = self.events_rx.try_recv() {
            if let Some(signal) = self.apply_event(event) {
                signals.push(signal);
            }
        }
        signals
    }

    /// Block up to `timeout` for one completion. Used by scripted sessions
    /// that need to observe a dynamic resolution before the next key.
    pub fn wait_event(&mut self, timeout: Duration) -> Option<NavSignal> {
        let event = self.events_rx.recv_timeout(timeout).ok()?;
        self.apply_event(event)
    }

    fn apply_event(&mut self, event: SessionEvent) -> Option<NavSignal> {
        match event {
            SessionEvent::DynamicResolved { request, result } => match result {
                Ok(items) => {
                    let signal = complete_dynamic(&mut self.nav, &request, items);
                    if signal.is_none() {
                        self.log(&format!(
                            "discarded stale dynamic result for `{}`",
                            request.title
                        ));
                    }
                    signal
                }
                Err(message) => {
                    self.log(&format!(
                        "dynamic submenu `{}` failed: {message}",
                        request.title
                    ));
                    fail_dynamic(&self.nav, &request)
                }
            },
            SessionEvent::ActionFinished {
                title,
                notify,
                result,
            } => {
                match result {
                    Ok(ActionOutcome::ShellCompleted { stdout }) if notify => {
                        let trimmed = stdout.trim();
                        let body = if trimmed.is_empty() {
                            "Completed successfully"
                        } else {
                            trimmed
                        };
                        self.notifier.notify(&title, body);
                    }
                    Ok(_) => {}
                    Err(err) => {
                        self.log(&format!("action `{title}` failed: {err}"));
                        if notify {
                            self.notifier.notify(&title, &err.to_string());
                        }
                    }
                }
                None
            }
        }
    }

    /// Route an external `swiftkey://` request. `open` paths replay through
    /// the navigation machine, so a leaf at the end dispatches exactly as a
    /// keyboard walk would.
    pub fn open_deep_link(&mut self, link: &DeepLink) -> Result<DeepLinkOutcome, SessionError> {
        match link {
            DeepLink::Snippets { snippet_id } => {
                Ok(DeepLinkOutcome::ShowSnippets(snippet_id.clone()))
            }
            DeepLink::Open { keys } => {
                let root = Arc::clone(self.root.as_ref().ok_or(SessionError::ConfigNotReady)?);
                // Validate the whole path before touching navigation state.
                resolve_open_path(&root, keys)?;
                self.nav.reset();
                let mut last = NavSignal::NoOp;
                for key in keys {
                    last = self.handle_key(NavKeyPress::key(*key))?;
                }
                Ok(DeepLinkOutcome::Navigated(last))
            }
        }
    }

    /// Whether the resolved path would show the surface rather than execute.
    pub fn deep_link_shows_surface(&self, keys: &[char]) -> Result<bool, SessionError> {
        let root = self.root.as_ref().ok_or(SessionError::ConfigNotReady)?;
        match resolve_open_path(root, keys)? {
            PathTarget::Branch { .. } => Ok(true),
            PathTarget::Leaf(_) => Ok(false),
        }
    }

    fn log(&self, line: &str) {
        let _ = append_event_log_line(&self.state_root, line);
    }
}
