use crate::shared::append_event_log_line;
use std::path::PathBuf;
use std::sync::Mutex;

/// Completion feedback seam. The real presentation layer registers its own
/// implementation; the default writes to the event log so results are never
/// silently dropped.
pub trait Notifier: Send + Sync {
    fn notify(&self, title: &str, body: &str);
}

pub struct LogNotifier {
    state_root: PathBuf,
}

impl LogNotifier {
    pub fn new(state_root: PathBuf) -> Self {
        Self { state_root }
    }
}

impl Notifier for LogNotifier {
    fn notify(&self, title: &str, body: &str) {
        let _ = append_event_log_line(&self.state_root, &format!("notify [{title}] {body}"));
    }
}

/// Test helper that records notifications in memory.
#[derive(Default)]
pub struct RecordingNotifier {
    pub entries: Mutex<Vec<(String, String)>>,
}

impl Notifier for RecordingNotifier {
    fn notify(&self, title: &str, body: &str) {
        self.entries
            .lock()
            .unwrap_or_else(|err| err.into_inner())
            .push((title.to_string(), body.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::event_log_path;
    use tempfile::tempdir;

    #[test]
    fn log_notifier_appends_to_the_event_log() {
        let temp = tempdir().expect("tempdir");
        let notifier = LogNotifier::new(temp.path().to_path_buf());

        notifier.notify("Say Hello", "Hello, World!");

        let body = std::fs::read_to_string(event_log_path(temp.path())).expect("read log");
        assert!(body.contains("notify [Say Hello] Hello, World!"));
    }
}
