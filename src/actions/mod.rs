pub mod descriptor;
pub mod dispatch;
pub mod notify;
pub mod safety;

pub use descriptor::{ActionDescriptor, ActionKind};
pub use dispatch::{run_action, ActionOutcome, DispatchBinaries, DispatchError};
pub use notify::{LogNotifier, Notifier, RecordingNotifier};
pub use safety::validate_shell_command;
