pub mod fs_atomic;
pub mod ids;
pub mod logging;
pub mod serde_ext;

pub use fs_atomic::atomic_write_file;
pub use ids::{next_item_id, ItemId};
pub use logging::{append_event_log_line, event_log_path};
