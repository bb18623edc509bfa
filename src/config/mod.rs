pub mod error;
pub mod hotkey;
pub mod load;
pub mod menu_item;
pub mod merge;
pub mod parse;
pub mod paths;
pub mod save;
pub mod serialize;
pub mod service;
pub mod validate;

pub use error::ConfigError;
pub use hotkey::{Hotkey, HotkeyModifier};
pub use load::{load_menu_document, load_menu_document_or_default};
pub use menu_item::MenuItem;
pub use merge::{merge_items, MergeStrategy};
pub use parse::{decode_document, parse_document};
pub use paths::{default_menu_path, default_state_root, snippet_cache_path};
pub use save::save_menu_document;
pub use serialize::serialize_items;
pub use service::{ConfigEvent, ConfigService};
pub use validate::validate_items;
