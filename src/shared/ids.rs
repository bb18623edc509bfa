use std::sync::atomic::{AtomicU64, Ordering};

/// Process-local identifier for a menu item. Assigned at load time and never
/// persisted; every parse produces fresh ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemId(u64);

impl ItemId {
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

static NEXT_ITEM_ID: AtomicU64 = AtomicU64::new(1);

pub fn next_item_id() -> ItemId {
    ItemId(NEXT_ITEM_ID.fetch_add(1, Ordering::Relaxed))
}
