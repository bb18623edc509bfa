use crate::config::MenuItem;
use crate::shared::{next_item_id, ItemId};
use std::collections::BTreeMap;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ArenaError {
    #[error("no node at index path {0:?}")]
    InvalidPath(Vec<usize>),
    #[error("insert index {index} is out of bounds for {len} siblings")]
    InsertOutOfBounds { index: usize, len: usize },
}

#[derive(Debug, Clone)]
struct ArenaNode {
    item: MenuItem,
    parent: Option<ItemId>,
    children: Vec<ItemId>,
}

/// Id-addressed store for the editable tree. Edits touch single nodes
/// instead of deep-copying nested value trees; index paths remain the
/// logical addressing contract for callers.
#[derive(Debug, Clone, Default)]
pub struct MenuArena {
    nodes: BTreeMap<ItemId, ArenaNode>,
    roots: Vec<ItemId>,
}

impl MenuArena {
    pub fn from_items(items: &[MenuItem]) -> Self {
        let mut arena = Self::default();
        arena.roots = items
            .iter()
            .map(|item| arena_insert(&mut arena.nodes, item, None))
            .collect();
        arena
    }

    /// Rebuild the nested item tree, preserving sibling order.
    pub fn to_items(&self) -> Vec<MenuItem> {
        self.roots.iter().map(|id| self.rebuild(*id)).collect()
    }

    fn rebuild(&self, id: ItemId) -> MenuItem {
        let node = &self.nodes[&id];
        let mut item = node.item.clone();
        item.submenu = if node.children.is_empty() && node.item.submenu.is_none() {
            None
        } else {
            Some(node.children.iter().map(|child| self.rebuild(*child)).collect())
        };
        item
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn root_count(&self) -> usize {
        self.roots.len()
    }

    /// Resolve an index path (`[2, 0]` = third root's first child) to the
    /// stable id of the addressed node.
    pub fn node_at_path(&self, path: &[usize]) -> Result<ItemId, ArenaError> {
        let invalid = || ArenaError::InvalidPath(path.to_vec());
        let (first, rest) = path.split_first().ok_or_else(invalid)?;
        let mut id = *self.roots.get(*first).ok_or_else(invalid)?;
        for index in rest {
            id = *self.nodes[&id].children.get(*index).ok_or_else(invalid)?;
        }
        Ok(id)
    }

    pub fn item(&self, id: ItemId) -> Option<&MenuItem> {
        self.nodes.get(&id).map(|node| &node.item)
    }

    /// Insert `item` (with any nested submenu) so it lands at `path`. The
    /// path addresses the slot the new node will occupy among its future
    /// siblings.
    pub fn insert_at_path(&mut self, path: &[usize], item: &MenuItem) -> Result<ItemId, ArenaError> {
        let (last, parent_path) = path
            .split_last()
            .ok_or_else(|| ArenaError::InvalidPath(path.to_vec()))?;
        let parent = if parent_path.is_empty() {
            None
        } else {
            Some(self.node_at_path(parent_path)?)
        };
        let sibling_len = match parent {
            Some(parent_id) => self.nodes[&parent_id].children.len(),
            None => self.roots.len(),
        };
        if *last > sibling_len {
            return Err(ArenaError::InsertOutOfBounds {
                index: *last,
                len: sibling_len,
            });
        }

        let id = arena_insert(&mut self.nodes, item, parent);
        match parent {
            Some(parent_id) => {
                let children = &mut self
                    .nodes
                    .get_mut(&parent_id)
                    .expect("parent resolved above")
                    .children;
                children.insert(*last, id);
            }
            None => self.roots.insert(*last, id),
        }
        Ok(id)
    }

    /// Remove the addressed node and its whole subtree.
    pub fn remove_at_path(&mut self, path: &[usize]) -> Result<MenuItem, ArenaError> {
        let id = self.node_at_path(path)?;
        let removed = self.rebuild(id);
        let parent = self.nodes[&id].parent;
        match parent {
            Some(parent_id) => {
                let children = &mut self
                    .nodes
                    .get_mut(&parent_id)
                    .expect("parent of resolved node")
                    .children;
                children.retain(|child| *child != id);
            }
            None => self.roots.retain(|root| *root != id),
        }
        self.drop_subtree(id);
        Ok(removed)
    }

    fn drop_subtree(&mut self, id: ItemId) {
        if let Some(node) = self.nodes.remove(&id) {
            for child in node.children {
                self.drop_subtree(child);
            }
        }
    }

    /// Update the addressed node's own fields in place. Submenu structure is
    /// arena-managed, so changes the closure makes to `submenu` are ignored.
    pub fn update_at_path(
        &mut self,
        path: &[usize],
        update: impl FnOnce(&mut MenuItem),
    ) -> Result<(), ArenaError> {
        let id = self.node_at_path(path)?;
        let node = self.nodes.get_mut(&id).expect("resolved node");
        let submenu_marker = node.item.submenu.clone();
        update(&mut node.item);
        node.item.submenu = submenu_marker;
        Ok(())
    }

    /// Replace the addressed node (subtree included) with a new item.
    pub fn replace_at_path(&mut self, path: &[usize], item: &MenuItem) -> Result<(), ArenaError> {
        self.remove_at_path(path)?;
        self.insert_at_path(path, item)?;
        Ok(())
    }
}

fn arena_insert(
    nodes: &mut BTreeMap<ItemId, ArenaNode>,
    item: &MenuItem,
    parent: Option<ItemId>,
) -> ItemId {
    let id = next_item_id();
    let mut flat = item.clone();
    let submenu = flat.submenu.take();
    // Keep `Some(vec![])` distinguishable from no submenu at rebuild time.
    if submenu.is_some() {
        flat.submenu = Some(Vec::new());
    }
    nodes.insert(
        id,
        ArenaNode {
            item: flat,
            parent,
            children: Vec::new(),
        },
    );
    let children: Vec<ItemId> = submenu
        .iter()
        .flatten()
        .map(|child| arena_insert(nodes, child, Some(id)))
        .collect();
    nodes.get_mut(&id).expect("inserted above").children = children;
    id
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MenuArena {
        MenuArena::from_items(&MenuItem::sample_items())
    }

    #[test]
    fn from_items_to_items_round_trips_structure() {
        let arena = sample();
        let items = arena.to_items();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].key, "a");
        assert_eq!(items[0].submenu.as_ref().map(|s| s.len()), Some(1));
        assert_eq!(items[1].key, "c");
    }

    #[test]
    fn node_at_path_addresses_nested_nodes() {
        let arena = sample();
        let child = arena.node_at_path(&[0, 0]).expect("nested path");
        assert_eq!(arena.item(child).map(|i| i.key.as_str()), Some("b"));
        assert_eq!(
            arena.node_at_path(&[0, 5]),
            Err(ArenaError::InvalidPath(vec![0, 5]))
        );
        assert_eq!(arena.node_at_path(&[]), Err(ArenaError::InvalidPath(vec![])));
    }

    #[test]
    fn insert_at_path_places_the_node_among_siblings() {
        let mut arena = sample();
        let item = MenuItem::with_action("d", "Inserted", "launch://D");
        arena.insert_at_path(&[1], &item).expect("insert");

        let items = arena.to_items();
        assert_eq!(items.len(), 3);
        assert_eq!(items[1].key, "d");
        assert_eq!(items[2].key, "c");

        let err = arena.insert_at_path(&[9], &item).expect_err("out of bounds");
        assert_eq!(err, ArenaError::InsertOutOfBounds { index: 9, len: 3 });
    }

    #[test]
    fn remove_at_path_drops_the_whole_subtree() {
        let mut arena = sample();
        let before = arena.len();
        let removed = arena.remove_at_path(&[0]).expect("remove branch");
        assert_eq!(removed.key, "a");
        assert_eq!(removed.submenu.as_ref().map(|s| s.len()), Some(1));
        assert_eq!(arena.len(), before - 2, "child nodes are dropped too");
        assert_eq!(arena.to_items().len(), 1);
    }

    #[test]
    fn update_at_path_edits_fields_in_place() {
        let mut arena = sample();
        arena
            .update_at_path(&[1], |item| item.title = "Renamed".to_string())
            .expect("update");
        assert_eq!(arena.to_items()[1].title, "Renamed");
    }

    #[test]
    fn replace_at_path_swaps_subtrees() {
        let mut arena = sample();
        let replacement = MenuItem::with_submenu(
            "z",
            "Replacement",
            vec![MenuItem::with_action("y", "New Child", "launch://Y")],
        );
        arena.replace_at_path(&[0], &replacement).expect("replace");

        let items = arena.to_items();
        assert_eq!(items[0].key, "z");
        assert_eq!(
            items[0].submenu.as_ref().expect("submenu")[0].title,
            "New Child"
        );
    }
}
