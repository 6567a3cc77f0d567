use std::collections::HashSet;
use std::sync::RwLock;

/// registry of pinned folders and desktop items, both keyed by node id
/// (folder id for folders, asset id for items)
pub trait FavoritesRegistry: Send + Sync {
    fn folders(&self) -> Vec<String>;

    fn items(&self) -> Vec<String>;

    fn toggle_folder(&self, folder_id: &str);

    fn toggle_item(&self, item_id: &str);

    fn is_favorite_folder(&self, folder_id: &str) -> bool {
        self.folders().iter().any(|id| id == folder_id)
    }

    fn is_desktop_item(&self, item_id: &str) -> bool {
        self.items().iter().any(|id| id == item_id)
    }
}

/// process local registry; enough for the cli surface and for tests
#[derive(Default)]
pub struct MemoryFavorites {
    folders: RwLock<HashSet<String>>,
    items: RwLock<HashSet<String>>,
}

impl MemoryFavorites {
    fn toggle(set: &RwLock<HashSet<String>>, id: &str) {
        let mut set = match set.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        if !set.remove(id) {
            set.insert(id.into());
        }
    }

    fn list(set: &RwLock<HashSet<String>>) -> Vec<String> {
        let set = match set.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        let mut list: Vec<String> = set.iter().cloned().collect();
        list.sort();
        list
    }
}

impl FavoritesRegistry for MemoryFavorites {
    fn folders(&self) -> Vec<String> {
        Self::list(&self.folders)
    }

    fn items(&self) -> Vec<String> {
        Self::list(&self.items)
    }

    fn toggle_folder(&self, folder_id: &str) {
        Self::toggle(&self.folders, folder_id);
    }

    fn toggle_item(&self, item_id: &str) {
        Self::toggle(&self.items, item_id);
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn toggle_flips_membership() {
        let registry = MemoryFavorites::default();

        registry.toggle_folder("f_1");
        assert!(registry.is_favorite_folder("f_1"));

        registry.toggle_folder("f_1");
        assert!(!registry.is_favorite_folder("f_1"));
    }

    #[test]
    fn folders_and_items_are_distinct() {
        let registry = MemoryFavorites::default();

        registry.toggle_folder("x");

        assert!(registry.is_favorite_folder("x"));
        assert!(!registry.is_desktop_item("x"));
    }
}
