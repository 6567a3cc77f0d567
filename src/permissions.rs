use ras_api::assets::Permissions as ItemPermissions;

use crate::error::{ExplorerError, Result};
use crate::nodes::ExplorerNode;
use crate::store::AssetStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupPermissions {
    pub write: bool,
}

#[derive(Debug, Clone)]
pub struct OverallPermissions {
    pub group: GroupPermissions,
    pub item: Option<ItemPermissions>,
}

impl OverallPermissions {
    /// write on the asset, write on the group, and the entity must be
    /// locally originated
    pub fn allows_item_modify(&self, node: &ExplorerNode) -> bool {
        let Some(item) = &self.item else {
            return false;
        };

        if !item.write || !self.group.write {
            return false;
        }

        node.is_local()
    }

    pub fn allows_item_share(&self) -> bool {
        self.item.as_ref().map(|item| item.share).unwrap_or(false)
    }

    pub fn allows_group_modify(&self) -> bool {
        self.group.write
    }
}

/// group management permission for the current user. presently a stub
/// granting write to every group the user belongs to; consumers only go
/// through `resolve_permissions`, so a real ACL lookup can replace this
/// without touching the action catalog.
async fn group_permissions(_group_id: &str) -> Result<GroupPermissions> {
    Ok(GroupPermissions { write: true })
}

/// effective permission set for one node. item permission lookups that
/// fail reject the whole resolution; callers fail closed on the error.
pub async fn resolve_permissions(
    store: &dyn AssetStore,
    node: &ExplorerNode,
) -> Result<OverallPermissions> {
    let group = group_permissions(node.group_id()).await?;

    let Some(item) = node.as_item() else {
        return Ok(OverallPermissions { group, item: None });
    };

    // remote only items are read-only on this side, whatever the asset
    // service would grant
    let known_remote_only = item.origin.map(|origin| !origin.local).unwrap_or(false);

    let permissions = if known_remote_only {
        ItemPermissions::read_only()
    } else {
        store.item_permissions(&item.asset_id)
            .await
            .map_err(ExplorerError::Permissions)?
    };

    Ok(OverallPermissions {
        group,
        item: Some(permissions),
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::testing;

    use std::sync::Arc;

    use ras_lib::origin::Origin;

    use crate::nodes::ItemNode;

    #[tokio::test]
    async fn remote_origin_downgrades_to_read_only() {
        let store = testing::FakeStore::default();

        // the service would grant everything
        store.grant("a1", ItemPermissions {
            write: true,
            read: true,
            share: true,
            expiration: None,
        });

        let mut raw = testing::item("i1", "a1", "f_1");
        raw.origin = Some(Origin::remote_only());

        let node = ExplorerNode::from(Arc::new(ItemNode::new(raw)));
        let resolved = resolve_permissions(&store, &node).await.unwrap();
        let item = resolved.item.unwrap();

        assert!(!item.write);
        assert!(item.read);
        assert!(!item.share);
    }

    #[tokio::test]
    async fn local_items_use_the_service_answer() {
        let store = testing::FakeStore::default();

        store.grant("a1", ItemPermissions {
            write: true,
            read: true,
            share: true,
            expiration: None,
        });

        let node = testing::item_node("i1", "a1", "f_1");
        let resolved = resolve_permissions(&store, &node).await.unwrap();
        let item = resolved.item.unwrap();

        assert!(item.write);
        assert!(item.share);
    }

    #[tokio::test]
    async fn folders_resolve_group_only() {
        let store = testing::FakeStore::default();
        let node = testing::folder_node("f_1", "d1", "d1");

        let resolved = resolve_permissions(&store, &node).await.unwrap();

        assert!(resolved.group.write);
        assert!(resolved.item.is_none());
    }

    #[tokio::test]
    async fn failed_lookup_rejects_resolution() {
        let store = testing::FakeStore::default();

        store.fail_permissions();

        let node = testing::item_node("i1", "a1", "f_1");
        let result = resolve_permissions(&store, &node).await;

        assert!(matches!(result, Err(ExplorerError::Permissions(_))));
    }
}
