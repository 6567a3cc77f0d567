use crate::actions::{Action, ActionCommand, Section, CATALOG};
use crate::collab::apps::{evaluate_match, evaluate_parameters};
use crate::error::Result;
use crate::nodes::ExplorerNode;
use crate::permissions::resolve_permissions;
use crate::state::ExplorerState;

/// actions shown in a node's context menu, in menu order: built-in, then
/// manifest contributed, then open-with. drives never produce a menu.
///
/// the three sources are fetched concurrently. a failed permission
/// lookup fails the whole resolution; failed enrichment lookups degrade
/// to empty contributions.
pub async fn resolve_actions(state: &ExplorerState, node: &ExplorerNode) -> Result<Vec<Action>> {
    if let ExplorerNode::Drive(_) = node {
        return Ok(Vec::new());
    }

    let permissions = resolve_permissions(state.store(), node);

    let custom = async {
        match node {
            ExplorerNode::Trash(_) => Ok(Vec::new()),
            _ => state.installer().context_menu_actions(node, state).await,
        }
    };

    let opening = async {
        match node.as_item() {
            Some(item) => state.opening_apps().candidates(item).await,
            None => Ok(Vec::new()),
        }
    };

    let (permissions, custom, opening) = futures::join!(permissions, custom, opening);

    let permissions = permissions?;

    let custom = custom.unwrap_or_else(|err| {
        tracing::warn!(node = node.id(), %err, "install manifest lookup failed");

        Vec::new()
    });

    let opening = opening.unwrap_or_else(|err| {
        tracing::warn!(node = node.id(), %err, "opening applications lookup failed");

        Vec::new()
    });

    let mut actions = Vec::new();

    for constructor in CATALOG {
        if let Some(action) = constructor(state, node, &permissions) {
            actions.push(action);
        }
    }

    for raw in custom {
        if !raw.applicable {
            continue;
        }

        actions.push(Action {
            icon: raw.icon,
            name: raw.name,
            section: Section::CustomActions,
            source: node.clone(),
            enabled: true,
            command: ActionCommand::Custom {
                node: node.clone(),
                exe: raw.exe,
            },
        });
    }

    if let Some(item) = node.as_item() {
        for candidate in opening {
            if !evaluate_match(item, &candidate.parametrization) {
                continue;
            }

            let name = match &candidate.parametrization.name {
                Some(variant) => {
                    format!("{} {}", candidate.app_info.display_name, variant)
                },
                None => candidate.app_info.display_name.clone(),
            };

            actions.push(Action {
                icon: String::from("fa-folder-open"),
                name,
                section: Section::Open,
                source: node.clone(),
                enabled: true,
                command: ActionCommand::OpenWith {
                    package: candidate.app_info.package,
                    parameters: evaluate_parameters(item, &candidate.parametrization),
                },
            });
        }
    }

    Ok(actions)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::testing;

    use std::collections::BTreeMap;
    use std::sync::Arc;

    use crate::collab::apps::{AppInfo, MatchSpec, OpeningApp, ParameterSpec, Parametrization};
    use crate::error::ExplorerError;
    use crate::nodes::TrashNode;
    use crate::state::ExplorerState;

    fn candidate(name: Option<&str>, match_spec: MatchSpec) -> OpeningApp {
        OpeningApp {
            app_info: AppInfo {
                package: String::from("viewer"),
                display_name: String::from("Viewer"),
            },
            parametrization: Parametrization {
                name: name.map(|value| value.to_string()),
                match_spec,
                parameters: BTreeMap::from([
                    (String::from("id"), ParameterSpec::AssetId),
                ]),
            },
        }
    }

    #[tokio::test]
    async fn drives_never_produce_a_menu() {
        let harness = testing::harness();
        let node = ExplorerNode::from(Arc::new(crate::nodes::DriveNode::new(testing::drive("d1"))));

        let actions = resolve_actions(&harness.state, &node).await.unwrap();

        assert!(actions.is_empty());
    }

    #[tokio::test]
    async fn native_then_custom_then_open_with() {
        let harness = testing::harness();

        harness.store.grant_all("a1");

        let mut builder = ExplorerState::builder(harness.store.clone(), harness.router.clone());

        builder.installer(Arc::new(testing::StaticInstaller::with_actions(&["annotate"])));
        builder.opening_apps(Arc::new(testing::StaticApps::with_candidates(vec![
            candidate(None, MatchSpec::Always),
        ])));

        let state = builder.build();
        let node = testing::item_node("i1", "a1", "f_1");
        let actions = resolve_actions(&state, &node).await.unwrap();

        let first_custom = actions
            .iter()
            .position(|action| action.section == Section::CustomActions)
            .unwrap();
        let first_open = actions
            .iter()
            .position(|action| action.section == Section::Open)
            .unwrap();

        assert!(first_custom > 0, "native actions come first");
        assert!(actions[..first_custom]
            .iter()
            .all(|action| action.section != Section::Open));
        assert!(first_open > first_custom);
        assert_eq!(actions[first_custom].name, "annotate");
        assert_eq!(actions[first_open].name, "Viewer");
        assert_eq!(first_open, actions.len() - 1);
    }

    #[tokio::test]
    async fn permission_failure_fails_closed() {
        let harness = testing::harness();

        harness.store.fail_permissions();

        let node = testing::item_node("i1", "a1", "f_1");
        let result = resolve_actions(&harness.state, &node).await;

        assert!(matches!(result, Err(ExplorerError::Permissions(_))));
    }

    #[tokio::test]
    async fn enrichment_failures_degrade_to_native_only() {
        let harness = testing::harness();

        harness.store.grant_all("a1");

        let mut builder = ExplorerState::builder(harness.store.clone(), harness.router.clone());

        builder.installer(Arc::new(testing::FailingInstaller));
        builder.opening_apps(Arc::new(testing::FailingApps));

        let state = builder.build();
        let node = testing::item_node("i1", "a1", "f_1");
        let actions = resolve_actions(&state, &node).await.unwrap();

        assert!(!actions.is_empty());
        assert!(actions.iter().all(|action| {
            action.section != Section::CustomActions && action.section != Section::Open
        }));
    }

    #[tokio::test]
    async fn trash_nodes_skip_custom_actions() {
        let harness = testing::harness();
        let mut builder = ExplorerState::builder(harness.store.clone(), harness.router.clone());

        builder.installer(Arc::new(testing::StaticInstaller::with_actions(&["annotate"])));

        let state = builder.build();
        let node = ExplorerNode::from(Arc::new(TrashNode::new("d1".into(), "g1".into())));
        let actions = resolve_actions(&state, &node).await.unwrap();

        assert!(actions.iter().all(|action| action.section != Section::CustomActions));
        assert!(actions.iter().any(|action| action.name == "clear trash"));
        assert!(actions.iter().any(|action| action.name == "refresh"));
    }

    #[tokio::test]
    async fn open_with_respects_the_match_predicate_and_variant_names() {
        let harness = testing::harness();

        harness.store.grant_all("a1");

        let mut builder = ExplorerState::builder(harness.store.clone(), harness.router.clone());

        builder.opening_apps(Arc::new(testing::StaticApps::with_candidates(vec![
            candidate(Some("as notebook"), MatchSpec::ItemKind(String::from("data"))),
            candidate(None, MatchSpec::Never),
        ])));

        let state = builder.build();
        let node = testing::item_node("i1", "a1", "f_1");
        let actions = resolve_actions(&state, &node).await.unwrap();
        let open: Vec<&Action> = actions
            .iter()
            .filter(|action| action.section == Section::Open)
            .collect();

        assert_eq!(open.len(), 1);
        assert_eq!(open[0].name, "Viewer as notebook");

        let ActionCommand::OpenWith { package, parameters } = &open[0].command else {
            panic!("expected an open-with command");
        };

        assert_eq!(package, "viewer");
        assert_eq!(parameters.get("id").unwrap(), "a1");
    }

    #[tokio::test]
    async fn custom_actions_execute_against_the_source_node() {
        let harness = testing::harness();

        harness.store.grant_all("a1");

        let installer = Arc::new(testing::StaticInstaller::with_actions(&["annotate"]));
        let mut builder = ExplorerState::builder(harness.store.clone(), harness.router.clone());

        builder.installer(installer.clone());

        let state = builder.build();
        let node = testing::item_node("i1", "a1", "f_1");
        let actions = resolve_actions(&state, &node).await.unwrap();
        let custom = actions
            .into_iter()
            .find(|action| action.section == Section::CustomActions)
            .unwrap();

        state.execute(custom).await.unwrap();

        assert_eq!(installer.executed(), vec![String::from("annotate:a1")]);
    }
}
