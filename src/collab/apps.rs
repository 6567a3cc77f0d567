use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Serialize, Deserialize};

use crate::error::Result;
use crate::nodes::ItemNode;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppInfo {
    pub package: String,
    pub display_name: String,
}

/// predicate deciding whether a parametrization applies to an item.
/// kept as data so manifests can declare it without shipping code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchSpec {
    Always,
    /// matches on the item kind, e.g. `data` or `package`
    ItemKind(String),
    /// matches on a suffix of the display name, e.g. `.md`
    NameSuffix(String),
    Never,
}

/// how one launch parameter is derived from the matched item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParameterSpec {
    AssetId,
    ItemId,
    RawId,
    FolderId,
    Name,
    Literal(String),
}

/// one way of opening an application against an item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Parametrization {
    pub name: Option<String>,
    pub match_spec: MatchSpec,
    pub parameters: BTreeMap<String, ParameterSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpeningApp {
    pub app_info: AppInfo,
    pub parametrization: Parametrization,
}

pub fn evaluate_match(item: &ItemNode, parametrization: &Parametrization) -> bool {
    match &parametrization.match_spec {
        MatchSpec::Always => true,
        MatchSpec::ItemKind(kind) => item.kind == *kind,
        MatchSpec::NameSuffix(suffix) => item.name.ends_with(suffix),
        MatchSpec::Never => false,
    }
}

pub fn evaluate_parameters(
    item: &ItemNode,
    parametrization: &Parametrization,
) -> BTreeMap<String, String> {
    parametrization.parameters
        .iter()
        .map(|(key, spec)| {
            let value = match spec {
                ParameterSpec::AssetId => item.asset_id.clone(),
                ParameterSpec::ItemId => item.item_id.clone(),
                ParameterSpec::RawId => item.raw_id.clone(),
                ParameterSpec::FolderId => item.folder_id.clone(),
                ParameterSpec::Name => item.name.clone(),
                ParameterSpec::Literal(value) => value.clone(),
            };

            (key.clone(), value)
        })
        .collect()
}

/// matches registered application parametrizations against an item.
/// failures degrade to an empty candidate list.
#[async_trait]
pub trait OpeningAppsResolver: Send + Sync {
    async fn candidates(&self, item: &ItemNode) -> Result<Vec<OpeningApp>>;
}

/// environment without registered applications
pub struct NoOpeningApps;

#[async_trait]
impl OpeningAppsResolver for NoOpeningApps {
    async fn candidates(&self, _item: &ItemNode) -> Result<Vec<OpeningApp>> {
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::testing;

    use crate::nodes::ItemNode;

    fn parametrization(match_spec: MatchSpec) -> Parametrization {
        Parametrization {
            name: None,
            match_spec,
            parameters: BTreeMap::from([
                (String::from("id"), ParameterSpec::AssetId),
                (String::from("mode"), ParameterSpec::Literal(String::from("reader"))),
            ]),
        }
    }

    #[test]
    fn match_specs_inspect_the_item() {
        let item = ItemNode::new(testing::item("i1", "a1", "f_1"));

        assert!(evaluate_match(&item, &parametrization(MatchSpec::Always)));
        assert!(evaluate_match(&item, &parametrization(MatchSpec::ItemKind(String::from("data")))));
        assert!(!evaluate_match(&item, &parametrization(MatchSpec::ItemKind(String::from("package")))));
        assert!(!evaluate_match(&item, &parametrization(MatchSpec::Never)));
    }

    #[test]
    fn parameters_are_derived_from_the_item() {
        let item = ItemNode::new(testing::item("i1", "a1", "f_1"));
        let evaluated = evaluate_parameters(&item, &parametrization(MatchSpec::Always));

        assert_eq!(evaluated.get("id").unwrap(), "a1");
        assert_eq!(evaluated.get("mode").unwrap(), "reader");
    }
}
