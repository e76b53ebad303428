use std::sync::LazyLock;

use anyhow::anyhow;
use rust_embed::Embed;
use serde_json::Value;

#[derive(Embed)]
#[folder = "resources/"]
#[include = "consts.json"]
struct Assets;

#[allow(clippy::expect_used)]
static DEFAULTS: LazyLock<Value> = LazyLock::new(|| {
    let file = Assets::get("consts.json").expect("consts.json embedded");
    serde_json::from_slice(&file.data).expect("valid consts.json")
});

#[allow(clippy::expect_used)]
pub fn get_embedded_default(name: &'static str) -> String {
    DEFAULTS
        .get(name)
        .and_then(Value::as_str)
        .map(String::from)
        .ok_or_else(|| anyhow!("missing default: {name}"))
        .expect("embedded default should exist")
}

#[allow(clippy::expect_used)]
pub fn get_embedded_list(name: &'static str) -> Vec<String> {
    DEFAULTS
        .get(name)
        .and_then(Value::as_array)
        .map(|values| {
            values
                .iter()
                .filter_map(Value::as_str)
                .map(String::from)
                .collect()
        })
        .ok_or_else(|| anyhow!("missing default list: {name}"))
        .expect("embedded default list should exist")
}

#[allow(clippy::expect_used)]
pub fn get_embedded_usize(name: &'static str) -> usize {
    DEFAULTS
        .get(name)
        .and_then(Value::as_u64)
        .and_then(|n| usize::try_from(n).ok())
        .ok_or_else(|| anyhow!("missing numeric default: {name}"))
        .expect("embedded numeric default should exist")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_defaults_exist() {
        // These are used at runtime and must exist
        let required_keys = [
            "catalog_url",
            "connectivity_url",
            "old_username",
            "login_username",
            "skip_file",
            "script_file",
        ];

        for key in required_keys {
            let value = get_embedded_default(key);
            assert!(!value.is_empty(), "{key} should not be empty");
        }
    }

    #[test]
    fn test_default_shells_not_empty() {
        let shells = get_embedded_list("shells");
        assert!(!shells.is_empty());
        assert!(shells.iter().all(|s| !s.is_empty()));
    }

    #[test]
    fn test_username_max_length_is_unix_limit() {
        assert_eq!(get_embedded_usize("username_max_length"), 32);
    }
}
