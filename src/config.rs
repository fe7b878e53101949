//! Site configuration module.
//!
//! A site is configured by a single `config.json` in the input root. Every
//! fragment constructor reads from it, so it is loaded once per build and
//! shared through [`crate::context::BuildContext`].
//!
//! ## Configuration Options
//!
//! ```json
//! {
//!   "site_name": "My Site",
//!   "description": "What the site is about",
//!   "keywords": "comma, separated, keywords",
//!   "author": "Jane Doe",
//!   "networks": {
//!     "github": { "name": "GitHub", "url": "https://github.com/jane" },
//!     "mastodon": { "name": "Mastodon", "url": "https://example.social/@jane" }
//!   }
//! }
//! ```
//!
//! ## Missing Keys
//!
//! `site_name`, `description`, `keywords` and `author` are expected, but a
//! missing key is not an error: the matching placeholder is left in the
//! output untouched, which makes the omission visible in the rendered page.
//! `networks` is optional and defaults to none. Unknown keys are ignored.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::content::{self, ContentError};

/// Site configuration loaded from `config.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Site name, used in every page title and as the logo text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_name: Option<String>,
    /// `<meta name="description">` content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// `<meta name="keywords">` content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<String>,
    /// `<meta name="author">` content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Social network links keyed by network id, rendered in key order.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub networks: BTreeMap<String, Network>,
}

/// One social network link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Network {
    pub name: String,
    pub url: String,
}

/// Load `config.json` from a path.
pub fn load_config(path: &Path) -> Result<SiteConfig, ContentError> {
    content::read_json(path)
}

/// A complete sample configuration, for `paker gen-config`.
pub fn stock_config() -> SiteConfig {
    let mut networks = BTreeMap::new();
    networks.insert(
        "github".to_string(),
        Network {
            name: "GitHub".to_string(),
            url: "https://github.com/your-name".to_string(),
        },
    );
    SiteConfig {
        site_name: Some("My Site".to_string()),
        description: Some("A short description of the site".to_string()),
        keywords: Some("blog, notes".to_string()),
        author: Some("Your Name".to_string()),
        networks,
    }
}

/// The sample configuration rendered as pretty JSON.
pub fn stock_config_json() -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&stock_config())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::write_file;
    use tempfile::TempDir;

    #[test]
    fn loads_full_config() {
        let tmp = TempDir::new().unwrap();
        let path = write_file(
            tmp.path(),
            "config.json",
            r#"{
                "site_name": "Demo",
                "description": "d",
                "keywords": "k",
                "author": "a",
                "networks": {
                    "twitter": {"name": "Twitter", "url": "https://twitter.com/demo"},
                    "github": {"name": "GitHub", "url": "https://github.com/demo"}
                }
            }"#,
        );
        let config = load_config(&path).unwrap();
        assert_eq!(config.site_name.as_deref(), Some("Demo"));
        assert_eq!(config.author.as_deref(), Some("a"));
        let keys: Vec<&str> = config.networks.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["github", "twitter"]);
        assert_eq!(config.networks["github"].url, "https://github.com/demo");
    }

    #[test]
    fn missing_keys_are_none() {
        let tmp = TempDir::new().unwrap();
        let path = write_file(tmp.path(), "config.json", r#"{"site_name": "Demo"}"#);
        let config = load_config(&path).unwrap();
        assert_eq!(config.site_name.as_deref(), Some("Demo"));
        assert!(config.author.is_none());
        assert!(config.networks.is_empty());
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let tmp = TempDir::new().unwrap();
        let path = write_file(
            tmp.path(),
            "config.json",
            r#"{"site_name": "Demo", "theme_color": "red"}"#,
        );
        assert!(load_config(&path).is_ok());
    }

    #[test]
    fn malformed_config_is_decode_error() {
        let tmp = TempDir::new().unwrap();
        let path = write_file(tmp.path(), "config.json", r#"{"site_name": }"#);
        assert!(matches!(
            load_config(&path),
            Err(ContentError::Decode { .. })
        ));
    }

    #[test]
    fn missing_config_is_not_found() {
        let tmp = TempDir::new().unwrap();
        assert!(matches!(
            load_config(&tmp.path().join("config.json")),
            Err(ContentError::NotFound(_))
        ));
    }

    #[test]
    fn stock_config_round_trips_through_json() {
        let json = stock_config_json().unwrap();
        let parsed: SiteConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, stock_config());
    }
}
