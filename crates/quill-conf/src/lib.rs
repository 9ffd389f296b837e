use std::collections::BTreeMap;

use camino::Utf8Path;
use config::Config;
use config::ConfigError as ExternalConfigError;
use config::Environment;
use config::File;
use config::FileFormat;
use directories::ProjectDirs;
use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_BIND: &str = "0.0.0.0:8080";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration build/deserialize error")]
    Config(#[from] ExternalConfigError),
}

/// An icon link shown in the site header.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct Link {
    pub name: String,
    pub symbol: String,
    pub url: String,
}

/// A navigation tab.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct Page {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Site name, also the default post author.
    pub name: String,
    pub description: String,
    /// Feed URL to advertise. Derived from the request host when unset.
    pub feed: Option<String>,
    /// Address the server listens on.
    pub bind: String,
    pub links: Vec<Link>,
    pub pages: Vec<Page>,
    /// Extra strings made available to every page template.
    pub values: BTreeMap<String, String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            feed: None,
            bind: DEFAULT_BIND.to_string(),
            links: Vec::new(),
            pages: Vec::new(),
            values: BTreeMap::new(),
        }
    }
}

impl Settings {
    /// Load settings for the site rooted at `site_root`.
    ///
    /// Sources, lowest priority first: the user config file, `.quill.toml`,
    /// `quill.toml`, then `QUILL_*` environment variables.
    pub fn new(site_root: &Utf8Path) -> Result<Self, ConfigError> {
        let user_config_file = ProjectDirs::from("dev", "quill", "quill")
            .map(|proj_dirs| proj_dirs.config_dir().join("quill.toml"));

        Self::load_from_paths(
            site_root,
            user_config_file.as_deref(),
            Some(Environment::with_prefix("QUILL")),
        )
    }

    fn load_from_paths(
        site_root: &Utf8Path,
        user_config_path: Option<&std::path::Path>,
        environment: Option<Environment>,
    ) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        if let Some(path) = user_config_path {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(false));
        }

        builder = builder.add_source(
            File::from(site_root.join(".quill.toml").as_std_path())
                .format(FileFormat::Toml)
                .required(false),
        );

        builder = builder.add_source(
            File::from(site_root.join("quill.toml").as_std_path())
                .format(FileFormat::Toml)
                .required(false),
        );

        if let Some(environment) = environment {
            builder = builder.add_source(environment);
        }

        let config = builder.build()?;
        let settings: Settings = config.try_deserialize()?;

        tracing::debug!(
            name = %settings.name,
            bind = %settings.bind,
            links = settings.links.len(),
            pages = settings.pages.len(),
            "settings loaded"
        );

        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use camino::Utf8PathBuf;
    use tempfile::tempdir;

    use super::*;

    fn utf8(path: &std::path::Path) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(path.to_path_buf()).unwrap()
    }

    fn load(root: &Utf8Path) -> Settings {
        Settings::load_from_paths(root, None, None).unwrap()
    }

    mod defaults {
        use super::*;

        #[test]
        fn test_load_no_files() {
            let dir = tempdir().unwrap();
            let settings = load(&utf8(dir.path()));
            assert_eq!(settings, Settings::default());
            assert_eq!(settings.bind, "0.0.0.0:8080");
        }
    }

    mod site_files {
        use super::*;

        #[test]
        fn test_load_quill_toml() {
            let dir = tempdir().unwrap();
            fs::write(
                dir.path().join("quill.toml"),
                r#"
name = "Ann Example"
description = "Notes"

[[links]]
name = "GitHub"
symbol = "G"
url = "https://github.com/ann"

[[pages]]
name = "Blog"
url = "/blog/"

[values]
analytics = "UA-1"
"#,
            )
            .unwrap();

            let settings = load(&utf8(dir.path()));
            assert_eq!(settings.name, "Ann Example");
            assert_eq!(settings.description, "Notes");
            assert_eq!(
                settings.links,
                vec![Link {
                    name: "GitHub".to_string(),
                    symbol: "G".to_string(),
                    url: "https://github.com/ann".to_string(),
                }]
            );
            assert_eq!(
                settings.pages,
                vec![Page {
                    name: "Blog".to_string(),
                    url: "/blog/".to_string(),
                }]
            );
            assert_eq!(settings.values.get("analytics").map(String::as_str), Some("UA-1"));
            assert_eq!(settings.feed, None);
        }

        #[test]
        fn test_quill_toml_overrides_dot_quill_toml() {
            let dir = tempdir().unwrap();
            fs::write(dir.path().join(".quill.toml"), "name = \"hidden\"\nbind = \"127.0.0.1:1\"").unwrap();
            fs::write(dir.path().join("quill.toml"), "name = \"visible\"").unwrap();

            let settings = load(&utf8(dir.path()));
            assert_eq!(settings.name, "visible"); // quill.toml wins
            assert_eq!(settings.bind, "127.0.0.1:1"); // untouched keys survive
        }

        #[test]
        fn test_site_overrides_user() {
            let user_dir = tempdir().unwrap();
            let site_dir = tempdir().unwrap();
            let user_conf_path = user_dir.path().join("quill.toml");
            fs::write(&user_conf_path, "name = \"user\"\ndescription = \"from user\"").unwrap();
            fs::write(site_dir.path().join("quill.toml"), "name = \"site\"").unwrap();

            let settings =
                Settings::load_from_paths(&utf8(site_dir.path()), Some(&user_conf_path), None)
                    .unwrap();
            assert_eq!(settings.name, "site");
            assert_eq!(settings.description, "from user");
        }
    }

    mod environment {
        use super::*;

        #[test]
        fn test_environment_overrides_files() {
            let dir = tempdir().unwrap();
            fs::write(dir.path().join("quill.toml"), "bind = \"127.0.0.1:9000\"").unwrap();

            let mut vars = config::Map::new();
            vars.insert("QUILL_BIND".to_string(), "127.0.0.1:9999".to_string());
            let environment = Environment::with_prefix("QUILL").source(Some(vars));

            let settings =
                Settings::load_from_paths(&utf8(dir.path()), None, Some(environment)).unwrap();
            assert_eq!(settings.bind, "127.0.0.1:9999");
        }
    }

    mod errors {
        use super::*;

        #[test]
        fn test_invalid_toml_content() {
            let dir = tempdir().unwrap();
            fs::write(dir.path().join("quill.toml"), "links = \"not a list\"").unwrap();
            let result = Settings::load_from_paths(&utf8(dir.path()), None, None);
            assert!(result.is_err());
            assert!(matches!(result.unwrap_err(), ConfigError::Config(_)));
        }
    }
}
