//! Loader for Sift configuration with YAML + environment overlays.
//!
//! Sources are merged in increasing precedence: built-in defaults, YAML files
//! and snippets (in the order they are attached), then `SIFT__`-prefixed
//! environment variables (`__` separates nesting levels, e.g.
//! `SIFT__SERVER__BIND=0.0.0.0:8080`). After merging, `${VAR}` placeholders
//! inside string values are expanded against the process environment.
//!
//! Every section has a default, so an empty document loads successfully.
//!
//! Lists (keywords, markers, labels) are replaced wholesale by the highest
//! precedence source; there is no element-wise merge.
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;

const MAXIMUM_ENV_EXPANSION_DEPTH: usize = 8;

#[derive(Debug, Clone, Deserialize)]
pub struct SiftConfig {
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub filters: FilterConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Keyword, entity and boilerplate filters applied by the extraction pipeline.
#[derive(Debug, Clone, Deserialize)]
pub struct FilterConfig {
    #[serde(default = "default_keywords")]
    pub keywords: Vec<String>,
    /// Entity label names, e.g. `MONEY`. Validated when the extractor is built.
    #[serde(default = "default_entity_labels")]
    pub entity_labels: Vec<String>,
    #[serde(default = "default_removal_markers")]
    pub removal_markers: Vec<String>,
    /// Sentences must be strictly longer than this (in characters) to be kept.
    #[serde(default = "default_min_sentence_chars")]
    pub min_sentence_chars: usize,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            keywords: default_keywords(),
            entity_labels: default_entity_labels(),
            removal_markers: default_removal_markers(),
            min_sentence_chars: default_min_sentence_chars(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct FetchConfig {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Maximum in-flight page fetches per batch. `1` processes URLs strictly in sequence.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
            concurrency: default_concurrency(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// `text` or `json`.
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default = "default_emit_stderr")]
    pub emit_stderr: bool,
    #[serde(default = "default_log_filter")]
    pub filter: String,
    #[serde(default)]
    pub dir: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: default_log_format(),
            emit_stderr: default_emit_stderr(),
            filter: default_log_filter(),
            dir: None,
        }
    }
}

fn default_keywords() -> Vec<String> {
    [
        "yojana", "signs", "sign", "mou", "approved", "announced", "launched", "passed",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}
fn default_entity_labels() -> Vec<String> {
    ["CARDINAL", "QUANTITY", "MONEY"]
        .into_iter()
        .map(String::from)
        .collect()
}
fn default_removal_markers() -> Vec<String> {
    ["Posted On:", "Release ID:", "pib.gov.in", "MJPS/SR"]
        .into_iter()
        .map(String::from)
        .collect()
}
fn default_min_sentence_chars() -> usize {
    40
}
fn default_timeout_secs() -> u64 {
    10
}
fn default_user_agent() -> String {
    concat!("sift/", env!("CARGO_PKG_VERSION")).into()
}
fn default_concurrency() -> usize {
    1
}
fn default_bind() -> String {
    "127.0.0.1:5000".into()
}
fn default_log_format() -> String {
    "text".into()
}
fn default_emit_stderr() -> bool {
    true
}
fn default_log_filter() -> String {
    "info".into()
}

fn expand_env_in_value(v: &mut Value) {
    match v {
        Value::String(s) => {
            if s.contains('$') {
                let mut cur = std::mem::take(s);
                for _ in 0..MAXIMUM_ENV_EXPANSION_DEPTH {
                    let expanded = match shellexpand::env(&cur) {
                        Ok(cow) => cow.into_owned(),
                        Err(_) => cur.clone(),
                    };
                    if expanded == cur {
                        break;
                    }
                    cur = expanded;
                }
                *s = cur;
            }
        }
        Value::Array(arr) => arr.iter_mut().for_each(expand_env_in_value),
        Value::Object(obj) => obj.values_mut().for_each(expand_env_in_value),
        _ => {}
    }
}

/// Builder hides the `config` crate wiring (YAML + env overrides).
pub struct SiftConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
    files: Vec<(std::path::PathBuf, bool)>,
    snippets: Vec<String>,
}

impl Default for SiftConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl SiftConfigLoader {
    /// Start with built-in defaults; `SIFT__` env overrides are applied last.
    ///
    /// ```
    /// use sift_config::SiftConfigLoader;
    ///
    /// let config = SiftConfigLoader::new()
    ///     .with_yaml_str("version: '1'")
    ///     .load()
    ///     .expect("valid config");
    ///
    /// assert_eq!(config.version.as_deref(), Some("1"));
    /// assert_eq!(config.filters.min_sentence_chars, 40);
    /// assert_eq!(config.fetch.timeout_secs, 10);
    /// ```
    pub fn new() -> Self {
        Self {
            builder: Config::builder(),
            files: Vec::new(),
            snippets: Vec::new(),
        }
    }

    /// Attach a YAML/TOML/JSON file that must exist; format is inferred by suffix.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.files.push((path.as_ref().to_path_buf(), true));
        self
    }

    /// Attach a file that is skipped when absent, so deployments can rely
    /// purely on environment variables.
    pub fn with_optional_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.files.push((path.as_ref().to_path_buf(), false));
        self
    }

    /// Allow tests/CLI to merge inline YAML snippets.
    ///
    /// ```
    /// use sift_config::SiftConfigLoader;
    ///
    /// let cfg = SiftConfigLoader::new()
    ///     .with_yaml_str(
    ///         r#"
    /// filters:
    ///   keywords: ["scheme", "inaugurated"]
    ///   entity_labels: ["MONEY"]
    /// fetch:
    ///   concurrency: 4
    /// "#,
    ///     )
    ///     .load()
    ///     .unwrap();
    ///
    /// assert_eq!(cfg.filters.keywords, vec!["scheme", "inaugurated"]);
    /// assert_eq!(cfg.filters.entity_labels, vec!["MONEY"]);
    /// assert_eq!(cfg.fetch.concurrency, 4);
    /// // untouched fields keep their defaults
    /// assert_eq!(cfg.filters.removal_markers.len(), 4);
    /// ```
    pub fn with_yaml_str(mut self, yaml: &str) -> Self {
        self.snippets.push(yaml.to_string());
        self
    }

    /// Consume the builder and deserialize the merged sources into strongly typed config.
    ///
    /// ```
    /// use sift_config::SiftConfigLoader;
    ///
    /// unsafe { std::env::set_var("SIFT_DOC_BIND", "0.0.0.0:9000"); }
    ///
    /// let config = SiftConfigLoader::new()
    ///     .with_yaml_str(r#"
    /// server:
    ///   bind: "${SIFT_DOC_BIND}"
    /// "#)
    ///     .load()
    ///     .expect("valid configuration");
    ///
    /// assert_eq!(config.server.bind, "0.0.0.0:9000");
    ///
    /// unsafe { std::env::remove_var("SIFT_DOC_BIND"); }
    /// ```
    pub fn load(self) -> Result<SiftConfig, ConfigError> {
        let mut builder = self.builder;
        for (path, required) in &self.files {
            builder = builder.add_source(File::from(path.as_path()).required(*required));
        }
        for yaml in &self.snippets {
            builder = builder.add_source(File::from_str(yaml, config::FileFormat::Yaml));
        }
        builder = builder.add_source(
            Environment::with_prefix("SIFT")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("filters.keywords")
                .with_list_parse_key("filters.entity_labels")
                .with_list_parse_key("filters.removal_markers"),
        );
        let cfg = builder.build()?;

        // Convert to serde_json::Value first
        let mut v: Value = cfg.try_deserialize()?;
        expand_env_in_value(&mut v);

        serde_json::from_value(v).map_err(|e| ConfigError::Message(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn expands_simple_string() {
        temp_env::with_var("FOO", Some("bar"), || {
            let mut v = json!("prefix-${FOO}-suffix");
            expand_env_in_value(&mut v);
            assert_eq!(v, json!("prefix-bar-suffix"));
        });
    }

    #[test]
    fn expands_inside_lists() {
        temp_env::with_var("MARKER", Some("Release ID:"), || {
            let mut v = json!({ "filters": { "removal_markers": ["${MARKER}", "pib.gov.in"] } });
            expand_env_in_value(&mut v);
            assert_eq!(
                v,
                json!({ "filters": { "removal_markers": ["Release ID:", "pib.gov.in"] } })
            );
        });
    }

    #[test]
    fn stops_on_cycles() {
        temp_env::with_vars([("A", Some("${B}")), ("B", Some("${A}"))], || {
            let mut v = json!("x=${A}-y");
            expand_env_in_value(&mut v);
            let s = v.as_str().unwrap();
            assert!(s.starts_with("x=") && s.ends_with("-y"));
            assert!(s.contains("${"));
        });
    }

    #[test]
    fn unknown_vars_are_left_as_is() {
        let mut v = json!("hi-${SIFT_DOES_NOT_EXIST}");
        expand_env_in_value(&mut v);
        assert_eq!(v, json!("hi-${SIFT_DOES_NOT_EXIST}"));
    }

    #[test]
    fn empty_document_yields_defaults() {
        let cfg = SiftConfigLoader::new().with_yaml_str("{}").load().unwrap();
        assert_eq!(
            cfg.filters.keywords,
            vec!["yojana", "signs", "sign", "mou", "approved", "announced", "launched", "passed"]
        );
        assert_eq!(cfg.filters.entity_labels, vec!["CARDINAL", "QUANTITY", "MONEY"]);
        assert_eq!(
            cfg.filters.removal_markers,
            vec!["Posted On:", "Release ID:", "pib.gov.in", "MJPS/SR"]
        );
        assert_eq!(cfg.fetch.concurrency, 1);
        assert_eq!(cfg.server.bind, "127.0.0.1:5000");
        assert_eq!(cfg.logging.format, "text");
    }

    #[test]
    fn later_snippets_override_earlier_ones() {
        let cfg = SiftConfigLoader::new()
            .with_yaml_str("fetch:\n  timeout_secs: 3\n")
            .with_yaml_str("fetch:\n  timeout_secs: 7\n")
            .load()
            .unwrap();
        assert_eq!(cfg.fetch.timeout_secs, 7);
    }
}
