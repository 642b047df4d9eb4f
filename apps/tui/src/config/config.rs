use biodiversity_core::{SubjectId, DEFAULT_SUBJECT};
use dotenv::dotenv;
use std::env;
use std::path::PathBuf;

/// Where the published dataset lives
pub const DEFAULT_DATASET_URL: &str = "https://falconpunch082.github.io/samples.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetSource {
    Url(String),
    File(PathBuf),
}

impl DatasetSource {
    pub fn describe(&self) -> String {
        match self {
            Self::Url(url) => url.clone(),
            Self::File(path) => path.display().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub source: DatasetSource,
    pub default_subject: SubjectId,
    pub debug: bool,
}

/// Initializes the application configuration from `.env` and the process
/// environment. A `DATASET_PATH` wins over `DATASET_URL`.
pub fn init_app_config() -> AppConfig {
    // Load environment variables from .env file
    dotenv().ok();

    from_lookup(|key| env::var(key).ok())
}

fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> AppConfig {
    let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

    let source = non_empty("DATASET_PATH").map_or_else(
        || {
            DatasetSource::Url(
                non_empty("DATASET_URL").unwrap_or_else(|| DEFAULT_DATASET_URL.to_string()),
            )
        },
        |path| DatasetSource::File(PathBuf::from(path)),
    );

    let default_subject = non_empty("DEFAULT_SUBJECT")
        .map_or_else(|| SubjectId::from(DEFAULT_SUBJECT), |value| SubjectId::from(value.trim()));

    AppConfig {
        source,
        default_subject,
        debug: non_empty("DEBUG").is_some_and(|value| value != "0"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_with(vars: &[(&str, &str)]) -> AppConfig {
        let vars = vars
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect::<HashMap<_, _>>();
        from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_to_published_dataset() {
        let config = config_with(&[]);
        assert_eq!(config.source, DatasetSource::Url(DEFAULT_DATASET_URL.to_string()));
        assert_eq!(config.default_subject, SubjectId::from("940"));
        assert!(!config.debug);
    }

    #[test]
    fn dataset_path_wins_over_url() {
        let config = config_with(&[
            ("DATASET_URL", "http://localhost:8000/samples.json"),
            ("DATASET_PATH", "data/samples.json"),
        ]);
        assert_eq!(
            config.source,
            DatasetSource::File(PathBuf::from("data/samples.json"))
        );
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = config_with(&[("DATASET_PATH", "  "), ("DEFAULT_SUBJECT", ""), ("DEBUG", "0")]);
        assert_eq!(config.source, DatasetSource::Url(DEFAULT_DATASET_URL.to_string()));
        assert_eq!(config.default_subject, SubjectId::from("940"));
        assert!(!config.debug);
    }

    #[test]
    fn reads_subject_and_debug() {
        let config = config_with(&[("DEFAULT_SUBJECT", " 1601 "), ("DEBUG", "1")]);
        assert_eq!(config.default_subject, SubjectId::from("1601"));
        assert!(config.debug);
    }
}
