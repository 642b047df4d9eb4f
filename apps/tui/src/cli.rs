use clap::{CommandFactory, Parser};

#[derive(Debug, Parser)]
#[command(
    name = "biodiversity-dash",
    version,
    about = "Belly button biodiversity dashboard"
)]
pub struct CliArgs {
    /// Print the charts for one subject and exit
    #[arg(long)]
    pub headless: bool,

    /// Print headless charts as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Load the dataset from a local JSON file
    #[arg(long, value_name = "PATH")]
    pub dataset: Option<String>,

    /// Fetch the dataset from this URL
    #[arg(long, value_name = "URL")]
    pub url: Option<String>,

    /// Subject shown on start
    #[arg(long, value_name = "ID")]
    pub subject: Option<String>,
}

impl CliArgs {
    pub fn apply_env_overrides(&self) {
        if let Some(path) = &self.dataset {
            std::env::set_var("DATASET_PATH", path);
        }
        if let Some(url) = &self.url {
            std::env::set_var("DATASET_URL", url);
            if self.dataset.is_none() {
                std::env::remove_var("DATASET_PATH");
            }
        }
        if let Some(subject) = &self.subject {
            std::env::set_var("DEFAULT_SUBJECT", subject);
        }
        if self.debug {
            std::env::set_var("DEBUG", "1");
        }
    }

    pub fn help_text() -> String {
        let mut command = Self::command();
        let mut buffer = Vec::new();
        command.write_help(&mut buffer).ok();
        String::from_utf8_lossy(&buffer).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_headless_json_for_subject() -> Result<(), clap::Error> {
        let args = CliArgs::try_parse_from([
            "biodiversity-dash",
            "--headless",
            "--json",
            "--subject",
            "941",
            "--dataset",
            "samples.json",
        ])?;

        assert!(args.headless);
        assert!(args.json);
        assert_eq!(args.subject.as_deref(), Some("941"));
        assert_eq!(args.dataset.as_deref(), Some("samples.json"));
        assert!(args.url.is_none());
        Ok(())
    }

    #[test]
    fn defaults_to_interactive() -> Result<(), clap::Error> {
        let args = CliArgs::try_parse_from(["biodiversity-dash"])?;
        assert!(!args.headless);
        assert!(!args.debug);
        Ok(())
    }

    #[test]
    fn help_lists_dataset_flags() {
        let help = CliArgs::help_text();
        assert!(help.contains("--dataset"));
        assert!(help.contains("--url"));
    }
}
