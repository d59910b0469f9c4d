use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use intake_logging::LogDestination;

#[derive(Debug, Parser)]
#[command(name = "intake_app", version, about = "Stage and upload clinical documents")]
pub struct Cli {
    /// Files to stage for upload.
    #[arg(required_unless_present = "print_config")]
    pub files: Vec<PathBuf>,

    /// RON configuration file.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Overrides the configured upload endpoint.
    #[arg(long)]
    pub endpoint: Option<String>,

    #[arg(long, value_enum, default_value_t = LogTarget::Terminal)]
    pub log: LogTarget,

    /// Feed the files through the drag-and-drop path instead of the picker.
    #[arg(long)]
    pub drop: bool,

    /// Print the effective configuration and exit.
    #[arg(long)]
    pub print_config: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogTarget {
    Terminal,
    File,
    Both,
}

impl From<LogTarget> for LogDestination {
    fn from(target: LogTarget) -> Self {
        match target {
            LogTarget::Terminal => LogDestination::Terminal,
            LogTarget::File => LogDestination::File,
            LogTarget::Both => LogDestination::Both,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn files_are_required_unless_printing_config() {
        assert!(Cli::try_parse_from(["intake_app"]).is_err());

        let cli = Cli::try_parse_from(["intake_app", "--print-config"]).unwrap();
        assert!(cli.print_config);
        assert!(cli.files.is_empty());
    }

    #[test]
    fn parses_files_and_options() {
        let cli = Cli::try_parse_from([
            "intake_app",
            "--endpoint",
            "https://records.example.org/upload",
            "--log",
            "both",
            "--drop",
            "id.png",
            "report.pdf",
        ])
        .unwrap();

        assert_eq!(cli.files, vec![PathBuf::from("id.png"), PathBuf::from("report.pdf")]);
        assert_eq!(cli.endpoint.as_deref(), Some("https://records.example.org/upload"));
        assert_eq!(cli.log, LogTarget::Both);
        assert!(cli.drop);
        assert_eq!(LogDestination::from(cli.log), LogDestination::Both);
    }
}
