use clap::{Subcommand, ValueEnum};

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Show how bookmarks would be grouped without changing anything
    Preview {
        /// Collapse subdomains into their registrable domain
        #[arg(long)]
        merge_subdomains: bool,

        /// Show the folder path next to each bookmark
        #[arg(long)]
        include_folder_path: bool,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Rebuild the sorted folder in the bookmark store
    Apply {
        /// Collapse subdomains into their registrable domain
        #[arg(long)]
        merge_subdomains: bool,
    },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CliConfig;
    use clap::Parser;

    #[test]
    fn test_parse_preview_flags() {
        let config = CliConfig::try_parse_from([
            "bookmark-sorter",
            "--store",
            "tree.json",
            "preview",
            "--merge-subdomains",
            "--format",
            "json",
        ])
        .unwrap();

        assert_eq!(config.store, "tree.json");
        match config.command {
            Command::Preview {
                merge_subdomains,
                include_folder_path,
                format,
            } => {
                assert!(merge_subdomains);
                assert!(!include_folder_path);
                assert_eq!(format, OutputFormat::Json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_apply_has_no_folder_path_flag() {
        assert!(CliConfig::try_parse_from([
            "bookmark-sorter",
            "apply",
            "--include-folder-path"
        ])
        .is_err());
    }
}
