//! Shared CLI definitions for chartboard.
//!
//! Used by the main application and by the build script (manpage) and
//! gen_docs binary (command-line-options markdown).

use clap::{CommandFactory, Parser};
use std::path::PathBuf;

/// Command-line arguments for chartboard
#[derive(Clone, Parser, Debug, Default)]
#[command(
    name = "chartboard",
    version,
    about = "Chart dashboard in the terminal",
    long_about = include_str!("../long_about.txt")
)]
pub struct Args {
    /// Path to a JSON file holding an array of records.
    /// When omitted, the configured dataset or the bundled sample is used
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Enable debug mode to show operational information
    #[arg(long = "debug", action)]
    pub debug: bool,

    /// Number of charts per dashboard row (default: 2)
    #[arg(long = "charts-per-row", value_name = "N")]
    pub charts_per_row: Option<usize>,

    /// Write log output to this file (logging is off unless a file is given here or in config)
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Log filter directive, e.g. "debug" or "chartboard=trace" (default: info). RUST_LOG takes precedence
    #[arg(long = "log-level", value_name = "FILTER")]
    pub log_level: Option<String>,

    /// Generate default configuration file at ~/.config/chartboard/config.toml
    #[arg(long = "generate-config", action)]
    pub generate_config: bool,

    /// Force overwrite existing config file when using --generate-config
    #[arg(long = "force", requires = "generate_config", action)]
    pub force: bool,
}

/// Escape `|` and newlines for use in markdown table cells.
fn escape_table_cell(s: &str) -> String {
    s.replace('|', "\\|").replace(['\n', '\r'], " ")
}

/// Render command-line options as markdown.
pub fn render_options_markdown() -> String {
    let mut cmd = Args::command();
    cmd.build();

    let mut out = String::from("# Command Line Options\n\n");

    out.push_str("## Usage\n\n```\n");
    let usage = cmd.render_usage();
    out.push_str(&usage.to_string());
    out.push_str("\n```\n\n");

    out.push_str("## Options\n\n");
    out.push_str("| Option | Description |\n");
    out.push_str("|--------|-------------|\n");

    for arg in cmd.get_arguments() {
        let id = arg.get_id().as_ref().to_string();
        if id == "help" || id == "version" {
            continue;
        }

        let value_names: String = arg
            .get_value_names()
            .map(|names| {
                names
                    .iter()
                    .map(|n: &clap::builder::Str| format!("<{}>", n.as_ref() as &str))
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .unwrap_or_default();

        let option_str = if arg.is_positional() {
            if arg.is_required_set() {
                value_names
            } else {
                format!("[{value_names}]")
            }
        } else {
            let mut parts = Vec::new();
            if let Some(s) = arg.get_short() {
                parts.push(format!("-{s}"));
            }
            if let Some(l) = arg.get_long() {
                parts.push(format!("--{l}"));
            }
            let op = parts.join(", ");
            if arg.get_action().takes_values() && !value_names.is_empty() {
                format!("{op} {value_names}")
            } else {
                op
            }
        };

        let help = arg
            .get_help()
            .map(|h| escape_table_cell(&h.to_string()))
            .unwrap_or_else(|| "-".to_string());

        out.push_str(&format!("| `{option_str}` | {help} |\n"));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_without_path() {
        let args = Args::try_parse_from(["chartboard"]).unwrap();
        assert!(args.path.is_none());
        assert!(!args.debug);
        assert_eq!(args.charts_per_row, None);
    }

    #[test]
    fn test_parse_all_options() {
        let args = Args::try_parse_from([
            "chartboard",
            "sales.json",
            "--debug",
            "--charts-per-row",
            "3",
            "--log-file",
            "/tmp/chartboard.log",
            "--log-level",
            "debug",
        ])
        .unwrap();
        assert_eq!(args.path, Some(PathBuf::from("sales.json")));
        assert!(args.debug);
        assert_eq!(args.charts_per_row, Some(3));
        assert_eq!(args.log_file, Some(PathBuf::from("/tmp/chartboard.log")));
        assert_eq!(args.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_force_requires_generate_config() {
        assert!(Args::try_parse_from(["chartboard", "--force"]).is_err());
        let args = Args::try_parse_from(["chartboard", "--generate-config", "--force"]).unwrap();
        assert!(args.generate_config && args.force);
    }

    #[test]
    fn test_options_markdown_lists_flags() {
        let md = render_options_markdown();
        assert!(md.starts_with("# Command Line Options"));
        assert!(md.contains("`--charts-per-row <N>`"));
        assert!(md.contains("`[<PATH>]`"));
        assert!(!md.contains("--help"));
    }
}
