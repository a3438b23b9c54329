use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Pull noteworthy sentences out of government press-release pages.
#[derive(Debug, Parser)]
#[command(name = "sift", version, about)]
pub struct Cli {
    /// YAML config file. Without it, `sift.yaml` is read when present.
    #[arg(long, short, global = true, env = "SIFT_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve the web form and the `/process` JSON endpoint
    Serve {
        /// Listen address, overrides `server.bind`
        #[arg(long)]
        bind: Option<String>,
    },
    /// Fetch pages and print their noteworthy sentences as JSON
    Extract {
        #[arg(required = true)]
        urls: Vec<String>,
        #[arg(long)]
        pretty: bool,
    },
    /// Run extraction on a local text file, or stdin
    Text {
        file: Option<PathBuf>,
        #[arg(long)]
        pretty: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_extract_with_global_config() {
        let cli = Cli::try_parse_from(["sift", "extract", "http://a", "http://b", "--pretty", "-c", "x.yaml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("x.yaml")));
        match cli.command {
            Command::Extract { urls, pretty } => {
                assert_eq!(urls, vec!["http://a", "http://b"]);
                assert!(pretty);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn extract_needs_a_url() {
        assert!(Cli::try_parse_from(["sift", "extract"]).is_err());
    }

    #[test]
    fn serve_bind_is_optional() {
        let cli = Cli::try_parse_from(["sift", "serve"]).unwrap();
        assert!(matches!(cli.command, Command::Serve { bind: None }));
        let cli = Cli::try_parse_from(["sift", "serve", "--bind", "0.0.0.0:8080"]).unwrap();
        assert!(matches!(cli.command, Command::Serve { bind: Some(b) } if b == "0.0.0.0:8080"));
    }

    #[test]
    fn text_reads_stdin_without_file() {
        let cli = Cli::try_parse_from(["sift", "text"]).unwrap();
        assert!(matches!(cli.command, Command::Text { file: None, pretty: false }));
    }
}
