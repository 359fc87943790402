//! Command-line surface.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "artpipe",
    version,
    about = "Resolve a component's identity across the release pipeline stages"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve starting from an upstream GitHub repository
    Github {
        /// Repo name, `org/repo`, or a full GitHub URL
        repo: String,
        /// Product version, e.g. 4.10
        #[arg(long)]
        version: Option<String>,
    },
    /// Resolve starting from a dist-git component
    Distgit {
        name: String,
        #[arg(long)]
        version: Option<String>,
    },
    /// Resolve starting from a Brew package
    Brew {
        package: String,
        #[arg(long)]
        version: Option<String>,
    },
    /// Resolve starting from a CDN repository
    Cdn {
        name: String,
        #[arg(long)]
        version: Option<String>,
    },
    /// Resolve starting from a delivery (customer-facing) repository
    Image {
        /// Repo name with or without the registry host or `openshift4/` prefix
        name: String,
        #[arg(long)]
        version: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn subcommands_parse_with_and_without_version() {
        let cli = Cli::try_parse_from(["artpipe", "distgit", "ironic", "--version", "4.11"])
            .unwrap();
        match cli.command {
            Commands::Distgit { name, version } => {
                assert_eq!(name, "ironic");
                assert_eq!(version.as_deref(), Some("4.11"));
            }
            _ => panic!("parsed the wrong subcommand"),
        }

        let cli = Cli::try_parse_from(["artpipe", "image", "ose-ironic-rhel8"]).unwrap();
        match cli.command {
            Commands::Image { name, version } => {
                assert_eq!(name, "ose-ironic-rhel8");
                assert!(version.is_none());
            }
            _ => panic!("parsed the wrong subcommand"),
        }
    }
}
