// src/main.rs

use anyhow::Result;
use clap::{ArgGroup, Parser};
use pkgutils::filesystem::SystemIdentity;
use pkgutils::{Config, QueryEngine};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "pkginfo")]
#[command(author, version = concat!("(pkgutils) ", env!("CARGO_PKG_VERSION")), about = "Display software package information", long_about = None)]
#[command(disable_version_flag = true)]
#[command(arg(
    clap::Arg::new("version")
        .short('v')
        .long("version")
        .action(clap::ArgAction::Version)
        .help("Print version and exit")
))]
#[command(group(
    ArgGroup::new("mode")
        .required(true)
        .args(["installed", "list", "owner", "footprint"])
))]
struct Cli {
    /// List installed packages
    #[arg(short, long)]
    installed: bool,

    /// List files in <package> or <file>
    #[arg(short, long, value_name = "package|file")]
    list: Option<String>,

    /// List owner(s) of file(s) matching <pattern>
    #[arg(short, long, value_name = "pattern")]
    owner: Option<String>,

    /// Print footprint for <file>
    #[arg(short, long, value_name = "file")]
    footprint: Option<PathBuf>,

    /// Specify alternative installation root
    #[arg(short, long, value_name = "path")]
    root: Option<PathBuf>,
}

/// The single report selected on the command line
#[derive(Debug, Clone, PartialEq, Eq)]
enum Mode {
    Installed,
    List(String),
    Owner(String),
    Footprint(PathBuf),
}

impl Cli {
    /// The "mode" group is required and exclusive, so exactly one arm applies
    fn mode(&self) -> Mode {
        match (self.installed, &self.list, &self.owner, &self.footprint) {
            (true, None, None, None) => Mode::Installed,
            (false, Some(target), None, None) => Mode::List(target.clone()),
            (false, None, Some(pattern), None) => Mode::Owner(pattern.clone()),
            (false, None, None, Some(archive)) => Mode::Footprint(archive.clone()),
            _ => unreachable!("clap enforces exactly one of -f, -i, -l, -o"),
        }
    }

    fn config(&self) -> Config {
        match &self.root {
            Some(root) => Config::new().with_root(root),
            None => Config::new(),
        }
    }
}

fn main() -> Result<()> {
    // Initialize tracing subscriber for logging; reports own stdout
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let mode = cli.mode();

    let engine = QueryEngine::new(cli.config());
    debug!("Using package database '{}'", engine.config().database_path().display());

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match mode {
        Mode::Installed => {
            let count = engine.list_installed(&mut out)?;
            info!("Listed {} installed packages", count);
        }
        Mode::List(target) => {
            let outcome = engine.list_files(&target, &mut out)?;
            info!("Listed files of {}: {:?}", target, outcome);
        }
        Mode::Owner(pattern) => {
            let count = engine.list_owners(&pattern, &mut out)?;
            info!("Pattern '{}' matched {} files", pattern, count);
        }
        Mode::Footprint(archive) => {
            let count = engine.footprint(&archive, &SystemIdentity, &mut out)?;
            info!("Printed footprint of {} entries", count);
        }
    }

    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use clap::error::ErrorKind;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_single_mode_selected() {
        let cli = Cli::try_parse_from(["pkginfo", "-i"]).unwrap();
        assert_eq!(cli.mode(), Mode::Installed);

        let cli = Cli::try_parse_from(["pkginfo", "--list", "foo"]).unwrap();
        assert_eq!(cli.mode(), Mode::List("foo".to_string()));

        let cli = Cli::try_parse_from(["pkginfo", "-o", "^/etc/"]).unwrap();
        assert_eq!(cli.mode(), Mode::Owner("^/etc/".to_string()));

        let cli = Cli::try_parse_from(["pkginfo", "-f", "foo#1-1.pkg.tar.gz"]).unwrap();
        assert_eq!(
            cli.mode(),
            Mode::Footprint(PathBuf::from("foo#1-1.pkg.tar.gz"))
        );
    }

    #[test]
    fn test_mode_is_required() {
        let result = Cli::try_parse_from(["pkginfo"]);
        assert!(result.is_err());

        let result = Cli::try_parse_from(["pkginfo", "-r", "/mnt"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_modes_are_exclusive() {
        let result = Cli::try_parse_from(["pkginfo", "-i", "-o", "foo"]);
        assert_eq!(result.err().map(|e| e.kind()), Some(ErrorKind::ArgumentConflict));
    }

    #[test]
    fn test_root_sets_database_path() {
        let cli = Cli::try_parse_from(["pkginfo", "-i", "--root", "/mnt"]).unwrap();
        assert_eq!(
            cli.config().database_path(),
            PathBuf::from("/mnt/var/lib/pkg/db")
        );
    }

    #[test]
    fn test_version_flag() {
        let result = Cli::try_parse_from(["pkginfo", "-v"]);
        assert_eq!(result.err().map(|e| e.kind()), Some(ErrorKind::DisplayVersion));

        let result = Cli::try_parse_from(["pkginfo", "--version"]);
        assert_eq!(result.err().map(|e| e.kind()), Some(ErrorKind::DisplayVersion));
    }
}
