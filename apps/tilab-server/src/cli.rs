use clap::Parser;
use std::path::PathBuf;

/// TILAB laboratory equipment loans server
#[derive(Debug, Parser)]
#[command(name = "tilab-server", version, about)]
pub struct Cli {
    /// YAML configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print the effective configuration as YAML and exit
    #[arg(long)]
    pub print_config: bool,

    /// Listen address, overrides `server.bind_addr`
    #[arg(long, value_name = "ADDR")]
    pub bind: Option<String>,

    /// Database URL, overrides `database.url`
    #[arg(long, value_name = "URL")]
    pub database_url: Option<String>,

    /// Do not apply pending migrations on startup
    #[arg(long)]
    pub skip_migrations: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_flags() {
        let cli = Cli::try_parse_from([
            "tilab-server",
            "--config",
            "tilab.yaml",
            "--bind",
            "127.0.0.1:9000",
            "--database-url",
            "sqlite::memory:",
            "--skip-migrations",
        ])
        .unwrap();

        assert_eq!(cli.config, Some(PathBuf::from("tilab.yaml")));
        assert_eq!(cli.bind.as_deref(), Some("127.0.0.1:9000"));
        assert_eq!(cli.database_url.as_deref(), Some("sqlite::memory:"));
        assert!(cli.skip_migrations);
        assert!(!cli.print_config);
    }

    #[test]
    fn no_flags_is_valid() {
        let cli = Cli::try_parse_from(["tilab-server"]).unwrap();
        assert!(cli.config.is_none());
        assert!(cli.bind.is_none());
    }

    #[test]
    fn rejects_unknown_flag() {
        assert!(Cli::try_parse_from(["tilab-server", "--port", "80"]).is_err());
    }
}
