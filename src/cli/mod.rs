pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::config::AppConfig;

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Folio CLI - operator commands for the portfolio and dashboard backend")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Print the sitemap for the configured site URL")]
    Sitemap {
        #[arg(long, help = "Override NEXT_PUBLIC_SITE_URL")]
        base_url: Option<String>,
    },

    #[command(about = "Print profile and about data")]
    Profile,

    #[command(about = "TikTok OAuth helpers")]
    Oauth {
        #[command(subcommand)]
        cmd: commands::oauth::OauthCommands,
    },

    #[command(about = "Contact and lead operations against the CRM")]
    Crm {
        #[command(subcommand)]
        cmd: commands::crm::CrmCommands,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli, config: AppConfig) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    match cli.command {
        Commands::Sitemap { base_url } => commands::site::sitemap(&config, base_url, output_format),
        Commands::Profile => commands::site::profile(output_format),
        Commands::Oauth { cmd } => commands::oauth::handle(cmd, &config, output_format),
        Commands::Crm { cmd } => commands::crm::handle(cmd, &config, output_format).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_crm_list() {
        let cli = Cli::try_parse_from(["folio", "--json", "crm", "list", "leads", "--max-size", "5"]).unwrap();
        assert_eq!(OutputFormat::from_cli(&cli), OutputFormat::Json);
        assert!(matches!(cli.command, Commands::Crm { .. }));
    }

    #[test]
    fn test_text_is_default() {
        let cli = Cli::try_parse_from(["folio", "profile"]).unwrap();
        assert_eq!(OutputFormat::from_cli(&cli), OutputFormat::Text);
    }
}
