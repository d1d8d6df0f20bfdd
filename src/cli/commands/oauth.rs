use clap::Subcommand;
use serde_json::json;

use crate::cli::utils::output_success;
use crate::cli::OutputFormat;
use crate::config::AppConfig;
use crate::oauth;

#[derive(Subcommand)]
pub enum OauthCommands {
    #[command(about = "Print a TikTok authorization URL with a fresh state")]
    Url,
}

pub fn handle(cmd: OauthCommands, config: &AppConfig, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        OauthCommands::Url => {
            let request = oauth::authorization_request(&config.tiktok, &config.site)?;
            if output_format == OutputFormat::Text {
                println!("{}", request.url);
                return Ok(());
            }
            output_success(
                &output_format,
                "Authorization URL generated",
                Some(json!({ "url": request.url, "state": request.state })),
            )
        }
    }
}
