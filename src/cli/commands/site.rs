use serde_json::json;

use crate::cli::utils::output_value;
use crate::cli::OutputFormat;
use crate::config::AppConfig;
use crate::personal::{self, ProfileView};
use crate::sitemap;

pub fn sitemap(config: &AppConfig, base_url: Option<String>, output_format: OutputFormat) -> anyhow::Result<()> {
    let base_url = base_url.unwrap_or_else(|| config.site.site_url.clone());
    let entries = sitemap::entries(&base_url, chrono::Utc::now());

    match output_format {
        OutputFormat::Json => output_value(&output_format, &serde_json::to_value(&entries)?),
        OutputFormat::Text => {
            print!("{}", sitemap::to_xml(&entries));
            Ok(())
        }
    }
}

pub fn profile(output_format: OutputFormat) -> anyhow::Result<()> {
    let profile = ProfileView::from(personal::personal_info());
    let about = personal::about_info();

    match output_format {
        OutputFormat::Json => output_value(
            &output_format,
            &json!({ "profile": profile, "about": about }),
        ),
        OutputFormat::Text => {
            println!("{} - {} ({})", profile.name, profile.title, profile.location);
            println!("{}", profile.bio);
            for link in &profile.social_links {
                println!("  [{}] {}", link.icon.as_str(), link.url);
            }
            for language in &about.languages {
                println!("  {} - {} ({}%)", language.name, language.proficiency, language.level);
            }
            Ok(())
        }
    }
}
