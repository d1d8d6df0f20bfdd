use serde::{Deserialize, Serialize};

use super::SocialLink;

/// Icon identifiers understood by the frontend icon set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Icon {
    Github,
    Linkedin,
    Twitter,
    Instagram,
    Tiktok,
    Youtube,
    Mail,
    Globe,
    Link,
}

impl Icon {
    /// Map a platform identifier to its icon; unknown platforms get a generic link icon
    pub fn for_platform(platform: &str) -> Self {
        match platform.trim().to_ascii_lowercase().as_str() {
            "github" => Icon::Github,
            "linkedin" => Icon::Linkedin,
            "twitter" | "x" => Icon::Twitter,
            "instagram" => Icon::Instagram,
            "tiktok" => Icon::Tiktok,
            "youtube" => Icon::Youtube,
            "email" | "mail" => Icon::Mail,
            "website" | "web" | "homepage" => Icon::Globe,
            _ => Icon::Link,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Icon::Github => "github",
            Icon::Linkedin => "linkedin",
            Icon::Twitter => "twitter",
            Icon::Instagram => "instagram",
            Icon::Tiktok => "tiktok",
            Icon::Youtube => "youtube",
            Icon::Mail => "mail",
            Icon::Globe => "globe",
            Icon::Link => "link",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedSocialLink {
    pub platform: String,
    pub url: String,
    pub icon: Icon,
}

/// Attach an icon to every link, preserving order
pub fn render_social_links(links: &[SocialLink]) -> Vec<RenderedSocialLink> {
    links
        .iter()
        .map(|link| RenderedSocialLink {
            platform: link.platform.clone(),
            url: link.url.clone(),
            icon: Icon::for_platform(&link.platform),
        })
        .collect()
}
