//! Static profile and about data for the portfolio pages.
//!
//! Values are built fresh on every call; nothing here is stored or mutated.

pub mod social;

use serde::{Deserialize, Serialize};

pub use social::{render_social_links, Icon, RenderedSocialLink};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    pub platform: String,
    pub url: String,
}

impl SocialLink {
    pub fn new(platform: &str, url: &str) -> Self {
        Self {
            platform: platform.to_string(),
            url: url.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    pub name: String,
    pub proficiency: String,
    /// 0..=100
    pub level: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    pub name: String,
    pub title: String,
    pub location: String,
    pub email: String,
    pub website: String,
    pub bio: String,
    pub social_links: Vec<SocialLink>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AboutInfo {
    pub headline: String,
    pub paragraphs: Vec<String>,
    pub interests: Vec<String>,
    pub languages: Vec<Language>,
}

/// Profile with icon ids resolved, as served to the frontend
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileView {
    pub name: String,
    pub title: String,
    pub location: String,
    pub email: String,
    pub website: String,
    pub bio: String,
    pub social_links: Vec<RenderedSocialLink>,
}

impl From<PersonalInfo> for ProfileView {
    fn from(info: PersonalInfo) -> Self {
        let social_links = render_social_links(&info.social_links);
        Self {
            name: info.name,
            title: info.title,
            location: info.location,
            email: info.email,
            website: info.website,
            bio: info.bio,
            social_links,
        }
    }
}

pub fn personal_info() -> PersonalInfo {
    PersonalInfo {
        name: "Alex Rivera".to_string(),
        title: "Software Engineer".to_string(),
        location: "Lisbon, Portugal".to_string(),
        email: "hello@alexrivera.dev".to_string(),
        website: "https://alexrivera.dev".to_string(),
        bio: "Engineer building web platforms and small tools that make everyday \
              work and family life a little easier."
            .to_string(),
        social_links: vec![
            SocialLink::new("github", "https://github.com/alexrivera"),
            SocialLink::new("linkedin", "https://www.linkedin.com/in/alexrivera"),
            SocialLink::new("x", "https://x.com/alexrivera"),
            SocialLink::new("tiktok", "https://www.tiktok.com/@alexrivera"),
            SocialLink::new("email", "mailto:hello@alexrivera.dev"),
        ],
    }
}

pub fn about_info() -> AboutInfo {
    AboutInfo {
        headline: "Hi, I'm Alex.".to_string(),
        paragraphs: vec![
            "I design and build web applications end to end, from data models to the \
             last pixel of the interface."
                .to_string(),
            "Outside of client work I run a small family organizer and keep a CRM \
             dashboard for freelance leads."
                .to_string(),
        ],
        interests: vec![
            "Distributed systems".to_string(),
            "Developer tooling".to_string(),
            "Photography".to_string(),
        ],
        languages: vec![
            Language {
                name: "English".to_string(),
                proficiency: "Native".to_string(),
                level: 100,
            },
            Language {
                name: "Portuguese".to_string(),
                proficiency: "Fluent".to_string(),
                level: 90,
            },
            Language {
                name: "Spanish".to_string(),
                proficiency: "Intermediate".to_string(),
                level: 60,
            },
        ],
    }
}
