//! Sitemap entries for the public pages.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeFrequency {
    Always,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Never,
}

impl ChangeFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeFrequency::Always => "always",
            ChangeFrequency::Hourly => "hourly",
            ChangeFrequency::Daily => "daily",
            ChangeFrequency::Weekly => "weekly",
            ChangeFrequency::Monthly => "monthly",
            ChangeFrequency::Yearly => "yearly",
            ChangeFrequency::Never => "never",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SitemapEntry {
    pub url: String,
    pub last_modified: DateTime<Utc>,
    pub change_frequency: ChangeFrequency,
    pub priority: f32,
}

const PAGES: [(&str, ChangeFrequency, f32); 9] = [
    ("/", ChangeFrequency::Monthly, 1.0),
    ("/about", ChangeFrequency::Monthly, 0.8),
    ("/projects", ChangeFrequency::Weekly, 0.9),
    ("/experience", ChangeFrequency::Monthly, 0.7),
    ("/skills", ChangeFrequency::Monthly, 0.6),
    ("/blog", ChangeFrequency::Weekly, 0.7),
    ("/contact", ChangeFrequency::Yearly, 0.5),
    ("/family", ChangeFrequency::Monthly, 0.4),
    ("/privacy", ChangeFrequency::Yearly, 0.3),
];

/// The fixed page list; only `last_modified` depends on `now`
pub fn entries(base_url: &str, now: DateTime<Utc>) -> Vec<SitemapEntry> {
    let base = base_url.trim_end_matches('/');
    PAGES
        .iter()
        .map(|(path, change_frequency, priority)| SitemapEntry {
            url: if *path == "/" { base.to_string() } else { format!("{}{}", base, path) },
            last_modified: now,
            change_frequency: *change_frequency,
            priority: *priority,
        })
        .collect()
}

/// Render entries as a sitemaps.org `urlset` document
pub fn to_xml(entries: &[SitemapEntry]) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );
    for entry in entries {
        xml.push_str("  <url>\n");
        xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(&entry.url)));
        xml.push_str(&format!(
            "    <lastmod>{}</lastmod>\n",
            entry.last_modified.to_rfc3339_opts(SecondsFormat::Millis, true)
        ));
        xml.push_str(&format!("    <changefreq>{}</changefreq>\n", entry.change_frequency.as_str()));
        xml.push_str(&format!("    <priority>{:.1}</priority>\n", entry.priority));
        xml.push_str("  </url>\n");
    }
    xml.push_str("</urlset>\n");
    xml
}

fn escape_xml(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_fields(entries: &[SitemapEntry]) -> Vec<(String, ChangeFrequency, f32)> {
        entries
            .iter()
            .map(|e| (e.url.clone(), e.change_frequency, e.priority))
            .collect()
    }

    #[test]
    fn test_nine_entries_with_base_url() {
        let entries = entries("https://example.com/", Utc::now());
        assert_eq!(entries.len(), 9);
        assert_eq!(entries[0].url, "https://example.com");
        assert_eq!(entries[1].url, "https://example.com/about");
        assert_eq!(entries[8].url, "https://example.com/privacy");
        assert_eq!(entries[0].priority, 1.0);
        assert_eq!(entries[2].change_frequency, ChangeFrequency::Weekly);
    }

    #[test]
    fn test_full_page_table() {
        let expected = vec![
            ("https://example.com", ChangeFrequency::Monthly, 1.0),
            ("https://example.com/about", ChangeFrequency::Monthly, 0.8),
            ("https://example.com/projects", ChangeFrequency::Weekly, 0.9),
            ("https://example.com/experience", ChangeFrequency::Monthly, 0.7),
            ("https://example.com/skills", ChangeFrequency::Monthly, 0.6),
            ("https://example.com/blog", ChangeFrequency::Weekly, 0.7),
            ("https://example.com/contact", ChangeFrequency::Yearly, 0.5),
            ("https://example.com/family", ChangeFrequency::Monthly, 0.4),
            ("https://example.com/privacy", ChangeFrequency::Yearly, 0.3),
        ]
        .into_iter()
        .map(|(url, freq, priority)| (url.to_string(), freq, priority))
        .collect::<Vec<(String, ChangeFrequency, f32)>>();

        assert_eq!(fixed_fields(&entries("https://example.com", Utc::now())), expected);
    }

    #[test]
    fn test_only_last_modified_varies() {
        let early = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        let late = Utc.with_ymd_and_hms(2030, 6, 1, 12, 0, 0).unwrap();
        let a = entries("https://example.com", early);
        let b = entries("https://example.com", late);
        assert_eq!(fixed_fields(&a), fixed_fields(&b));
        assert!(a.iter().all(|e| e.last_modified == early));
        assert!(b.iter().all(|e| e.last_modified == late));
    }

    #[test]
    fn test_xml_rendering() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 8, 30, 0).unwrap();
        let xml = to_xml(&entries("https://example.com", now));
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert_eq!(xml.matches("<url>").count(), 9);
        assert!(xml.contains("<loc>https://example.com/projects</loc>"));
        assert!(xml.contains("<lastmod>2024-03-01T08:30:00.000Z</lastmod>"));
        assert!(xml.contains("<changefreq>yearly</changefreq>"));
        assert!(xml.contains("<priority>0.3</priority>"));
    }

    #[test]
    fn test_escapes_urls() {
        assert_eq!(escape_xml("a&b<c>"), "a&amp;b&lt;c&gt;");
    }
}
