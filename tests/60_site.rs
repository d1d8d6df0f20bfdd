mod common;

use anyhow::Result;
use axum::http::StatusCode;

use common::{config_with, MockCrm, MockSessions, MockTokens, TestApp};
use folio_api::handlers::site::placeholder::PLACEHOLDER_PNG;

#[tokio::test]
async fn sitemap_lists_every_public_page() -> Result<()> {
    let config = config_with(&[("NEXT_PUBLIC_SITE_URL", "https://alexrivera.dev/")]);
    let app = TestApp::new(config, MockCrm::default(), MockSessions::anonymous(), MockTokens::default());

    let res = app.get("/sitemap.xml").await?;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.headers["content-type"], "application/xml; charset=utf-8");
    let xml = String::from_utf8(res.body.to_vec())?;
    assert_eq!(xml.matches("<url>").count(), 9);
    assert!(xml.contains("<loc>https://alexrivera.dev</loc>"));
    assert!(xml.contains("<loc>https://alexrivera.dev/privacy</loc>"));

    let between = |open: &str, close: &str| -> Vec<String> {
        xml.split(open)
            .skip(1)
            .filter_map(|rest| rest.split(close).next())
            .map(str::to_string)
            .collect()
    };
    let paths: Vec<String> = between("<loc>", "</loc>")
        .iter()
        .map(|loc| loc.trim_start_matches("https://alexrivera.dev").to_string())
        .collect();
    assert_eq!(
        paths,
        vec!["", "/about", "/projects", "/experience", "/skills", "/blog", "/contact", "/family", "/privacy"]
    );
    assert_eq!(
        between("<changefreq>", "</changefreq>"),
        vec!["monthly", "monthly", "weekly", "monthly", "monthly", "weekly", "yearly", "monthly", "yearly"]
    );
    assert_eq!(
        between("<priority>", "</priority>"),
        vec!["1.0", "0.8", "0.9", "0.7", "0.6", "0.7", "0.5", "0.4", "0.3"]
    );
    Ok(())
}

#[tokio::test]
async fn profile_resolves_social_icons() -> Result<()> {
    let app = TestApp::basic();

    let res = app.get("/api/profile").await?;

    assert_eq!(res.status, StatusCode::OK);
    let body = res.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["name"], "Alex Rivera");
    let icons: Vec<String> = body["data"]["socialLinks"]
        .as_array()
        .expect("social links")
        .iter()
        .map(|link| link["icon"].as_str().unwrap_or_default().to_string())
        .collect();
    assert_eq!(icons, vec!["github", "linkedin", "twitter", "tiktok", "mail"]);
    Ok(())
}

#[tokio::test]
async fn about_has_languages_and_paragraphs() -> Result<()> {
    let app = TestApp::basic();

    let res = app.get("/api/about").await?;

    assert_eq!(res.status, StatusCode::OK);
    let data = &res.json()["data"];
    assert!(!data["paragraphs"].as_array().expect("paragraphs").is_empty());
    assert!(data["languages"][0]["level"].as_u64().is_some());
    Ok(())
}

#[tokio::test]
async fn placeholder_is_a_png() -> Result<()> {
    let app = TestApp::basic();

    let res = app.get("/api/placeholder").await?;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.headers["content-type"], "image/png");
    assert_eq!(&res.body[..], &PLACEHOLDER_PNG[..]);
    Ok(())
}

#[tokio::test]
async fn root_describes_the_service() -> Result<()> {
    let app = TestApp::basic();

    let res = app.get("/").await?;

    assert_eq!(res.status, StatusCode::OK);
    let body = res.json();
    assert_eq!(body["data"]["name"], "Folio API");
    assert_eq!(body["data"]["version"], env!("CARGO_PKG_VERSION"));
    Ok(())
}

#[tokio::test]
async fn unknown_route_is_json_404() -> Result<()> {
    let app = TestApp::basic();

    let res = app.get("/no/such/page").await?;

    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.json()["code"], "NOT_FOUND");
    assert_eq!(res.json()["error"], "Route not found");
    Ok(())
}
