// handlers/mod.rs - route handlers grouped by surface
//
// crm      - proxy routes for the CRM dashboard (/contacts, /leads)
// auth     - TikTok OAuth and sign-out (/auth/*)
// site     - static public endpoints (sitemap, profile, placeholder image)
// dashboard - session-protected landing endpoint

pub mod auth;
pub mod crm;
pub mod dashboard;
pub mod site;
