// handlers/site - public, static endpoints (no collaborators involved)

pub mod placeholder;
pub mod profile;
pub mod sitemap;

pub use placeholder::placeholder_png;
pub use profile::{about_get, profile_get};
pub use sitemap::sitemap_xml;
