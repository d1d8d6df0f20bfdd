pub mod cli;
pub mod config;
pub mod crm;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod oauth;
pub mod personal;
pub mod routes;
pub mod session;
pub mod sitemap;
pub mod state;

pub use routes::app;
pub use state::AppState;
