// handlers/auth/mod.rs - OAuth and session endpoints
//
// Failures here redirect to the static error page instead of answering with
// JSON, except for a missing TikTok client id which is a server misconfiguration.

pub mod signout; // POST /auth/signout
pub mod tiktok; // GET /auth/tiktok, GET /auth/tiktok/callback

pub use signout::signout;
pub use tiktok::{authorize as tiktok_authorize, callback as tiktok_callback};
