pub mod response;
pub mod session;

pub use response::{found, ApiResponse};
pub use session::{session_middleware, AUTH_ERROR_PATH};
