pub mod auth;
pub mod extract;
pub mod response;

pub use auth::require_user;
pub use crate::auth::AuthUser;
pub use extract::{JsonBody, PathParam, QueryParams};
pub use response::{ApiResponse, ApiResult};
