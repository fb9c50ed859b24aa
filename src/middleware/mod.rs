pub mod identity;
pub mod response;

pub use identity::{identity_middleware, RequestIdentity};
pub use response::{ApiResponse, ApiResult};
