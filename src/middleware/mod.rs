pub mod payload;
pub mod response;

pub use payload::JsonPayload;
pub use response::{ApiResponse, ApiResult};
