mod environment;
mod error;
mod extractors;
mod response;

pub use environment::Environment;
pub use error::{ApiErrorResponse, AppError};
pub use extractors::JsonBody;
pub use response::ApiResponse;
