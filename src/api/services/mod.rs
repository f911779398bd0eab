pub mod convert;
pub mod error_code;
pub mod form;
pub mod health;
pub mod helpers;

pub use convert::{ConvertHandler, UploadLimits, convert_routes};
pub use error_code::ErrorCode;
pub use form::{FormService, form_routes};
pub use health::{AppStartTime, HealthResponse, HealthService, health_routes};
pub use helpers::ApiResponse;
