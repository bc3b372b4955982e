mod http;
mod traits;

pub use http::HttpService;
pub use traits::{IdeaService, ServiceError, GENERIC_FAILURE};
