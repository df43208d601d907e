pub mod env;
pub mod secret;
pub mod telemetry;

pub use reqwest_middleware::ClientWithMiddleware;
