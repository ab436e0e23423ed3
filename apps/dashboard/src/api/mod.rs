// API module for climate_dashboard
// Single gateway for every backend call

pub mod client;
pub mod error;
pub mod transport;

pub use client::{ApiClient, RequestOptions, API_FAILURE_MESSAGE};
pub use error::ApiError;
pub use transport::{ApiRequest, ApiResponse, Method, ReqwestTransport, Transport};
