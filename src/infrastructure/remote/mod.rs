//! Remote function-hosting clients.

mod http;

pub use http::HttpFunctionClient;
