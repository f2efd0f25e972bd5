//! Request middleware

pub mod api_token;

pub use api_token::{api_token_middleware, API_TOKEN_HEADER};
