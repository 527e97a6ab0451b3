pub mod http_client;

pub use http_client::{FetchedPage, HttpClient, DEFAULT_USER_AGENT};
