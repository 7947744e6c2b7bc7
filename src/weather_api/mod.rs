pub mod client;
pub mod error;
pub mod paginator;
pub mod response;
