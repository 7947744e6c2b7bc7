pub mod artifact;
pub mod error;
pub mod object_store;
