pub mod auth;
pub mod authz;
pub mod comments;
pub mod error;
pub mod posts;
