pub mod auth;
pub mod authors;
pub mod comments;
pub mod health;
pub mod posts;
