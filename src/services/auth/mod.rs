pub mod claims;
pub mod jwt;
pub mod password;
pub mod token_service;
