pub mod auth;
pub mod lead;
