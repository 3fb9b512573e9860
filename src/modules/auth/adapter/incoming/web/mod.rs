pub mod cookies;
pub mod extractors;
pub mod routes;
