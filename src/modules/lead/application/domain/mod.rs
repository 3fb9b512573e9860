pub mod entities;
pub mod filter;
