pub mod error_demos;
pub mod fallback;
pub mod products;
