pub mod jwt;
pub mod providers;

pub use jwt::JwtService;
