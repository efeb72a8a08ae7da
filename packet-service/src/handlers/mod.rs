pub mod health;
pub mod packets;

pub use health::{health_check, readiness_check};
pub use packets::post_packet;
