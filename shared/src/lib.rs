pub mod config;
pub mod redis;

pub use config::Config;
pub use crate::redis::{get_redis_client, Redis};
