mod client;
mod flight;
mod provider;

pub use client::RedisKv;
pub use flight::SingleFlight;
pub use provider::RedisProvider;
