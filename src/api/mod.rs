pub mod calendar;
pub mod client;

pub use client::BridgeClient;
