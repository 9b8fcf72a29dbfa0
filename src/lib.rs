//! A walkthrough of basic Redis usage against a single connection: a hash, a
//! sorted set and a list are created, read, updated and deleted in a fixed
//! order.

pub mod client;
pub mod cmd;
pub mod config;
mod error;
pub mod session;

pub use client::Client;
pub use config::Config;
pub use error::{Error, Result};
pub use session::{Report, Session};
