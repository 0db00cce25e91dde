pub mod checkpoint;
pub mod config;
pub mod error;
pub mod record;
pub mod relay;
pub mod transform;

pub mod kafka;

pub use config::Config;
pub use error::{Error, Result};
pub use record::{Outcome, Record};
pub use relay::Relay;
pub use transform::{JsonPassthrough, Transform};
