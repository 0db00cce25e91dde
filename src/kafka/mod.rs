pub mod connection;
pub mod consumer;
pub mod producer;


pub use connection::client_config;
pub use consumer::RelaySource;
pub use producer::RelaySink;
