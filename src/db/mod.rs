/// SQLite connection management for the reference store.
pub mod connection;

/// Read queries against the reference store.
pub mod queries;

pub use connection::Store;
