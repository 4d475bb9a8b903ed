//! Infrastructure layer - store connection lifecycle.

mod connection;
mod mongo;

pub use connection::{ConnectionManager, ConnectionState, Connector, StoreLifecycle};
pub use mongo::{Collections, MongoConnector};
