//! Resource handles: one per broker entity.
//!
//! Each handle borrows a `ManagementClient` and maps domain operations to a
//! path, a verb and an optional typed body. Parameters are validated and
//! every user-supplied segment is percent-encoded before the path is built.

mod binding;
mod channel;
mod cluster;
mod connection;
mod consumer;
mod definition;
mod exchange;
mod node;
mod queue;
mod vhost;

pub use binding::Bindings;
pub use channel::Channels;
pub use cluster::Cluster;
pub use connection::Connections;
pub use consumer::Consumers;
pub use definition::Definitions;
pub use exchange::Exchanges;
pub use node::Nodes;
pub use queue::Queues;
pub use vhost::Vhosts;
