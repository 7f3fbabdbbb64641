//! A minimal mesh-replicated in-memory key-value store.
//!
//! Each node owns an independent map and pushes every local mutation to a
//! statically configured set of peers over one-shot TCP connections. There
//! is no acknowledgment, no retry, no ordering across origins, and no
//! persistence; nodes receiving concurrent writes to the same key may
//! converge to different values.
//!
//! - [`protocol`]: the textual wire command and its codec.
//! - [`store`]: the synchronized local map.
//! - [`network`] / [`peer`]: one-connection-per-send outbound transport.
//! - [`replicator`]: encode-once fan-out to all peers.
//! - [`server`]: listener and per-connection apply loop.
//! - [`node`]: the client-facing put/get/delete facade.

pub mod config;
pub mod error;
pub mod network;
pub mod node;
pub mod peer;
pub mod protocol;
pub mod replicator;
pub mod server;
pub mod store;
