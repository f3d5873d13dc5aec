//! Store adapter for the board's posts.
//!
//! [`store::PostStore`] is the seam the HTTP layer talks to. [`client::DbClient`] backs
//! it with a MongoDB collection, [`memory::MemoryStore`] keeps everything in process.

pub mod client;
pub mod id;
pub mod memory;
mod record;
pub mod store;
