pub mod blockchain;
pub mod node_rpc;
#[cfg(test)]
pub mod testing;

pub use blockchain::{BlockchainNode, GolosNode};
