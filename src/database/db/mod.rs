pub mod connection;
pub mod migrate;
pub mod storage;

pub use storage::LocalStorage;
