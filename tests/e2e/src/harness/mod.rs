//! Test harness

mod store_manager;

pub use store_manager::{TestSession, TestStoreManager};
