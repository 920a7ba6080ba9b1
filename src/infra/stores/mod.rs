pub mod memory_store;
pub mod session_registry;
pub mod sqlite_store;
