// Provider implementations for post search backends
pub mod dummyjson;

pub use dummyjson::DummyJsonProvider;
