//! Port definitions — traits that the surrounding layers implement.
//!
//! The store only knows it must tell *someone* about every dispatch; how
//! that reaches a renderer is decided by the implementation.

pub mod store_observer;

pub use store_observer::StoreObserver;
