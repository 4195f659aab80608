//! Resource Materializer and the collaborators it persists through.
//!
//! Storage and record keeping are external services; this module only
//! defines their contracts plus local and in-memory implementations.

mod materializer;
mod records;
mod storage;
mod token;

pub use materializer::{ExtraSource, MaterializeOptions, ResourceMaterializer};
pub use records::{JsonResourceStore, MemoryResourceStore, ResourceStore};
pub use storage::{LocalStorage, MemoryStorage, ObjectStorage};
pub use token::PathTokens;
