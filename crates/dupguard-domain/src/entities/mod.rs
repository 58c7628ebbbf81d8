//! Domain entities
//!
//! Entities carry identity. A [`FunctionRecord`] is identified by the pair
//! `(file_path, name)` regardless of its line range or body text.

mod function_record;

pub use function_record::{FunctionIdentity, FunctionRecord};
