//! Domain ports
//!
//! Interfaces implemented outside the domain. Language parsers implement
//! [`FunctionSource`] so the engine never depends on a grammar directly.

mod function_source;

pub use function_source::FunctionSource;
