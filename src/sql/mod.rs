//! Parameterized SQLite statements: identifiers from config only, values as bound parameters.

mod builder;
pub mod params;
pub use builder::*;
pub use params::*;
