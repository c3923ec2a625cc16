//! Domain models for the Farm Dashboard Platform
//!
//! All models serialize in the UI-facing shape: camelCase fields with the
//! storage-assigned identity exposed as `Id`.

mod crop;
mod farm;
mod task;
mod transaction;
mod weather;

pub use crop::*;
pub use farm::*;
pub use task::*;
pub use transaction::*;
pub use weather::*;
