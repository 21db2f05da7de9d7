//! Blockfall (workspace facade crate).
//!
//! Re-exports the member crates as `blockfall::{types, core, driver, advice}`
//! so integration tests and embedders depend on one package while the
//! implementation lives in dedicated crates under `crates/`.

pub use blockfall_advice as advice;
pub use blockfall_core as core;
pub use blockfall_driver as driver;
pub use blockfall_types as types;
