//! CLI command implementations

pub(crate) mod common;
pub(crate) mod make;
pub(crate) mod run;
