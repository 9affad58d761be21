// Shared modules
pub(crate) mod cli;
mod metadata;
pub(crate) mod run;
