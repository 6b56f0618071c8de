pub mod cmd;
pub mod config;
pub mod error;
pub mod plt;
pub mod runner;
pub mod toolchain;
