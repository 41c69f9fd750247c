pub mod binding;
pub mod catalog;
pub mod config;
pub mod core;
pub mod optimizer;
pub mod report;
pub mod snapshot;
pub mod test_util;
