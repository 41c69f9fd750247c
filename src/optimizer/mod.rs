pub mod cost_aware;
pub mod interface;
pub mod optimizer;
pub mod registry;
pub mod tightest_fit;
