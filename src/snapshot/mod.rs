pub mod cluster;
pub mod quantity;
