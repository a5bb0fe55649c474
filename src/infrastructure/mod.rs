pub mod observability;
pub mod persistence;
pub mod renderer;
pub mod storage;
