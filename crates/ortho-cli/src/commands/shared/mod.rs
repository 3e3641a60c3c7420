pub mod condition;
pub mod limit;
