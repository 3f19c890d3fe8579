pub mod processing;
pub mod result;
