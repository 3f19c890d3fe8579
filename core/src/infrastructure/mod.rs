pub mod meal;
pub mod media;
pub mod prediction;
