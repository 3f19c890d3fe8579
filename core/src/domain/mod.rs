pub mod analysis;
pub mod capture;
pub mod common;
pub mod meal;
pub mod session;
