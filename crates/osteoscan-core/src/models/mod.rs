pub mod analysis;
pub mod patient;
