pub mod analyses;
pub mod dashboard;
pub mod health;
pub mod patients;
pub mod reports;
pub mod uploads;
