pub mod accounts;
pub mod companies;
pub mod requirement_tracking;
