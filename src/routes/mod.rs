pub mod advisors;
pub mod auth;
pub mod companies;
pub mod health;
pub mod placements;
pub mod requirements;
pub mod response;
pub mod stats;
pub mod student;
pub mod student_requirements;
pub mod students;
pub mod supervisors;
