pub mod attendance;
pub mod company;
pub mod company_advisor;
pub mod ojt_advisor;
pub mod placement;
pub mod requirement;
pub mod sea_orm_active_enums;
pub mod student;
pub mod student_requirement;
pub mod user;
