pub mod attendance_repository;
pub mod company_advisor_repository;
pub mod company_repository;
pub mod ojt_advisor_repository;
pub mod placement_repository;
pub mod requirement_repository;
pub mod student_repository;
pub mod student_requirement_repository;
pub mod user_repository;

pub use attendance_repository::AttendanceRepository;
pub use company_advisor_repository::CompanyAdvisorRepository;
pub use company_repository::{CompanyRepository, CompanyUpdate, NewCompany};
pub use ojt_advisor_repository::OjtAdvisorRepository;
pub use placement_repository::{PlacementFields, PlacementRepository};
pub use requirement_repository::{NewRequirement, RequirementRepository, RequirementUpdate};
pub use student_repository::{NewStudent, StudentRepository, StudentUpdate};
pub use student_requirement_repository::{StatusChange, StudentRequirementRepository};
pub use user_repository::{NewUser, UserRepository};
