use utoipa::OpenApi;

use crate::entities::sea_orm_active_enums::{
    AttendanceStatus, CompanyStatus, DeploymentStatus, PlacementStatus, RequirementStatus,
    UserRole, UserStatus,
};
use crate::routes::{
    advisors, auth, companies, health, placements, requirements, response, stats, student,
    student_requirements, students, supervisors,
};
use crate::services::requirement_tracking::Progress;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::route::health,
        auth::route::login,
        auth::route::verify_session,
        auth::route::logout,
        auth::route::register,
        students::route::list_students,
        students::route::create_student,
        students::route::update_student,
        students::route::delete_student,
        companies::route::list_companies,
        companies::route::create_company,
        companies::route::update_company,
        companies::route::delete_company,
        advisors::route::list_advisors,
        advisors::route::create_advisor,
        advisors::route::update_advisor,
        advisors::route::delete_advisor,
        supervisors::route::list_supervisors,
        supervisors::route::create_supervisor,
        supervisors::route::update_supervisor,
        supervisors::route::delete_supervisor,
        requirements::route::list_requirements,
        requirements::route::create_requirement,
        requirements::route::update_requirement,
        requirements::route::delete_requirement,
        student_requirements::route::get_student_requirements,
        student_requirements::route::update_requirement_status,
        student_requirements::route::run_requirement_action,
        student_requirements::route::reset_weekly_reports,
        placements::route::list_placements,
        placements::route::create_placement,
        placements::route::update_placement,
        placements::route::delete_placement,
        stats::route::get_dashboard_stats,
        student::route::get_profile,
        student::route::get_requirements,
        student::route::get_student_id,
        student::route::upload_requirement,
        student::route::list_attendance,
        student::route::log_attendance,
    ),
    components(schemas(
        response::MessageResponse,
        response::ErrorResponse,
        response::IdRequest,
        health::route::HealthResponse,
        auth::dto::LoginRequest,
        auth::dto::LoginUser,
        auth::dto::LoginResponse,
        auth::dto::SessionUserInfo,
        auth::dto::VerifySessionResponse,
        auth::dto::RegisterRequest,
        students::dto::StudentListItem,
        students::dto::CreateStudentRequest,
        students::dto::CreateStudentResponse,
        students::dto::UpdateStudentRequest,
        companies::dto::CompanyItem,
        companies::dto::CreateCompanyRequest,
        companies::dto::UpdateCompanyRequest,
        advisors::dto::AdvisorItem,
        advisors::dto::CreateAdvisorRequest,
        advisors::dto::UpdateAdvisorRequest,
        supervisors::dto::SupervisorItem,
        supervisors::dto::CreateSupervisorRequest,
        supervisors::dto::UpdateSupervisorRequest,
        requirements::dto::RequirementItem,
        requirements::dto::CreateRequirementRequest,
        requirements::dto::UpdateRequirementRequest,
        student_requirements::dto::StudentRequirementItem,
        student_requirements::dto::StudentRequirementsResponse,
        student_requirements::dto::UpdateRequirementStatusRequest,
        student_requirements::dto::ResetWeeklyReportsResponse,
        placements::dto::PlacementItem,
        placements::dto::PlacementRequest,
        stats::dto::DashboardStats,
        student::dto::StudentProfileItem,
        student::dto::StudentIdResponse,
        student::dto::UploadResponse,
        student::dto::AttendanceRequest,
        student::dto::AttendanceItem,
        Progress,
        UserRole,
        UserStatus,
        DeploymentStatus,
        CompanyStatus,
        RequirementStatus,
        PlacementStatus,
        AttendanceStatus,
    )),
    tags(
        (name = "Health", description = "Liveness and database reachability"),
        (name = "Authentication", description = "Session login, logout and self-registration"),
        (name = "Students", description = "Admin management of student accounts"),
        (name = "Companies", description = "Host companies"),
        (name = "Advisors", description = "OJT advisors"),
        (name = "Supervisors", description = "Company-side supervisors"),
        (name = "Requirements", description = "Requirement catalog"),
        (name = "Requirement Tracking", description = "Per-student requirement status"),
        (name = "Placements", description = "Student placements at companies"),
        (name = "Statistics", description = "Dashboard counters"),
        (name = "Student", description = "Endpoints used by logged-in students")
    ),
    info(
        title = "OJT Monitoring API",
        version = "0.1.0",
        description = "On-the-job training monitoring: accounts, placements and requirement tracking"
    )
)]
pub struct ApiDoc;
