mod common;

use http::{Method, StatusCode};
use ojt_monitoring::entities::{sea_orm_active_enums::UserStatus, user};
use ojt_monitoring::repositories::UserRepository;
use sea_orm::{ActiveModelTrait, Set};
use serde_json::json;

use common::{ADMIN_EMAIL, ADMIN_PASSWORD, TestApp, find_id};

#[tokio::test]
async fn wrong_password_is_rejected_without_a_session() {
    let app = TestApp::spawn().await;

    let res = app
        .call(
            Method::POST,
            "/api/v1/auth/login",
            None,
            Some(json!({ "email": ADMIN_EMAIL, "password": "nope" })),
        )
        .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body, json!({ "success": false, "message": "Invalid credentials" }));
    assert!(res.set_cookie.is_none());

    let res = app
        .call(Method::POST, "/api/v1/auth/login", None, Some(json!({ "email": ADMIN_EMAIL })))
        .await;
    assert_eq!(res.body["message"], json!("Email and password required"));
}

#[tokio::test]
async fn deactivated_user_cannot_log_in() {
    let app = TestApp::spawn().await;
    let admin = UserRepository::new(&app.db)
        .find_by_email(ADMIN_EMAIL)
        .await
        .unwrap()
        .unwrap();

    let mut active: user::ActiveModel = admin.into();
    active.status = Set(UserStatus::Deactivated);
    active.update(&app.db).await.unwrap();

    let res = app
        .call(
            Method::POST,
            "/api/v1/auth/login",
            None,
            Some(json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD })),
        )
        .await;
    assert_eq!(res.body, json!({ "success": false, "message": "Invalid credentials" }));
    assert!(res.set_cookie.is_none());
}

#[tokio::test]
async fn session_lifecycle() {
    let app = TestApp::spawn().await;
    let cookie = app.admin_cookie.clone();

    let res = app
        .call(Method::GET, "/api/v1/auth/verify_session", Some(&cookie), None)
        .await;
    assert_eq!(res.body["logged_in"], json!(true));
    assert_eq!(res.body["user"]["role"], json!("Admin"));

    let res = app
        .call(Method::POST, "/api/v1/auth/logout", Some(&cookie), None)
        .await;
    assert_eq!(res.body["message"], json!("Logged out successfully"));

    let res = app
        .call(Method::GET, "/api/v1/auth/verify_session", Some(&cookie), None)
        .await;
    assert_eq!(res.body["logged_in"], json!(false));

    let res = app
        .call(Method::GET, "/api/v1/admin/stats", Some(&cookie), None)
        .await;
    assert_eq!(res.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn register_refuses_admin_role_and_duplicates() {
    let app = TestApp::spawn().await;

    let res = app
        .call(
            Method::POST,
            "/api/v1/auth/register",
            None,
            Some(json!({ "name": "Eve", "email": "eve@ojt.test", "password": "x", "role": "Admin" })),
        )
        .await;
    assert_eq!(res.body["message"], json!("Admin accounts cannot be self-registered"));

    let body = json!({ "name": "Ola", "email": "ola@ojt.test", "password": "pw", "role": "OJT Advisor" });
    let res = app
        .call(Method::POST, "/api/v1/auth/register", None, Some(body.clone()))
        .await;
    assert_eq!(res.body["message"], json!("User registered successfully"));
    let res = app
        .call(Method::POST, "/api/v1/auth/register", None, Some(body))
        .await;
    assert_eq!(res.body["message"], json!("Email already exists"));
}

#[tokio::test]
async fn admin_endpoints_need_an_admin_session() {
    let app = TestApp::spawn().await;
    app.create_student("Kim Sy", "kim@ojt.test", "2021-0100").await;
    let student = app.login("kim@ojt.test", "student123").await.unwrap();

    let res = app
        .call(Method::GET, "/api/v1/admin/manage_students", None, None)
        .await;
    assert_eq!(res.status, StatusCode::FORBIDDEN);
    assert_eq!(res.body["message"], json!("Not logged in"));

    let res = app
        .call(Method::GET, "/api/v1/admin/manage_students", Some(&student), None)
        .await;
    assert_eq!(res.status, StatusCode::FORBIDDEN);
    assert_eq!(res.body["message"], json!("Access denied. Admins only."));
}

#[tokio::test]
async fn unsupported_verbs_get_405() {
    let app = TestApp::spawn().await;

    let res = app
        .admin(Method::PATCH, "/api/v1/admin/manage_companies", None)
        .await;
    assert_eq!(res.status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(res.body, json!({ "success": false, "message": "Method not allowed" }));

    let res = app
        .admin(Method::DELETE, "/api/v1/admin/stats", None)
        .await;
    assert_eq!(res.status, StatusCode::METHOD_NOT_ALLOWED);

    let res = app
        .call(Method::GET, "/api/v1/student/upload_requirement", None, None)
        .await;
    assert_eq!(res.status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn deleting_a_student_removes_its_user() {
    let app = TestApp::spawn().await;
    app.create_requirement("Resume", true, None).await;
    let student_id = app.create_student("Lea Yu", "lea@ojt.test", "2021-0101").await;
    app.student_requirements(student_id).await;

    let res = app
        .admin(
            Method::DELETE,
            "/api/v1/admin/manage_students",
            Some(json!({ "id": student_id })),
        )
        .await;
    assert_eq!(res.body["message"], json!("Student deleted successfully."));

    let user = UserRepository::new(&app.db)
        .find_by_email("lea@ojt.test")
        .await
        .unwrap();
    assert!(user.is_none());
    assert!(app.login("lea@ojt.test", "student123").await.is_none());

    let res = app
        .admin(
            Method::DELETE,
            "/api/v1/admin/manage_students",
            Some(json!({ "id": student_id })),
        )
        .await;
    assert_eq!(res.body["message"], json!("Student not found."));
}

#[tokio::test]
async fn deleting_an_advisor_removes_its_user() {
    let app = TestApp::spawn().await;
    let res = app
        .admin(
            Method::POST,
            "/api/v1/admin/manage_advisors",
            Some(json!({ "name": "Max Ng", "email": "max@ojt.test", "department": "CCS" })),
        )
        .await;
    assert_eq!(res.body["success"], json!(true), "{}", res.body);
    assert!(app.login("max@ojt.test", "advisor123").await.is_some());

    let list = app
        .admin(Method::GET, "/api/v1/admin/manage_advisors", None)
        .await;
    let advisor_id = find_id(&list.body["data"], "email", "max@ojt.test", "advisor_id");

    let res = app
        .admin(
            Method::DELETE,
            &format!("/api/v1/admin/manage_advisors?id={advisor_id}"),
            None,
        )
        .await;
    assert_eq!(res.body["message"], json!("Advisor deleted successfully."));
    assert!(app.login("max@ojt.test", "advisor123").await.is_none());
}

#[tokio::test]
async fn company_deletion_detaches_students_and_respects_placements() {
    let app = TestApp::spawn().await;
    let free_company = app.create_company("Free Corp").await;
    let busy_company = app.create_company("Busy Corp").await;

    let res = app
        .admin(
            Method::POST,
            "/api/v1/admin/manage_students",
            Some(json!({
                "name": "Nia Co",
                "email": "nia@ojt.test",
                "student_no": "2021-0102",
                "company_id": free_company,
            })),
        )
        .await;
    let student_id = res.body["student_id"].as_i64().unwrap() as i32;

    let res = app
        .admin(
            Method::POST,
            "/api/v1/admin/manage_placements",
            Some(json!({
                "student_id": student_id,
                "company_id": busy_company,
                "start_date": "2025-06-01",
                "end_date": "2025-08-31",
            })),
        )
        .await;
    assert_eq!(res.body["message"], json!("Placement added successfully."));

    let res = app
        .admin(
            Method::DELETE,
            "/api/v1/admin/manage_companies",
            Some(json!({ "id": free_company })),
        )
        .await;
    assert_eq!(res.body["success"], json!(true), "{}", res.body);

    let list = app
        .admin(Method::GET, "/api/v1/admin/manage_students", None)
        .await;
    let student = &list.body["data"][0];
    assert_eq!(student["student_id"], json!(student_id));
    assert!(student["company_id"].is_null());

    let res = app
        .admin(
            Method::DELETE,
            "/api/v1/admin/manage_companies",
            Some(json!({ "id": busy_company })),
        )
        .await;
    assert_eq!(res.body["success"], json!(false));
    assert_eq!(
        res.body["message"],
        json!("Cannot delete company: 1 placement(s) still reference it.")
    );

    let placements = app
        .admin(Method::GET, "/api/v1/admin/manage_placements", None)
        .await;
    let placement = &placements.body["data"][0];
    assert_eq!(placement["student_name"], json!("Nia Co"));
    assert_eq!(placement["company_name"], json!("Busy Corp"));
    assert_eq!(placement["status"], json!("Pending"));
    assert!(placement["advisor_name"].is_null());
}

#[tokio::test]
async fn duplicate_student_numbers_and_emails_are_refused() {
    let app = TestApp::spawn().await;
    app.create_student("Oto Li", "oto@ojt.test", "2021-0103").await;

    let res = app
        .admin(
            Method::POST,
            "/api/v1/admin/manage_students",
            Some(json!({ "name": "Other", "email": "oto@ojt.test", "student_no": "2021-0999" })),
        )
        .await;
    assert_eq!(res.body["message"], json!("Email already exists."));

    let res = app
        .admin(
            Method::POST,
            "/api/v1/admin/manage_students",
            Some(json!({ "name": "Other", "email": "other@ojt.test", "student_no": "2021-0103" })),
        )
        .await;
    assert_eq!(res.body["message"], json!("Student number already exists."));
    assert!(app.login("other@ojt.test", "student123").await.is_none());
}

#[tokio::test]
async fn requirement_catalog_crud() {
    let app = TestApp::spawn().await;

    let res = app
        .admin(Method::POST, "/api/v1/admin/requirements_crud", Some(json!({ "name": " " })))
        .await;
    assert_eq!(res.body["message"], json!("Requirement name is required."));

    let res = app
        .admin(
            Method::POST,
            "/api/v1/admin/requirements_crud",
            Some(json!({ "name": "Medical", "is_required": "1" })),
        )
        .await;
    assert_eq!(res.body["message"], json!("Requirement added successfully."));

    let list = app
        .admin(Method::GET, "/api/v1/admin/requirements_crud", None)
        .await;
    let id = find_id(&list.body["data"], "name", "Medical", "id");
    assert_eq!(list.body["data"][0]["is_required"], json!(true));

    let res = app
        .admin(Method::PUT, "/api/v1/admin/requirements_crud", Some(json!({ "id": id })))
        .await;
    assert_eq!(res.body["message"], json!("ID and Name are required."));

    let res = app
        .admin(
            Method::PUT,
            "/api/v1/admin/requirements_crud",
            Some(json!({ "id": id, "name": "Medical Certificate", "is_required": 0 })),
        )
        .await;
    assert_eq!(res.body["message"], json!("Requirement updated successfully."));

    let res = app
        .admin(Method::DELETE, "/api/v1/admin/requirements_crud", None)
        .await;
    assert_eq!(res.body["message"], json!("Requirement ID missing."));

    let res = app
        .admin(
            Method::DELETE,
            &format!("/api/v1/admin/requirements_crud?id={id}"),
            None,
        )
        .await;
    assert_eq!(res.body["message"], json!("Requirement deleted successfully."));

    let list = app
        .admin(Method::GET, "/api/v1/admin/requirements_crud", None)
        .await;
    assert_eq!(list.body["data"], json!([]));
}

#[tokio::test]
async fn student_self_service() {
    let app = TestApp::spawn().await;
    let student_id = app.create_student("Pia Ko", "pia@ojt.test", "2021-0104").await;
    let cookie = app.login("pia@ojt.test", "student123").await.unwrap();

    let session = app
        .call(Method::GET, "/api/v1/auth/verify_session", Some(&cookie), None)
        .await;
    let user_id = session.body["user"]["id"].as_i64().unwrap();

    let res = app
        .call(
            Method::GET,
            &format!("/api/v1/student/get_student_id?user_id={user_id}"),
            Some(&cookie),
            None,
        )
        .await;
    assert_eq!(res.body, json!({ "success": true, "student_id": student_id }));

    let res = app
        .call(
            Method::GET,
            &format!("/api/v1/student/get_profile?id={student_id}"),
            Some(&cookie),
            None,
        )
        .await;
    assert_eq!(res.body["data"]["student_no"], json!("2021-0104"));
    assert_eq!(res.body["data"]["deployment_status"], json!("Not Deployed"));

    let attendance = json!({ "student_id": student_id });
    let res = app
        .call(Method::POST, "/api/v1/student/attendance", Some(&cookie), Some(attendance.clone()))
        .await;
    assert_eq!(res.body["message"], json!("Attendance recorded"));
    let res = app
        .call(Method::POST, "/api/v1/student/attendance", Some(&cookie), Some(attendance))
        .await;
    assert_eq!(res.body["message"], json!("Already logged today"));

    let res = app
        .call(
            Method::GET,
            &format!("/api/v1/student/attendance?student_id={student_id}"),
            Some(&cookie),
            None,
        )
        .await;
    assert_eq!(res.body["data"].as_array().unwrap().len(), 1);
    assert_eq!(res.body["data"][0]["status"], json!("pending"));
}

#[tokio::test]
async fn stats_and_health() {
    let app = TestApp::spawn().await;
    app.create_company("Stat Corp").await;
    app.create_student("Quin Ho", "quin@ojt.test", "2021-0105").await;

    let res = app.admin(Method::GET, "/api/v1/admin/stats", None).await;
    assert_eq!(res.body["data"]["students"], json!(1));
    assert_eq!(res.body["data"]["companies"], json!(1));
    assert_eq!(res.body["data"]["deployed_students"], json!(0));
    assert_eq!(res.body["data"]["pending_reviews"], json!(0));

    let res = app.call(Method::GET, "/health", None, None).await;
    assert_eq!(res.body["database"], json!("up"));

    let res = app.call(Method::GET, "/api/v1/nowhere", None, None).await;
    assert_eq!(res.body["message"], json!("Endpoint not found."));
}
