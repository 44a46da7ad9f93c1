mod common;

use http::{Method, StatusCode};
use ojt_monitoring::repositories::StudentRequirementRepository;
use ojt_monitoring::entities::student_requirement;
use sea_orm::{ConnectionTrait, EntityTrait, PaginatorTrait};
use serde_json::{Value, json};

use common::{TestApp, row_for};

fn percent(body: &Value) -> u64 {
    body["progress"]["percent"].as_u64().unwrap()
}

#[tokio::test]
async fn upload_complete_reject_scenario() {
    let app = TestApp::spawn().await;
    let report = app.create_requirement("Report", true, None).await;
    let id_card = app.create_requirement("ID", true, None).await;
    let _photo = app.create_requirement("Photo", false, None).await;

    let student_id = app.create_student("Ana Reyes", "ana@ojt.test", "2021-0001").await;
    let student = app.login("ana@ojt.test", "student123").await.unwrap();

    let body = app.student_requirements(student_id).await;
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 3);
    assert!(data.iter().all(|row| row["status"] == json!("Pending")));
    assert!(data.iter().all(|row| row["submission_id"].is_i64()));
    assert_eq!(percent(&body), 0);

    let res = app.upload(&student, student_id, report, "week 1 report.pdf", b"%PDF-1.4").await;
    assert_eq!(res.body["success"], json!(true), "{}", res.body);
    assert_eq!(res.body["message"], json!("File uploaded successfully."));
    let file_path = res.body["file_path"].as_str().unwrap().to_string();
    assert_eq!(file_path, "uploads/student_requirements/week_1_report.pdf");
    assert!(app.stored_file(&file_path).exists());

    let body = app.student_requirements(student_id).await;
    assert_eq!(row_for(&body["data"], report)["status"], json!("Submitted"));
    assert_eq!(percent(&body), 33);

    let res = app.set_status(student_id, id_card, None, "Completed").await;
    assert_eq!(res.body["success"], json!(true), "{}", res.body);
    let body = app.student_requirements(student_id).await;
    let id_row = row_for(&body["data"], id_card);
    assert_eq!(id_row["status"], json!("Completed"));
    assert!(id_row["verified_at"].is_string());
    assert!(id_row["verified_by"].is_i64());
    assert_eq!(percent(&body), 67);

    let submission_id = row_for(&body["data"], report)["submission_id"].as_i64();
    let res = app.set_status(student_id, report, submission_id, "Rejected").await;
    assert_eq!(res.body["success"], json!(true), "{}", res.body);
    assert!(!app.stored_file(&file_path).exists());

    let body = app.student_requirements(student_id).await;
    let report_row = row_for(&body["data"], report);
    assert_eq!(report_row["status"], json!("Pending"));
    assert!(report_row["file_path"].is_null());
    assert_ne!(report_row["submission_id"].as_i64(), submission_id);
    assert_eq!(percent(&body), 33);
    assert_eq!(body["progress"]["mandatory_total"], json!(2));
    assert_eq!(body["progress"]["mandatory_satisfied"], json!(1));
}

#[tokio::test]
async fn materialization_is_idempotent() {
    let app = TestApp::spawn().await;
    app.create_requirement("Resume", true, None).await;
    app.create_requirement("Waiver", true, None).await;
    let student_id = app.create_student("Ben Cruz", "ben@ojt.test", "2021-0002").await;

    let first = app.student_requirements(student_id).await;
    let second = app.student_requirements(student_id).await;
    assert_eq!(first["data"], second["data"]);

    let rows = StudentRequirementRepository::new(&app.db)
        .find_by_student(student_id)
        .await
        .unwrap();
    assert_eq!(rows.len(), 2);
    let mut pairs: Vec<_> = rows.iter().map(|r| (r.student_id, r.requirement_id)).collect();
    pairs.dedup();
    assert_eq!(pairs.len(), 2);
}

#[tokio::test]
async fn rows_come_back_in_catalog_order() {
    let app = TestApp::spawn().await;
    let first = app.create_requirement("Endorsement", true, None).await;
    let second = app.create_requirement("MOA", true, None).await;
    let third = app.create_requirement("Evaluation", false, None).await;
    let student_id = app.create_student("Cara Lim", "cara@ojt.test", "2021-0003").await;

    // Tracking rows created out of catalog order.
    app.set_status(student_id, third, None, "Submitted").await;
    app.set_status(student_id, first, None, "Submitted").await;

    let body = app.student_requirements(student_id).await;
    let ids: Vec<i64> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|row| row["requirement_id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![first as i64, second as i64, third as i64]);
}

#[tokio::test]
async fn advancing_statuses_never_lowers_progress() {
    let app = TestApp::spawn().await;
    let ids = [
        app.create_requirement("A", true, None).await,
        app.create_requirement("B", false, None).await,
        app.create_requirement("C", true, None).await,
        app.create_requirement("D", false, None).await,
    ];
    let student_id = app.create_student("Dan Go", "dan@ojt.test", "2021-0004").await;

    let mut last = percent(&app.student_requirements(student_id).await);
    for requirement_id in ids {
        app.set_status(student_id, requirement_id, None, "Submitted").await;
        let now = percent(&app.student_requirements(student_id).await);
        assert!(now >= last, "progress dropped from {last} to {now}");
        last = now;
    }
    assert_eq!(last, 100);
}

#[tokio::test]
async fn pending_keeps_the_file_and_clears_submission_time() {
    let app = TestApp::spawn().await;
    let requirement_id = app.create_requirement("Clearance", true, None).await;
    let student_id = app.create_student("Eli Tan", "eli@ojt.test", "2021-0005").await;
    let student = app.login("eli@ojt.test", "student123").await.unwrap();

    let res = app.upload(&student, student_id, requirement_id, "clearance.png", b"png").await;
    let file_path = res.body["file_path"].as_str().unwrap().to_string();

    app.set_status(student_id, requirement_id, None, "pending").await;
    let body = app.student_requirements(student_id).await;
    let row = row_for(&body["data"], requirement_id);
    assert_eq!(row["status"], json!("Pending"));
    assert!(row["submitted_at"].is_null());
    assert_eq!(row["file_path"], json!(file_path));
    assert!(app.stored_file(&file_path).exists());
}

#[tokio::test]
async fn reupload_leaves_previous_file_on_disk() {
    let app = TestApp::spawn().await;
    let requirement_id = app.create_requirement("Journal", true, None).await;
    let student_id = app.create_student("Fe Uy", "fe@ojt.test", "2021-0006").await;
    let student = app.login("fe@ojt.test", "student123").await.unwrap();

    let first = app.upload(&student, student_id, requirement_id, "journal.pdf", b"v1").await;
    let second = app.upload(&student, student_id, requirement_id, "journal.pdf", b"v2").await;
    let first_path = first.body["file_path"].as_str().unwrap().to_string();
    let second_path = second.body["file_path"].as_str().unwrap().to_string();

    assert_ne!(first_path, second_path);
    assert!(second_path.starts_with("uploads/student_requirements/journal_"));
    assert!(second_path.ends_with(".pdf"));
    assert!(app.stored_file(&first_path).exists());
    assert_eq!(std::fs::read(app.stored_file(&second_path)).unwrap(), b"v2");

    let body = app.student_requirements(student_id).await;
    assert_eq!(row_for(&body["data"], requirement_id)["file_path"], json!(second_path));
}

#[tokio::test]
async fn weekly_reset_is_repeatable() {
    let app = TestApp::spawn().await;
    let weekly = app
        .create_requirement("Weekly Report", true, Some(common::WEEKLY_SLUG))
        .await;
    let other = app.create_requirement("Resume", true, None).await;
    let student_id = app.create_student("Gil Sy", "gil@ojt.test", "2021-0007").await;

    app.set_status(student_id, weekly, None, "Submitted").await;
    app.set_status(student_id, other, None, "Submitted").await;

    for _ in 0..2 {
        let res = app
            .admin(
                Method::POST,
                "/api/v1/admin/manage_requirements?action=reset_weekly_report",
                None,
            )
            .await;
        assert_eq!(res.body["success"], json!(true), "{}", res.body);

        let body = app.student_requirements(student_id).await;
        let weekly_row = row_for(&body["data"], weekly);
        assert_eq!(weekly_row["status"], json!("Pending"));
        assert!(weekly_row["submitted_at"].is_null());
        assert_eq!(row_for(&body["data"], other)["status"], json!("Submitted"));
    }

    app.set_status(student_id, weekly, None, "Submitted").await;
    let res = app
        .admin(Method::POST, "/api/v1/admin/reset_weekly_reports", None)
        .await;
    assert_eq!(res.body["message"], json!("Weekly reports reset successfully."));
    assert_eq!(res.body["affected"], json!(1));
}

#[tokio::test]
async fn status_update_validation() {
    let app = TestApp::spawn().await;
    let requirement_id = app.create_requirement("Photo", false, None).await;
    let student_id = app.create_student("Hal Ong", "hal@ojt.test", "2021-0008").await;

    let res = app.set_status(student_id, requirement_id, None, "Approved").await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["message"], json!("Invalid status."));

    let res = app.set_status(student_id, requirement_id, None, "Rejected").await;
    assert_eq!(res.body["success"], json!(false));
    assert_eq!(res.body["message"], json!("Submission not found"));

    let res = app.set_status(9999, requirement_id, None, "Submitted").await;
    assert_eq!(res.body["message"], json!("Invalid student_id"));

    let res = app
        .admin(
            Method::PUT,
            "/api/v1/admin/manage_requirements",
            Some(json!({ "student_id": student_id })),
        )
        .await;
    assert_eq!(
        res.body["message"],
        json!("Missing fields (student_id, requirement_id, status)")
    );

    let res = app
        .admin(Method::POST, "/api/v1/admin/manage_requirements?action=purge", None)
        .await;
    assert_eq!(res.body["message"], json!("Invalid action."));
}

#[tokio::test]
async fn students_only_see_their_own_requirements() {
    let app = TestApp::spawn().await;
    let requirement_id = app.create_requirement("Resume", true, None).await;
    let owner = app.create_student("Ivy Chua", "ivy@ojt.test", "2021-0009").await;
    let other = app.create_student("Jun Dy", "jun@ojt.test", "2021-0010").await;
    let cookie = app.login("ivy@ojt.test", "student123").await.unwrap();

    let res = app
        .call(
            Method::GET,
            &format!("/api/v1/student/get_requirements?student_id={owner}"),
            Some(&cookie),
            None,
        )
        .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["data"].as_array().unwrap().len(), 1);

    let res = app
        .call(
            Method::GET,
            &format!("/api/v1/student/get_requirements?student_id={other}"),
            Some(&cookie),
            None,
        )
        .await;
    assert_eq!(res.status, StatusCode::FORBIDDEN);

    let res = app.upload(&cookie, other, requirement_id, "cv.pdf", b"cv").await;
    assert_eq!(res.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn upload_rejects_unknown_student() {
    let app = TestApp::spawn().await;
    let requirement_id = app.create_requirement("Resume", true, None).await;

    let res = app
        .upload(&app.admin_cookie, 4242, requirement_id, "cv.pdf", b"cv")
        .await;
    assert_eq!(res.body["success"], json!(false));
    assert_eq!(res.body["message"], json!("Invalid student_id."));
    assert!(!app
        .storage_root()
        .join("uploads/student_requirements/cv.pdf")
        .exists());
}

#[tokio::test]
async fn upload_rejects_unknown_requirement() {
    let app = TestApp::spawn().await;
    let student_id = app.create_student("Ana Reyes", "ana@ojt.test", "2021-0001").await;

    let res = app
        .upload(&app.admin_cookie, student_id, 4242, "cv.pdf", b"cv")
        .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["success"], json!(false));
    assert_eq!(res.body["message"], json!("Invalid requirement_id."));
    assert!(!app
        .storage_root()
        .join("uploads/student_requirements/cv.pdf")
        .exists());
}

#[tokio::test]
async fn storage_failure_leaves_the_database_alone() {
    let app = TestApp::spawn().await;
    let requirement_id = app.create_requirement("Resume", true, None).await;
    let student_id = app.create_student("Ana Reyes", "ana@ojt.test", "2021-0001").await;

    // A plain file where the upload directory should be.
    let uploads = app.storage_root().join("uploads");
    std::fs::create_dir_all(&uploads).unwrap();
    std::fs::write(uploads.join("student_requirements"), b"not a directory").unwrap();

    let res = app
        .upload(&app.admin_cookie, student_id, requirement_id, "cv.pdf", b"cv")
        .await;
    assert_eq!(res.body["success"], json!(false));
    assert_eq!(res.body["message"], json!("Failed to upload file."));

    let rows = student_requirement::Entity::find()
        .count(&app.db)
        .await
        .unwrap();
    assert_eq!(rows, 0);
}

#[tokio::test]
async fn failed_database_write_removes_the_stored_file() {
    let app = TestApp::spawn().await;
    let requirement_id = app.create_requirement("Resume", true, None).await;
    let student_id = app.create_student("Ana Reyes", "ana@ojt.test", "2021-0001").await;

    app.db
        .execute_unprepared("DROP TABLE student_requirements")
        .await
        .unwrap();

    let res = app
        .upload(&app.admin_cookie, student_id, requirement_id, "cv.pdf", b"cv")
        .await;
    assert_eq!(res.body["success"], json!(false));

    let upload_dir = app.storage_root().join("uploads/student_requirements");
    let leftovers = std::fs::read_dir(&upload_dir)
        .map(|entries| entries.count())
        .unwrap_or(0);
    assert_eq!(leftovers, 0, "stored file was not cleaned up");
}
