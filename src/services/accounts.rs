//! Operations that touch a `users` row together with the role record that
//! hangs off it. Each one runs inside a single transaction.

use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::config::{DEFAULT_ADVISOR_PASSWORD, DEFAULT_STUDENT_PASSWORD, DEFAULT_SUPERVISOR_PASSWORD};
use crate::entities::sea_orm_active_enums::{DeploymentStatus, UserRole};
use crate::entities::{company_advisor, ojt_advisor, student, user};
use crate::error::{ApiError, ApiResult};
use crate::repositories::{
    CompanyAdvisorRepository, CompanyRepository, NewStudent, NewUser, OjtAdvisorRepository,
    StudentRepository, StudentUpdate, UserRepository,
};

pub struct AccountInput {
    pub name: String,
    pub email: String,
    /// Falls back to the role's default password when absent.
    pub password: Option<String>,
}

pub struct StudentProfile {
    pub student_no: String,
    pub course: String,
    pub year_level: String,
    pub section: String,
    pub contact_no: String,
    pub address: String,
    pub company_id: Option<i32>,
    pub deployment_status: DeploymentStatus,
}

pub fn hash_password(password: &str, cost: u32) -> ApiResult<String> {
    bcrypt::hash(password, cost)
        .map_err(|e| ApiError::Internal(anyhow::anyhow!("Failed to hash password: {}", e)))
}

/// Returns the user and, for students, their student id.
pub async fn authenticate(
    db: &DatabaseConnection,
    email: &str,
    password: &str,
) -> ApiResult<(user::Model, Option<i32>)> {
    let invalid = || ApiError::validation("Invalid credentials");

    let user = UserRepository::new(db)
        .find_active_by_email(email)
        .await?
        .ok_or_else(invalid)?;

    // A malformed stored hash is treated like a wrong password.
    let password_valid = bcrypt::verify(password, &user.password).unwrap_or_else(|e| {
        tracing::warn!("stored password hash for user {} is unreadable: {}", user.id, e);
        false
    });
    if !password_valid {
        return Err(invalid());
    }

    let student_id = if user.role == UserRole::Student {
        StudentRepository::new(db)
            .find_by_user_id(user.id)
            .await?
            .map(|s| s.id)
    } else {
        None
    };

    Ok((user, student_id))
}

pub async fn register_user(
    db: &DatabaseConnection,
    hash_cost: u32,
    account: AccountInput,
    role: UserRole,
) -> ApiResult<user::Model> {
    let user_repo = UserRepository::new(db);
    if user_repo.email_exists(&account.email).await? {
        return Err(ApiError::validation("Email already exists"));
    }

    let password = account.password.unwrap_or_default();
    let user = user_repo
        .create(NewUser {
            name: account.name,
            email: account.email,
            password_hash: hash_password(&password, hash_cost)?,
            role,
        })
        .await?;
    tracing::info!("registered user {} as {}", user.id, role.as_str());
    Ok(user)
}

pub async fn create_student(
    db: &DatabaseConnection,
    hash_cost: u32,
    account: AccountInput,
    profile: StudentProfile,
) -> ApiResult<student::Model> {
    let txn = db.begin().await?;

    if UserRepository::new(&txn).email_exists(&account.email).await? {
        return Err(ApiError::validation("Email already exists."));
    }
    let student_repo = StudentRepository::new(&txn);
    if student_repo.student_no_exists(&profile.student_no).await? {
        return Err(ApiError::validation("Student number already exists."));
    }
    if let Some(company_id) = profile.company_id {
        if !CompanyRepository::new(&txn).exists(company_id).await? {
            return Err(ApiError::validation("Invalid company ID."));
        }
    }

    let password = account
        .password
        .unwrap_or_else(|| DEFAULT_STUDENT_PASSWORD.to_string());
    let user = UserRepository::new(&txn)
        .create(NewUser {
            name: account.name,
            email: account.email,
            password_hash: hash_password(&password, hash_cost)?,
            role: UserRole::Student,
        })
        .await?;

    let student = student_repo
        .create(NewStudent {
            user_id: user.id,
            student_no: profile.student_no,
            course: profile.course,
            year_level: profile.year_level,
            section: profile.section,
            contact_no: profile.contact_no,
            address: profile.address,
            company_id: profile.company_id,
            deployment_status: profile.deployment_status,
        })
        .await?;

    txn.commit().await?;
    tracing::info!("created student {} (user {})", student.id, user.id);
    Ok(student)
}

/// Partial update of a student and its user. Blank name/email keep the stored value.
pub async fn update_student(
    db: &DatabaseConnection,
    student_id: i32,
    name: Option<String>,
    email: Option<String>,
    updates: StudentUpdate,
) -> ApiResult<student::Model> {
    let txn = db.begin().await?;

    let student_repo = StudentRepository::new(&txn);
    let existing = student_repo
        .find_by_id(student_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Student not found."))?;

    if let Some(Some(company_id)) = updates.company_id {
        if !CompanyRepository::new(&txn).exists(company_id).await? {
            return Err(ApiError::validation("Invalid company ID."));
        }
    }

    let name = name.filter(|n| !n.trim().is_empty());
    let email = email.filter(|e| !e.trim().is_empty());
    let user_repo = UserRepository::new(&txn);
    if let Some(email) = &email {
        if user_repo.email_taken_by_other(email, existing.user_id).await? {
            return Err(ApiError::validation("Email already exists."));
        }
    }

    let user_id = existing.user_id;
    let student = student_repo.update(existing, updates).await?;
    user_repo.update_identity(user_id, name, email).await?;

    txn.commit().await?;
    tracing::info!("updated student {}", student.id);
    Ok(student)
}

/// Deletes the student and its user; tracking, placement and attendance rows cascade.
pub async fn delete_student(db: &DatabaseConnection, student_id: i32) -> ApiResult<()> {
    let txn = db.begin().await?;

    let student_repo = StudentRepository::new(&txn);
    let student = student_repo
        .find_by_id(student_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Student not found."))?;

    student_repo.delete(student.id).await?;
    UserRepository::new(&txn).delete(student.user_id).await?;

    txn.commit().await?;
    tracing::info!("deleted student {} and user {}", student.id, student.user_id);
    Ok(())
}

pub async fn create_advisor(
    db: &DatabaseConnection,
    hash_cost: u32,
    account: AccountInput,
    department: Option<String>,
) -> ApiResult<ojt_advisor::Model> {
    let txn = db.begin().await?;

    let user_repo = UserRepository::new(&txn);
    if user_repo.email_exists(&account.email).await? {
        return Err(ApiError::validation("Email already exists."));
    }

    let password = account
        .password
        .unwrap_or_else(|| DEFAULT_ADVISOR_PASSWORD.to_string());
    let user = user_repo
        .create(NewUser {
            name: account.name,
            email: account.email,
            password_hash: hash_password(&password, hash_cost)?,
            role: UserRole::OjtAdvisor,
        })
        .await?;
    let advisor = OjtAdvisorRepository::new(&txn)
        .create(user.id, department)
        .await?;

    txn.commit().await?;
    tracing::info!("created advisor {} (user {})", advisor.id, user.id);
    Ok(advisor)
}

pub async fn update_advisor(
    db: &DatabaseConnection,
    advisor_id: i32,
    department: Option<Option<String>>,
    name: Option<String>,
    email: Option<String>,
) -> ApiResult<()> {
    let txn = db.begin().await?;

    let advisor_repo = OjtAdvisorRepository::new(&txn);
    let advisor = advisor_repo
        .find_by_id(advisor_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Advisor not found."))?;

    let name = name.filter(|n| !n.trim().is_empty());
    let email = email.filter(|e| !e.trim().is_empty());
    let user_repo = UserRepository::new(&txn);
    if let Some(email) = &email {
        if user_repo.email_taken_by_other(email, advisor.user_id).await? {
            return Err(ApiError::validation("Email already exists."));
        }
    }

    if let Some(department) = department {
        advisor_repo.update_department(advisor.id, department).await?;
    }
    user_repo.update_identity(advisor.user_id, name, email).await?;

    txn.commit().await?;
    Ok(())
}

pub async fn delete_advisor(db: &DatabaseConnection, advisor_id: i32) -> ApiResult<()> {
    let txn = db.begin().await?;

    let advisor_repo = OjtAdvisorRepository::new(&txn);
    let advisor = advisor_repo
        .find_by_id(advisor_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Advisor not found."))?;

    advisor_repo.delete(advisor.id).await?;
    UserRepository::new(&txn).delete(advisor.user_id).await?;

    txn.commit().await?;
    tracing::info!("deleted advisor {} and user {}", advisor.id, advisor.user_id);
    Ok(())
}

pub async fn create_supervisor(
    db: &DatabaseConnection,
    hash_cost: u32,
    account: AccountInput,
    company_id: Option<i32>,
    position: Option<String>,
) -> ApiResult<company_advisor::Model> {
    let txn = db.begin().await?;

    let user_repo = UserRepository::new(&txn);
    if user_repo.email_exists(&account.email).await? {
        return Err(ApiError::validation("Email already exists."));
    }
    if let Some(company_id) = company_id {
        if !CompanyRepository::new(&txn).exists(company_id).await? {
            return Err(ApiError::validation("Invalid company ID."));
        }
    }

    let password = account
        .password
        .unwrap_or_else(|| DEFAULT_SUPERVISOR_PASSWORD.to_string());
    let user = user_repo
        .create(NewUser {
            name: account.name,
            email: account.email,
            password_hash: hash_password(&password, hash_cost)?,
            role: UserRole::CompanyAdvisor,
        })
        .await?;
    let supervisor = CompanyAdvisorRepository::new(&txn)
        .create(user.id, company_id, position)
        .await?;

    txn.commit().await?;
    tracing::info!("created company advisor {} (user {})", supervisor.id, user.id);
    Ok(supervisor)
}

pub async fn update_supervisor(
    db: &DatabaseConnection,
    supervisor_id: i32,
    company_id: Option<Option<i32>>,
    position: Option<Option<String>>,
) -> ApiResult<()> {
    let supervisor_repo = CompanyAdvisorRepository::new(db);
    if supervisor_repo.find_by_id(supervisor_id).await?.is_none() {
        return Err(ApiError::not_found("Company advisor not found."));
    }
    if let Some(Some(company_id)) = company_id {
        if !CompanyRepository::new(db).exists(company_id).await? {
            return Err(ApiError::validation("Invalid company ID."));
        }
    }
    supervisor_repo
        .update(supervisor_id, company_id, position)
        .await?;
    Ok(())
}

pub async fn delete_supervisor(db: &DatabaseConnection, supervisor_id: i32) -> ApiResult<()> {
    let txn = db.begin().await?;

    let supervisor_repo = CompanyAdvisorRepository::new(&txn);
    let supervisor = supervisor_repo
        .find_by_id(supervisor_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Company advisor not found."))?;

    supervisor_repo.delete(supervisor.id).await?;
    UserRepository::new(&txn).delete(supervisor.user_id).await?;

    txn.commit().await?;
    tracing::info!(
        "deleted company advisor {} and user {}",
        supervisor.id,
        supervisor.user_id
    );
    Ok(())
}
