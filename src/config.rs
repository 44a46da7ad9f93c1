use clap::{Parser, ValueEnum};

pub const SESSION_TOKEN_BYTES: usize = 32;

pub const DEFAULT_STUDENT_PASSWORD: &str = "student123";
pub const DEFAULT_ADVISOR_PASSWORD: &str = "advisor123";
pub const DEFAULT_SUPERVISOR_PASSWORD: &str = "supervisor123";

/// Directory, relative to the storage root, that holds requirement uploads.
pub const REQUIREMENT_UPLOAD_DIR: &str = "uploads/student_requirements";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SessionBackend {
    Memory,
    Redis,
}

#[derive(Debug, Parser, Clone)]
pub struct Config {
    #[clap(long, env, default_value_t = 8080)]
    pub port: u16,

    #[clap(long, env, default_value_t = true, action = clap::ArgAction::Set)]
    pub swagger_enabled: bool,

    #[clap(long, env, default_value = "info")]
    pub log_level: String,

    #[clap(long, env)]
    pub database_url: String,

    #[clap(long, env, default_value_t = true, action = clap::ArgAction::Set)]
    pub run_migrations: bool,

    #[clap(long, env, default_value = "*")]
    pub cors_allowed_origins: String,

    #[clap(long, env, default_value = "local")]
    pub app_env: String,

    /// Uploaded files live under `<storage_root>/uploads/...`
    #[clap(long, env, default_value = ".")]
    pub storage_root: String,

    /// Prefix joined with stored relative paths to build download URLs.
    #[clap(long, env, default_value = "")]
    pub public_base_url: String,

    /// Request body cap for multipart uploads.
    #[clap(long, env, default_value_t = 10 * 1024 * 1024)]
    pub max_upload_bytes: usize,

    #[clap(long, env, default_value = "OJTSESSID")]
    pub session_cookie_name: String,

    #[clap(long, env, default_value_t = 86400)]
    pub session_ttl_seconds: u64,

    #[clap(long, env, value_enum, default_value_t = SessionBackend::Memory)]
    pub session_backend: SessionBackend,

    #[clap(long, env, default_value = "redis://127.0.0.1:6379")]
    pub redis_url: String,

    #[clap(long, env)]
    pub admin_email: Option<String>,

    #[clap(long, env)]
    pub admin_password: Option<String>,

    #[clap(long, env, default_value_t = bcrypt::DEFAULT_COST)]
    pub password_hash_cost: u32,

    #[clap(long, env, default_value = "weekly-report")]
    pub weekly_report_slug: String,
}
