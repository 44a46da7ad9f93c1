use std::io;
use std::path::{Component, Path, PathBuf};

use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Reduces a client-supplied file name to its basename over `[A-Za-z0-9_.-]`.
pub fn sanitize_upload_name(original: &str) -> String {
    let basename = original
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();

    let options = sanitize_filename::Options {
        windows: true,
        truncate: true,
        replacement: "_",
    };
    let cleaned: String = sanitize_filename::sanitize_with_options(basename, options)
        .chars()
        .map(|c| match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '_' | '.' | '-' => c,
            _ => '_',
        })
        .collect();

    if cleaned.is_empty() {
        "file".to_string()
    } else {
        cleaned
    }
}

/// `report.pdf` + `1700000000` -> `report_1700000000.pdf`
fn with_suffix(file_name: &str, suffix: &str) -> String {
    let path = Path::new(file_name);
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("file");
    match path.extension().and_then(|s| s.to_str()) {
        Some(ext) if !ext.is_empty() => format!("{}_{}.{}", stem, suffix, ext),
        _ => format!("{}_{}", stem, suffix),
    }
}

/// Joins a public base URL with a stored relative path.
pub fn public_url(base_url: &str, relative_path: &str) -> String {
    if base_url.is_empty() {
        return format!("/{}", relative_path.trim_start_matches('/'));
    }
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        relative_path.trim_start_matches('/')
    )
}

/// Local-disk storage for uploaded files.
///
/// Paths handed out and accepted by this type are relative to `root`,
/// which is also the directory served under `/uploads`'s parent.
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, relative_path: &str) -> io::Result<PathBuf> {
        let relative = Path::new(relative_path);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("refusing path outside storage root: {}", relative_path),
            ));
        }
        Ok(self.root.join(relative))
    }

    pub async fn exists(&self, relative_path: &str) -> io::Result<bool> {
        fs::try_exists(self.resolve(relative_path)?).await
    }

    /// Writes `data` under `dir` without ever replacing an existing file.
    ///
    /// Returns the stored path relative to the root, e.g.
    /// `uploads/student_requirements/report_1700000000.pdf`.
    pub async fn save(&self, dir: &str, original_name: &str, data: &[u8]) -> io::Result<String> {
        let target_dir = self.resolve(dir)?;
        fs::create_dir_all(&target_dir).await?;

        let safe_name = sanitize_upload_name(original_name);
        let timestamp = chrono::Utc::now().timestamp().to_string();

        let mut candidates = vec![safe_name.clone(), with_suffix(&safe_name, &timestamp)];
        for attempt in 1..=8 {
            candidates.push(with_suffix(&safe_name, &format!("{}_{}", timestamp, attempt)));
        }

        for name in candidates {
            let path = target_dir.join(&name);
            let file = fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await;
            let mut file = match file {
                Ok(file) => file,
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(e),
            };

            if let Err(e) = file.write_all(data).await {
                drop(file);
                let _ = fs::remove_file(&path).await;
                return Err(e);
            }
            file.flush().await?;

            let relative = format!("{}/{}", dir.trim_end_matches('/'), name);
            tracing::debug!("stored upload {} ({} bytes)", relative, data.len());
            return Ok(relative);
        }

        Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("no free file name for {}", safe_name),
        ))
    }

    /// Removes a stored file. Returns `false` when it was already gone.
    pub async fn delete(&self, relative_path: &str) -> io::Result<bool> {
        match fs::remove_file(self.resolve(relative_path)?).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_keeps_basename_and_safe_charset() {
        assert_eq!(sanitize_upload_name("report.pdf"), "report.pdf");
        assert_eq!(sanitize_upload_name("my report (v2).pdf"), "my_report__v2_.pdf");
        assert_eq!(sanitize_upload_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_upload_name("C:\\Users\\me\\cv.docx"), "cv.docx");
        assert_eq!(sanitize_upload_name("résumé.pdf"), "r_sum_.pdf");
    }

    #[test]
    fn sanitize_never_returns_traversal_or_empty() {
        assert_ne!(sanitize_upload_name(".."), "..");
        assert_ne!(sanitize_upload_name("."), ".");
        assert_eq!(sanitize_upload_name(""), "file");
        assert_eq!(sanitize_upload_name("dir/"), "file");
    }

    #[test]
    fn suffix_goes_before_extension() {
        assert_eq!(with_suffix("report.pdf", "1700000000"), "report_1700000000.pdf");
        assert_eq!(with_suffix("README", "1700000000"), "README_1700000000");
    }

    #[test]
    fn public_url_joins_cleanly() {
        assert_eq!(
            public_url("http://localhost:8080/", "uploads/student_requirements/a.pdf"),
            "http://localhost:8080/uploads/student_requirements/a.pdf"
        );
        assert_eq!(public_url("", "uploads/a.pdf"), "/uploads/a.pdf");
    }

    #[tokio::test]
    async fn save_avoids_overwriting_existing_files() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());

        let first = storage
            .save("uploads/student_requirements", "report.pdf", b"one")
            .await
            .unwrap();
        let second = storage
            .save("uploads/student_requirements", "report.pdf", b"two")
            .await
            .unwrap();

        assert_eq!(first, "uploads/student_requirements/report.pdf");
        assert_ne!(first, second);
        assert!(second.starts_with("uploads/student_requirements/report_"));
        assert!(second.ends_with(".pdf"));

        let first_content = std::fs::read(dir.path().join(&first)).unwrap();
        assert_eq!(first_content, b"one");
        let second_content = std::fs::read(dir.path().join(&second)).unwrap();
        assert_eq!(second_content, b"two");
    }

    #[tokio::test]
    async fn delete_tolerates_missing_files_and_rejects_escapes() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());

        let stored = storage.save("uploads", "a.txt", b"x").await.unwrap();
        assert!(storage.delete(&stored).await.unwrap());
        assert!(!storage.delete(&stored).await.unwrap());
        assert!(storage.delete("../outside.txt").await.is_err());
    }
}
