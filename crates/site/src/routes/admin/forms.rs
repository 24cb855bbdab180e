//! Multipart form handling shared by the admin CRUD screens.
//!
//! Every admin form posts as `multipart/form-data` so file inputs and text
//! inputs arrive together. The whole body is buffered up front; the
//! handlers then read fields by name and run uploads before any record
//! write.

use std::collections::HashMap;

use axum::extract::Multipart;
use chrono::Utc;
use tracing::instrument;

use portfolio_core::{StorageKey, StoragePrefix};

use crate::backend::{AccessToken, BackendError, StorageClient};
use crate::error::AppError;

/// A file selected in a form's file input.
pub struct UploadedFile {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// A fully-read multipart form body.
#[derive(Default)]
pub struct FormData {
    fields: HashMap<String, String>,
    files: HashMap<String, Vec<UploadedFile>>,
}

impl FormData {
    /// Buffer an entire multipart body. Empty file inputs (no file chosen)
    /// are dropped so "no new file" is simply an absent entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the body cannot be read.
    pub async fn read(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await? {
            let Some(name) = field.name().map(ToString::to_string) else {
                continue;
            };

            if let Some(filename) = field.file_name().map(ToString::to_string) {
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field.bytes().await?.to_vec();
                if filename.is_empty() || bytes.is_empty() {
                    continue;
                }
                form.files.entry(name).or_default().push(UploadedFile {
                    filename,
                    content_type,
                    bytes,
                });
            } else {
                form.fields.insert(name, field.text().await?);
            }
        }

        Ok(form)
    }

    /// A text field's value, or the empty string if absent.
    pub fn field(&self, name: &str) -> &str {
        self.fields.get(name).map_or("", String::as_str)
    }

    /// A text field's trimmed value, or `None` when blank/absent.
    pub fn optional_field(&self, name: &str) -> Option<String> {
        let value = self.field(name).trim();
        if value.is_empty() {
            None
        } else {
            Some(value.to_string())
        }
    }

    /// Whether a checkbox was ticked. Browsers omit unticked checkboxes,
    /// so presence of the field means ticked.
    pub fn checkbox(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// All files submitted under a file input's name.
    pub fn files(&self, name: &str) -> &[UploadedFile] {
        self.files.get(name).map_or(&[], Vec::as_slice)
    }

    /// The single file submitted under a name, if any.
    pub fn file(&self, name: &str) -> Option<&UploadedFile> {
        self.files(name).first()
    }
}

/// Upload one file under the entity prefix, keyed by upload time.
///
/// # Errors
///
/// Returns the storage error unchanged; callers map it to their weak
/// failure mode.
#[instrument(skip(storage, token, file), fields(filename = %file.filename))]
pub async fn upload_file(
    storage: &StorageClient,
    token: &AccessToken,
    prefix: StoragePrefix,
    file: &UploadedFile,
) -> Result<StorageKey, BackendError> {
    let key = StorageKey::derive(prefix, Utc::now().timestamp_millis(), &file.filename);
    storage
        .upload(token, &key, &file.content_type, file.bytes.clone())
        .await?;
    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_field_reads_as_empty() {
        let form = FormData::default();
        assert_eq!(form.field("title"), "");
        assert!(form.optional_field("title").is_none());
        assert!(!form.checkbox("is_active"));
        assert!(form.files("images").is_empty());
    }

    #[test]
    fn optional_field_trims_and_drops_blanks() {
        let mut form = FormData::default();
        form.fields.insert("live_url".to_string(), "  ".to_string());
        form.fields
            .insert("github_url".to_string(), " https://example.com ".to_string());

        assert!(form.optional_field("live_url").is_none());
        assert_eq!(
            form.optional_field("github_url").as_deref(),
            Some("https://example.com")
        );
    }
}
