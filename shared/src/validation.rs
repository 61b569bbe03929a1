//! 客户端前置校验
//!
//! 校验失败时不会发出任何网络请求。

use crate::error::{ClientError, ClientResult};
use crate::{FileUpload, messages};
use regex::Regex;
use std::sync::LazyLock;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

/// 文件选择器的 `accept` 提示
pub const ACCEPTED_FILE_EXTENSIONS: &str = ".pdf,.png,.jpg,.jpeg";

pub const ALLOWED_CONTENT_TYPES: [&str; 3] = ["application/pdf", "image/png", "image/jpeg"];

/// 与后端 `file.max-size` 默认值一致
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

pub fn validate_login(username: &str, password: &str) -> ClientResult<()> {
    if username.is_empty() || password.is_empty() {
        return Err(ClientError::validation(messages::LOGIN_FIELDS_REQUIRED));
    }
    Ok(())
}

pub fn validate_registration(username: &str, email: &str, password: &str) -> ClientResult<()> {
    if username.is_empty() || email.is_empty() || password.is_empty() {
        return Err(ClientError::validation(messages::REGISTER_FIELDS_REQUIRED));
    }
    if !is_valid_email(email) {
        return Err(ClientError::validation(messages::INVALID_EMAIL));
    }
    Ok(())
}

pub fn validate_title(title: &str) -> ClientResult<()> {
    if title.trim().is_empty() {
        return Err(ClientError::validation(messages::TITLE_REQUIRED));
    }
    Ok(())
}

/// 上传前检查文件类型 (PDF/PNG/JPEG) 与大小
///
/// 浏览器给出的 MIME 可能为空，此时按扩展名判断。
pub fn validate_upload(file: &FileUpload) -> ClientResult<()> {
    if file.file_name.is_empty() {
        return Err(ClientError::validation(messages::FILE_REQUIRED));
    }
    if file.bytes.is_empty() {
        return Err(ClientError::validation(messages::FILE_EMPTY));
    }
    if !is_allowed_file(&file.file_name, &file.content_type) {
        return Err(ClientError::validation(messages::FILE_TYPE_NOT_ALLOWED));
    }
    if file.size() > MAX_UPLOAD_BYTES {
        return Err(ClientError::validation(messages::FILE_TOO_LARGE));
    }
    Ok(())
}

fn is_allowed_file(file_name: &str, content_type: &str) -> bool {
    let content_type = content_type.trim().to_ascii_lowercase();
    if !content_type.is_empty() {
        return ALLOWED_CONTENT_TYPES.contains(&content_type.as_str());
    }
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    matches!(extension.as_str(), "pdf" | "png" | "jpg" | "jpeg")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_pattern() {
        assert!(is_valid_email("ana@ged.com.br"));
        assert!(is_valid_email("a@b.c"));
        assert!(!is_valid_email("ana@ged"));
        assert!(!is_valid_email("ana ged@x.com"));
        assert!(!is_valid_email("@x.com"));
        assert!(!is_valid_email("ana@@x.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_registration_checks_required_before_email() {
        assert_eq!(
            validate_registration("ana", "", "pw"),
            Err(ClientError::validation(messages::REGISTER_FIELDS_REQUIRED))
        );
        assert_eq!(
            validate_registration("ana", "not-an-email", "pw"),
            Err(ClientError::validation(messages::INVALID_EMAIL))
        );
        assert!(validate_registration("ana", "ana@x.com", "pw").is_ok());
    }

    #[test]
    fn test_title_must_not_be_blank() {
        assert_eq!(
            validate_title("   "),
            Err(ClientError::validation("Título é obrigatório"))
        );
        assert!(validate_title(" Ata ").is_ok());
    }

    #[test]
    fn test_upload_type_and_size() {
        let pdf = FileUpload::new("contrato.pdf", "application/pdf", vec![1; 16]);
        assert!(validate_upload(&pdf).is_ok());

        let unknown_mime = FileUpload::new("foto.JPG", "", vec![1; 16]);
        assert!(validate_upload(&unknown_mime).is_ok());

        let docx = FileUpload::new(
            "carta.docx",
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
            vec![1; 16],
        );
        assert_eq!(
            validate_upload(&docx),
            Err(ClientError::validation(messages::FILE_TYPE_NOT_ALLOWED))
        );

        let empty = FileUpload::new("vazio.pdf", "application/pdf", Vec::new());
        assert_eq!(
            validate_upload(&empty),
            Err(ClientError::validation(messages::FILE_EMPTY))
        );

        let huge = FileUpload::new(
            "scan.png",
            "image/png",
            vec![0; (MAX_UPLOAD_BYTES + 1) as usize],
        );
        assert_eq!(
            validate_upload(&huge),
            Err(ClientError::validation(messages::FILE_TOO_LARGE))
        );
    }
}
