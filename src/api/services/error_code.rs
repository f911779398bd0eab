//! 统一 API 错误码定义

use serde_repr::{Deserialize_repr, Serialize_repr};

use crate::errors::FlattenerError;

/// API 错误码枚举
///
/// 使用 serde_repr 序列化为数字。按千位分域：
/// - 0: 成功
/// - 1000-1099: 通用错误
/// - 4000-4099: 上传与转换错误
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize_repr, Deserialize_repr)]
#[repr(i32)]
pub enum ErrorCode {
    // 成功
    Success = 0,

    // 通用错误 1000-1099
    InternalServerError = 1005,
    FileTooLarge = 1011,

    // 上传与转换错误 4000-4099
    XmlParseError = 4000,
    XmlFileMissing = 4001,
    InvalidMultipartData = 4002,
    FileReadError = 4003,
    SpreadsheetError = 4004,
}

impl From<&FlattenerError> for ErrorCode {
    fn from(err: &FlattenerError) -> Self {
        match err {
            FlattenerError::XmlParse(_) => ErrorCode::XmlParseError,
            FlattenerError::XmlFileMissing(_) => ErrorCode::XmlFileMissing,
            FlattenerError::InvalidMultipartData(_) => ErrorCode::InvalidMultipartData,
            FlattenerError::FileTooLarge(_) => ErrorCode::FileTooLarge,
            FlattenerError::FileOperation(_) => ErrorCode::FileReadError,
            FlattenerError::Spreadsheet(_) => ErrorCode::SpreadsheetError,
            FlattenerError::Config(_) | FlattenerError::Internal(_) => {
                ErrorCode::InternalServerError
            }
        }
    }
}
