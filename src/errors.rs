use std::fmt;

#[derive(Debug, Clone)]
pub enum FlattenerError {
    XmlParse(String),
    Spreadsheet(String),
    InvalidMultipartData(String),
    XmlFileMissing(String),
    FileTooLarge(String),
    FileOperation(String),
    Config(String),
    Internal(String),
}

impl FlattenerError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            FlattenerError::XmlParse(_) => "E001",
            FlattenerError::Spreadsheet(_) => "E002",
            FlattenerError::InvalidMultipartData(_) => "E003",
            FlattenerError::XmlFileMissing(_) => "E004",
            FlattenerError::FileTooLarge(_) => "E005",
            FlattenerError::FileOperation(_) => "E006",
            FlattenerError::Config(_) => "E007",
            FlattenerError::Internal(_) => "E008",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            FlattenerError::XmlParse(_) => "XML Parse Error",
            FlattenerError::Spreadsheet(_) => "Spreadsheet Error",
            FlattenerError::InvalidMultipartData(_) => "Invalid Multipart Data",
            FlattenerError::XmlFileMissing(_) => "XML File Missing",
            FlattenerError::FileTooLarge(_) => "File Too Large",
            FlattenerError::FileOperation(_) => "File Operation Error",
            FlattenerError::Config(_) => "Configuration Error",
            FlattenerError::Internal(_) => "Internal Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            FlattenerError::XmlParse(msg) => msg,
            FlattenerError::Spreadsheet(msg) => msg,
            FlattenerError::InvalidMultipartData(msg) => msg,
            FlattenerError::XmlFileMissing(msg) => msg,
            FlattenerError::FileTooLarge(msg) => msg,
            FlattenerError::FileOperation(msg) => msg,
            FlattenerError::Config(msg) => msg,
            FlattenerError::Internal(msg) => msg,
        }
    }

    /// 映射到 HTTP 状态码
    pub fn http_status(&self) -> actix_web::http::StatusCode {
        use actix_web::http::StatusCode;
        match self {
            FlattenerError::XmlParse(_)
            | FlattenerError::InvalidMultipartData(_)
            | FlattenerError::XmlFileMissing(_) => StatusCode::BAD_REQUEST,
            FlattenerError::FileTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            FlattenerError::Spreadsheet(_)
            | FlattenerError::FileOperation(_)
            | FlattenerError::Config(_)
            | FlattenerError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 格式化为彩色输出（用于 Server 模式）
    #[cfg(feature = "server")]
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    /// 格式化为简洁输出（用于 CLI 模式）
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for FlattenerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for FlattenerError {}

// 便捷的构造函数
impl FlattenerError {
    pub fn xml_parse<T: Into<String>>(msg: T) -> Self {
        FlattenerError::XmlParse(msg.into())
    }

    pub fn spreadsheet<T: Into<String>>(msg: T) -> Self {
        FlattenerError::Spreadsheet(msg.into())
    }

    pub fn invalid_multipart_data<T: Into<String>>(msg: T) -> Self {
        FlattenerError::InvalidMultipartData(msg.into())
    }

    pub fn xml_file_missing<T: Into<String>>(msg: T) -> Self {
        FlattenerError::XmlFileMissing(msg.into())
    }

    pub fn file_too_large<T: Into<String>>(msg: T) -> Self {
        FlattenerError::FileTooLarge(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        FlattenerError::FileOperation(msg.into())
    }

    pub fn config<T: Into<String>>(msg: T) -> Self {
        FlattenerError::Config(msg.into())
    }

    pub fn internal<T: Into<String>>(msg: T) -> Self {
        FlattenerError::Internal(msg.into())
    }
}

// 为常见的错误类型实现 From trait
impl From<roxmltree::Error> for FlattenerError {
    fn from(err: roxmltree::Error) -> Self {
        FlattenerError::XmlParse(format!("Malformed XML: {}", err))
    }
}

impl From<std::str::Utf8Error> for FlattenerError {
    fn from(err: std::str::Utf8Error) -> Self {
        FlattenerError::XmlParse(format!("Input is not valid UTF-8: {}", err))
    }
}

impl From<rust_xlsxwriter::XlsxError> for FlattenerError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        FlattenerError::Spreadsheet(err.to_string())
    }
}

impl From<std::io::Error> for FlattenerError {
    fn from(err: std::io::Error) -> Self {
        FlattenerError::FileOperation(err.to_string())
    }
}

impl From<config::ConfigError> for FlattenerError {
    fn from(err: config::ConfigError) -> Self {
        FlattenerError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, FlattenerError>;
