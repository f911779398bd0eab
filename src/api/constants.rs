//! API 模块常量定义

/// 上传表单页面
pub const FORM_PATH: &str = "/";

/// 转换接口（multipart 上传）
pub const CONVERT_PATH: &str = "/convert";

/// 健康检查前缀
pub const HEALTH_PREFIX: &str = "/health";

/// multipart 中携带 XML 文件的字段名
pub const FILE_FIELD: &str = "file";

/// 响应头：文档中的访问数
pub const VISIT_COUNT_HEADER: &str = "X-Visit-Count";

/// 响应头：输出行数
pub const ROW_COUNT_HEADER: &str = "X-Row-Count";

/// 响应头：请求 ID
pub const REQUEST_ID_HEADER: &str = "x-request-id";
