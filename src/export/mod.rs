//! 电子表格导出

pub mod xlsx;

pub use xlsx::{MAX_CELL_CHARS, MAX_SHEET_ROWS, write_workbook};

/// 下载文件名
pub const EXPORT_FILENAME: &str = "export_xml_cleaned.xlsx";

/// xlsx 的 MIME 类型
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
