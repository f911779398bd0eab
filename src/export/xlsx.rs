//! xlsx 序列化
//!
//! 单个工作表：第 0 行为加粗表头，其余每行对应一个 [`OutputRow`]。
//! 空值写为带格式的空白单元格，任何行都不会被丢弃。

use rust_xlsxwriter::{ColNum, Format, FormatBorder, RowNum, Workbook};
use tracing::{debug, warn};

use crate::errors::{FlattenerError, Result};
use crate::flatten::{COLUMNS, OutputRow};

/// xlsx 单个工作表的最大行数（含表头）
pub const MAX_SHEET_ROWS: usize = 1_048_576;

/// Excel 单元格可容纳的最大字符数
pub const MAX_CELL_CHARS: usize = 32_767;

const SHEET_NAME: &str = "Sheet1";

/// 将输出行写入内存中的 xlsx 工作簿
pub fn write_workbook(rows: &[OutputRow]) -> Result<Vec<u8>> {
    check_row_limit(rows.len())?;

    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold().set_border(FormatBorder::Thin);
    // 无格式的空白单元格会被 rust_xlsxwriter 忽略，这里用文本格式
    let blank_format = Format::new().set_num_format("@");

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (col, name) in COLUMNS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as ColNum, *name, &header_format)?;
    }

    for (idx, row) in rows.iter().enumerate() {
        let row_num = (idx + 1) as RowNum;
        for (col, value) in row.cells().into_iter().enumerate() {
            let col = col as ColNum;
            if value.is_empty() {
                worksheet.write_blank(row_num, col, &blank_format)?;
            } else {
                let fitted = fit_cell(value);
                if fitted.len() < value.len() {
                    warn!(
                        "Truncated {} in row {} to {} characters",
                        COLUMNS[col as usize], row_num, MAX_CELL_CHARS
                    );
                }
                worksheet.write_string(row_num, col, fitted)?;
            }
        }
    }

    let buffer = workbook.save_to_buffer()?;
    debug!(
        "Serialized {} rows into workbook ({} bytes)",
        rows.len(),
        buffer.len()
    );
    Ok(buffer)
}

/// 截断到 [`MAX_CELL_CHARS`] 个字符（按字符边界）
fn fit_cell(value: &str) -> &str {
    match value.char_indices().nth(MAX_CELL_CHARS) {
        Some((end, _)) => &value[..end],
        None => value,
    }
}

fn check_row_limit(data_rows: usize) -> Result<()> {
    if data_rows + 1 > MAX_SHEET_ROWS {
        return Err(FlattenerError::spreadsheet(format!(
            "{} rows exceed the worksheet limit of {} (including header)",
            data_rows, MAX_SHEET_ROWS
        )));
    }
    Ok(())
}
