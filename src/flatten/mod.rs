//! 访问记录扁平化
//!
//! 解析分析导出 XML（Visit 内嵌 Action），并按 (Visit, Action) 展开为
//! 固定 13 列的输出行。

pub mod flattener;
pub mod model;
pub mod parser;

pub use flattener::{flatten, flatten_document};
pub use model::{Action, COLUMNS, OutputRow, Visit};
pub use parser::{parse_visits, parse_visits_bytes};
