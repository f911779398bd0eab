//! Visit × Action 交叉展开

use super::model::{OutputRow, Visit};
use super::parser::parse_visits;
use crate::errors::Result;

/// 每个 (Visit, Action) 生成一行，保持文档顺序
///
/// 没有动作的 Visit 不产生任何行。
pub fn flatten(visits: &[Visit]) -> Vec<OutputRow> {
    let total: usize = visits.iter().map(|v| v.actions.len()).sum();
    let mut rows = Vec::with_capacity(total);

    for visit in visits {
        rows.extend(
            visit
                .actions
                .iter()
                .map(|action| OutputRow::join(visit, action)),
        );
    }

    rows
}

/// 解析 + 展开
pub fn flatten_document(input: &str) -> Result<Vec<OutputRow>> {
    let visits = parse_visits(input)?;
    Ok(flatten(&visits))
}
