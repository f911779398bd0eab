//! Visit / Action / OutputRow 数据模型
//!
//! 所有字段都是可选文本：`None` 表示源 XML 中缺少该子元素，
//! `Some("")` 表示元素存在但没有文本。两者在输出中都是空单元格。

/// 输出表格的固定列，顺序即电子表格中的列顺序
pub const COLUMNS: [&str; 13] = [
    "idSite",
    "idVisit",
    "visitIp",
    "visitorId",
    "fingerprint",
    "actionType",
    "actionUrl",
    "pageTitle",
    "timeSpent",
    "serverTimePretty",
    "visitServerHour",
    "referrerType",
    "visitDurationPretty",
];

/// 一次访问（Visit）的公共字段及其嵌套动作
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Visit {
    pub id_site: Option<String>,
    pub id_visit: Option<String>,
    pub visit_ip: Option<String>,
    pub visitor_id: Option<String>,
    pub fingerprint: Option<String>,
    pub visit_server_hour: Option<String>,
    /// 来自 `<referrerTypeName>`，输出列名为 `referrerType`
    pub referrer_type: Option<String>,
    pub visit_duration_pretty: Option<String>,
    pub actions: Vec<Action>,
}

/// 访问内的一条动作记录（通常是一次 pageview）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Action {
    /// 来自 `<type>`
    pub action_type: Option<String>,
    /// 来自 `<url>`
    pub action_url: Option<String>,
    pub page_title: Option<String>,
    /// 来自 `<timeSpentPretty>`
    pub time_spent: Option<String>,
    pub server_time_pretty: Option<String>,
}

/// 扁平化后的一行：一个 Visit 的字段 + 它的一个 Action 的字段
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputRow {
    pub id_site: Option<String>,
    pub id_visit: Option<String>,
    pub visit_ip: Option<String>,
    pub visitor_id: Option<String>,
    pub fingerprint: Option<String>,
    pub action_type: Option<String>,
    pub action_url: Option<String>,
    pub page_title: Option<String>,
    pub time_spent: Option<String>,
    pub server_time_pretty: Option<String>,
    pub visit_server_hour: Option<String>,
    pub referrer_type: Option<String>,
    pub visit_duration_pretty: Option<String>,
}

impl OutputRow {
    /// 合并访问公共字段与单条动作字段
    pub fn join(visit: &Visit, action: &Action) -> Self {
        Self {
            id_site: visit.id_site.clone(),
            id_visit: visit.id_visit.clone(),
            visit_ip: visit.visit_ip.clone(),
            visitor_id: visit.visitor_id.clone(),
            fingerprint: visit.fingerprint.clone(),
            action_type: action.action_type.clone(),
            action_url: action.action_url.clone(),
            page_title: action.page_title.clone(),
            time_spent: action.time_spent.clone(),
            server_time_pretty: action.server_time_pretty.clone(),
            visit_server_hour: visit.visit_server_hour.clone(),
            referrer_type: visit.referrer_type.clone(),
            visit_duration_pretty: visit.visit_duration_pretty.clone(),
        }
    }

    /// 按 [`COLUMNS`] 顺序返回单元格，缺失字段为空字符串
    pub fn cells(&self) -> [&str; 13] {
        [
            cell(&self.id_site),
            cell(&self.id_visit),
            cell(&self.visit_ip),
            cell(&self.visitor_id),
            cell(&self.fingerprint),
            cell(&self.action_type),
            cell(&self.action_url),
            cell(&self.page_title),
            cell(&self.time_spent),
            cell(&self.server_time_pretty),
            cell(&self.visit_server_hour),
            cell(&self.referrer_type),
            cell(&self.visit_duration_pretty),
        ]
    }
}

fn cell(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("")
}
