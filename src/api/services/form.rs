use actix_web::{HttpResponse, Result, web};
use rust_embed::Embed;
use tracing::trace;

use crate::api::constants::{CONVERT_PATH, FILE_FIELD, FORM_PATH};
use crate::config::get_config;

// 使用 RustEmbed 嵌入上传表单页面
#[derive(Embed)]
#[folder = "assets/"]
struct FormAssets;

pub struct FormService;

impl FormService {
    /// 上传表单首页
    pub async fn handle_index() -> Result<HttpResponse> {
        trace!("Serving upload form");

        let html = match FormAssets::get("index.html") {
            Some(content) => String::from_utf8_lossy(&content.data).into_owned(),
            // 使用编译时包含作为后备
            None => include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/assets/index.html"))
                .to_string(),
        };

        Ok(HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(render(&html)))
    }
}

fn render(template: &str) -> String {
    let config = get_config();
    template
        .replace("%CONVERT_PATH%", CONVERT_PATH)
        .replace("%FILE_FIELD%", FILE_FIELD)
        .replace(
            "%MAX_UPLOAD_MB%",
            &config.upload.max_file_size_mb.to_string(),
        )
        .replace("%APP_VERSION%", env!("CARGO_PKG_VERSION"))
}

/// 表单路由
pub fn form_routes() -> actix_web::Resource {
    web::resource(FORM_PATH)
        .route(web::get().to(FormService::handle_index))
        .route(web::head().to(FormService::handle_index))
}
