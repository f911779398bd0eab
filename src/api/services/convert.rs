//! XML 上传与 xlsx 下载

use actix_multipart::Multipart;
use actix_web::{HttpResponse, Result as ActixResult, web};
use futures_util::stream::StreamExt;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::api::constants::{CONVERT_PATH, FILE_FIELD, ROW_COUNT_HEADER, VISIT_COUNT_HEADER};
use crate::errors::FlattenerError;
use crate::export::{EXPORT_FILENAME, XLSX_CONTENT_TYPE};
use crate::services::ConvertService;

use super::helpers::error_from_flattener;

/// 上传限制，由服务器启动时从配置构建
#[derive(Debug, Clone, Copy)]
pub struct UploadLimits {
    pub max_file_size: usize,
}

impl UploadLimits {
    pub fn from_config() -> Self {
        Self {
            max_file_size: crate::config::get_config().upload.max_file_size_bytes(),
        }
    }
}

pub struct ConvertHandler;

impl ConvertHandler {
    /// 接收 multipart 上传的 XML，返回 xlsx 附件
    pub async fn convert_upload(
        payload: Multipart,
        service: web::Data<Arc<ConvertService>>,
        limits: web::Data<UploadLimits>,
    ) -> ActixResult<HttpResponse> {
        info!("Convert API: upload request");

        let xml_data = match read_xml_field(payload, limits.max_file_size).await {
            Ok(data) => data,
            Err(e) => {
                warn!("Convert API: rejected upload: {}", e);
                return Ok(error_from_flattener(&e));
            }
        };

        info!("Convert API: received {} bytes", xml_data.len());

        // 转换是纯 CPU 工作，移到 blocking 线程池
        let service = service.get_ref().clone();
        let conversion = tokio::task::spawn_blocking(move || service.convert(&xml_data))
            .await
            .map_err(|e| {
                error!("Conversion task panicked: {}", e);
                FlattenerError::internal("Conversion task failed")
            });

        match conversion {
            Ok(Ok(conversion)) => {
                info!(
                    "Convert API: sending {} ({} rows)",
                    EXPORT_FILENAME,
                    conversion.row_count()
                );
                Ok(HttpResponse::Ok()
                    .content_type(XLSX_CONTENT_TYPE)
                    .insert_header((
                        "Content-Disposition",
                        format!("attachment; filename=\"{}\"", EXPORT_FILENAME),
                    ))
                    .insert_header((VISIT_COUNT_HEADER, conversion.visits.to_string()))
                    .insert_header((ROW_COUNT_HEADER, conversion.row_count().to_string()))
                    .body(conversion.workbook))
            }
            Ok(Err(e)) | Err(e) => {
                warn!("Convert API: conversion failed: {}", e);
                Ok(error_from_flattener(&e))
            }
        }
    }
}

/// 读取 `file` 字段内容（带大小限制），忽略其他字段
async fn read_xml_field(
    mut payload: Multipart,
    max_size: usize,
) -> Result<Vec<u8>, FlattenerError> {
    let mut xml_data: Option<Vec<u8>> = None;

    while let Some(item) = payload.next().await {
        let mut field = item.map_err(|e| {
            FlattenerError::invalid_multipart_data(format!("Invalid multipart data: {}", e))
        })?;

        if field.name() != Some(FILE_FIELD) {
            // 忽略未知字段
            while let Some(chunk) = field.next().await {
                chunk.map_err(|e| {
                    FlattenerError::invalid_multipart_data(format!(
                        "Invalid multipart data: {}",
                        e
                    ))
                })?;
            }
            continue;
        }

        if let Some(filename) = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
        {
            info!("Convert API: reading uploaded file '{}'", filename);
        }

        let mut data = Vec::new();
        while let Some(chunk) = field.next().await {
            let bytes = chunk.map_err(|e| {
                FlattenerError::file_operation(format!("Failed to read file: {}", e))
            })?;
            if data.len() + bytes.len() > max_size {
                return Err(FlattenerError::file_too_large(format!(
                    "File size exceeds maximum of {} bytes",
                    max_size
                )));
            }
            data.extend_from_slice(&bytes);
        }
        xml_data = Some(data);
    }

    match xml_data {
        Some(data) if !data.is_empty() => Ok(data),
        _ => Err(FlattenerError::xml_file_missing("No XML file provided")),
    }
}

/// 转换路由
pub fn convert_routes() -> actix_web::Resource {
    web::resource(CONVERT_PATH).route(web::post().to(ConvertHandler::convert_upload))
}
