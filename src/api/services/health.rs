use actix_web::{HttpResponse, Responder, web};
use serde::{Deserialize, Serialize};
use tracing::trace;

use super::helpers::success_response;

// 应用启动时间结构体
#[derive(Clone, Debug)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

impl AppStartTime {
    pub fn now() -> Self {
        Self {
            start_datetime: chrono::Utc::now(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: String,
    pub uptime: u64,
}

/// Health Service
///
/// 转换是无状态的，没有外部依赖可检查，readiness 与 liveness 等价。
pub struct HealthService;

impl HealthService {
    pub async fn health_check(app_start_time: web::Data<AppStartTime>) -> impl Responder {
        trace!("Received health check request");
        success_response(build_health(&app_start_time))
    }

    pub async fn readiness_check() -> impl Responder {
        trace!("Received readiness check request");
        HttpResponse::Ok().body("OK")
    }

    pub async fn liveness_check() -> impl Responder {
        trace!("Received liveness check request");
        HttpResponse::NoContent().finish()
    }
}

fn build_health(app_start_time: &AppStartTime) -> HealthResponse {
    let now = chrono::Utc::now();
    let uptime = (now - app_start_time.start_datetime).num_seconds().max(0) as u64;

    HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: now.to_rfc3339(),
        uptime,
    }
}

/// Health 路由
pub fn health_routes() -> actix_web::Scope {
    web::scope(crate::api::constants::HEALTH_PREFIX)
        .route("", web::get().to(HealthService::health_check))
        .route("", web::head().to(HealthService::health_check))
        .route("/ready", web::get().to(HealthService::readiness_check))
        .route("/ready", web::head().to(HealthService::readiness_check))
        .route("/live", web::get().to(HealthService::liveness_check))
        .route("/live", web::head().to(HealthService::liveness_check))
}
