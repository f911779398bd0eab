//! Server mode
//!
//! Configures and starts the HTTP server serving the upload form and the
//! conversion endpoint.

use actix_web::{
    App, Error, HttpServer,
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    middleware::{Compress, DefaultHeaders, from_fn},
    web,
};
use anyhow::Result;
use std::sync::Arc;
use tracing::{info, warn};

use crate::api::middleware::{RequestIdMiddleware, TimingMiddleware};
use crate::api::services::{
    AppStartTime, UploadLimits, convert_routes, form_routes, health_routes,
};
use crate::services::ConvertService;

/// Server configuration
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub server_host: String,
    pub server_port: u16,
}

/// Build the application with all routes, shared state and middleware
pub fn build_app(
    convert_service: Arc<ConvertService>,
    limits: UploadLimits,
    app_start_time: AppStartTime,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
> {
    App::new()
        .wrap(Compress::default())
        .wrap(
            DefaultHeaders::new().add(("Cache-Control", "no-cache, no-store, must-revalidate")),
        )
        .wrap(TimingMiddleware) // 记录请求延迟，位于 request span 内
        .wrap(from_fn(RequestIdMiddleware::assign)) // 最外层，为每个请求确定 request_id
        .app_data(web::Data::new(convert_service))
        .app_data(web::Data::new(limits))
        .app_data(web::Data::new(app_start_time))
        .service(health_routes())
        .service(convert_routes())
        .service(form_routes())
}

/// Run the HTTP server
///
/// **Note**: Logging system must be initialized before calling this function
pub async fn run_server() -> Result<()> {
    let app_start_time = AppStartTime::now();

    let config = crate::config::get_config();
    let server_config = ServerConfig {
        server_host: config.server.host.clone(),
        server_port: config.server.port,
    };

    let cpu_count = config.server.cpu_count.clamp(1, 32);
    info!("Using {} CPU cores for the server", cpu_count);

    let limits = UploadLimits::from_config();
    info!(
        "Maximum upload size: {} MB",
        config.upload.max_file_size_mb
    );

    let convert_service = Arc::new(ConvertService::new());

    let bind_address = format!(
        "{}:{}",
        server_config.server_host, server_config.server_port
    );
    warn!("Starting server at http://{}", bind_address);

    // actix 自带 SIGINT/SIGTERM 优雅关闭
    HttpServer::new(move || {
        build_app(convert_service.clone(), limits, app_start_time.clone())
    })
    .keep_alive(std::time::Duration::from_secs(30))
    .client_request_timeout(std::time::Duration::from_millis(5000))
    .client_disconnect_timeout(std::time::Duration::from_millis(1000))
    .workers(cpu_count)
    .bind(bind_address)?
    .run()
    .await?;

    warn!("Server stopped");
    Ok(())
}
