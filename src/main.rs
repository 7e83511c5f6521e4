use std::sync::Arc;
use std::time::Instant;

use actix_web::dev::Service as _;
use actix_web::http::header::{HeaderName, HeaderValue};
use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::Context;
use category_service::api::openapi::configure_swagger_ui;
use category_service::api::routes::{self, AppState};
use category_service::application::CategoryService;
use category_service::config::AppConfig;
use category_service::infrastructure::db::{migrations::run_migrations, pool::create_pool};
use category_service::infrastructure::product_gateway::{
    DisabledProductGateway, HttpProductGateway, ProductGateway,
};
use category_service::infrastructure::repositories::CategoryRepositoryImpl;
use category_service::middleware::request_logging::{
    create_request_span, get_client_ip, get_status_class, get_user_agent, request_id,
    REQUEST_ID_HEADER,
};
use tracing::{info, warn, Instrument};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env().context("failed to load application configuration")?;
    config.validate()?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone()));
    if config.logging.json_format {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(true),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer())
            .init();
    }

    let pool = create_pool(&config.database)
        .await
        .context("failed to create database pool")?;

    run_migrations(&pool)
        .await
        .context("database migrations failed")?;

    let product_gateway: Arc<dyn ProductGateway> = if config.product_service.is_enabled() {
        Arc::new(HttpProductGateway::new(&config.product_service)?)
    } else {
        warn!("product service url not configured; product aggregation is disabled");
        Arc::new(DisabledProductGateway)
    };

    let category_repo = Arc::new(CategoryRepositoryImpl::new(pool.clone()));
    let state = AppState {
        category_service: Arc::new(CategoryService::new(category_repo, product_gateway)),
        db_pool: pool,
    };

    let bind_host = config.host.clone();
    let bind_port = config.port;
    info!(
        host = %bind_host,
        port = bind_port,
        environment = %config.environment,
        "starting category service"
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap_fn(|req, srv| {
                let request_id = request_id(&req);
                let path = req.path().to_string();
                let method = req.method().to_string();
                let span = create_request_span(
                    &request_id,
                    &method,
                    &path,
                    &get_client_ip(&req),
                    &get_user_agent(&req),
                );
                let start = Instant::now();

                let fut = srv.call(req);
                async move {
                    let mut response = fut.await?;
                    if let Ok(value) = HeaderValue::from_str(&request_id) {
                        response
                            .headers_mut()
                            .insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
                    }

                    let status = response.status().as_u16();
                    info!(
                        status = status,
                        status_class = get_status_class(status),
                        latency_ms = start.elapsed().as_millis() as u64,
                        "request completed"
                    );
                    Ok::<_, actix_web::Error>(response)
                }
                .instrument(span)
            })
            .app_data(web::Data::new(state.clone()))
            .configure(routes::configure)
            .configure(configure_swagger_ui)
    })
    .bind((bind_host, bind_port))?
    .run()
    .await?;

    Ok(())
}
