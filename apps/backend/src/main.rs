use actix_web::{web, App, HttpServer};
use backend::config::db::DbSettings;
use backend::config::server::ServerSettings;
use backend::infra::state::build_state;
use backend::logging::pii::Redacted;
use backend::middleware::cors::cors_middleware;
use backend::middleware::request_trace::RequestTrace;
use backend::middleware::structured_logger::StructuredLogger;
use backend::middleware::trace_span::TraceSpan;
use backend::routes;
use backend::telemetry;
use tracing::{error, info};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment
    // (docker env_file, or `set -a; . ./.env; set +a` locally).
    let server = match ServerSettings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            error!(error = %e, "invalid server configuration");
            std::process::exit(1);
        }
    };
    let db_settings = match DbSettings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            error!(error = %e, "invalid database configuration");
            std::process::exit(1);
        }
    };

    info!(
        host = %server.host,
        port = server.port,
        database = %Redacted(&db_settings.url),
        "starting maintenance tracker backend"
    );

    // Connects and runs pending migrations
    let app_state = match build_state().with_db(db_settings).build().await {
        Ok(state) => state,
        Err(e) => {
            error!(error = %e, "failed to build application state");
            std::process::exit(1);
        }
    };

    info!("database ready");

    let data = web::Data::new(app_state);
    let origins = server.cors_allowed_origins.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware(&origins))
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((server.host.as_str(), server.port))?
    .run()
    .await
}
