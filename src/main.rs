use actix_web::{middleware::Logger, web, App, HttpServer};

use simple_quiz_server::{
    app_state::AppState,
    auth::{AuthMiddleware, JwtService},
    config::Config,
    errors::AppError,
    handlers,
};

fn startup_error(err: AppError) -> std::io::Error {
    log::error!("Startup failed: {}", err);
    std::io::Error::other(err.to_string())
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env();
    if !cfg!(debug_assertions) {
        config.validate_for_production().map_err(startup_error)?;
    }

    let jwt_service = web::Data::new(JwtService::new(&config.jwt_secret));
    let state = web::Data::new(AppState::new(&config).await.map_err(startup_error)?);

    log::info!(
        "Starting HTTP server on {}:{}",
        config.web_server_host,
        config.web_server_port
    );

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(jwt_service.clone())
            .wrap(AuthMiddleware)
            .wrap(Logger::default())
            .configure(handlers::configure)
    })
    .bind((config.web_server_host.as_str(), config.web_server_port))?
    .run()
    .await
}
