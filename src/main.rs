use actix_cors::Cors;
use actix_web::{middleware::Logger, App, HttpServer};
use dotenv::dotenv;
use std::io;
use std::sync::Arc;

use taskgate::auth::TokenService;
use taskgate::config::Config;
use taskgate::routes::{self, health};
use taskgate::store::{InMemoryUserStore, PgUserStore, UserStore};
use taskgate::AppState;

fn cors(allowed_origin: Option<&str>) -> Cors {
    let cors = match allowed_origin {
        Some(origin) => Cors::default().allowed_origin(origin),
        None => Cors::default().allow_any_origin(),
    };
    cors.allowed_methods(vec!["GET", "HEAD", "PUT", "PATCH", "POST", "DELETE"])
        .allowed_headers(vec![
            actix_web::http::header::CONTENT_TYPE,
            actix_web::http::header::ACCEPT,
            actix_web::http::header::AUTHORIZATION,
        ])
        .max_age(3600)
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    // Without a signing secret nothing can be verified; refuse to start.
    let config = Config::from_env().map_err(|e| {
        log::error!("Invalid configuration: {}", e);
        io::Error::new(io::ErrorKind::InvalidInput, e)
    })?;

    let users: Arc<dyn UserStore> = match config.database_url.as_deref() {
        Some(url) => {
            let store = PgUserStore::connect(url).await.map_err(|e| {
                log::error!("Failed to open user store: {}", e);
                io::Error::new(io::ErrorKind::Other, e)
            })?;
            Arc::new(store)
        }
        None => {
            log::warn!("DATABASE_URL not set; users are kept in memory and lost on restart");
            Arc::new(InMemoryUserStore::new())
        }
    };

    let state = AppState::new(
        users,
        TokenService::new(config.jwt_secret(), config.token_ttl),
    );

    log::info!("Starting taskgate server at {}", config.server_url());
    let allowed_origin = config.cors_allowed_origin.clone();
    HttpServer::new(move || {
        let state = state.clone();
        App::new()
            .wrap(cors(allowed_origin.as_deref()))
            .wrap(Logger::default())
            .service(health::health)
            .configure(|cfg| routes::config(cfg, &state))
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .run()
    .await
}
