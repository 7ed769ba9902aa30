use actix_cors::Cors;
use actix_web::{App, HttpServer, web};
use craftlink_backend::auth::jwks::JwksCache;
use craftlink_backend::auth::jwt::TokenVerifier;
use craftlink_backend::config::AppConfig;
use craftlink_backend::create_pool;
use craftlink_backend::guard::OperationGuard;
use craftlink_backend::handlers;
use craftlink_backend::supabase::SupabaseClient;
use dotenv::dotenv;
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let config = AppConfig::from_env().expect("Invalid configuration");

    let db = create_pool(&config.database_url)
        .await
        .expect("Failed to connect to database");
    let db_data = web::Data::new(db);
    tracing::info!("Connected to database");

    // One shared handle onto Supabase Auth + Storage for every request.
    let supabase = web::Data::new(SupabaseClient::new(
        &config.supabase_url,
        &config.supabase_anon_key,
    ));

    let verifier = match &config.supabase_jwt_secret {
        Some(secret) => {
            tracing::info!("Verifying tokens with the HS256 project secret");
            TokenVerifier::Secret(secret.clone())
        }
        None => TokenVerifier::Jwks(JwksCache::new(
            &config.supabase_url,
            &config.supabase_anon_key,
        )),
    };
    let verifier = web::Data::new(verifier);

    let guard = web::Data::new(OperationGuard::new(config.operation_guard_ttl));

    let bind_addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Server running at http://{bind_addr}");

    let config_data = web::Data::new(config);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"])
            .allowed_headers(vec![
                actix_web::http::header::AUTHORIZATION,
                actix_web::http::header::CONTENT_TYPE,
                actix_web::http::header::ACCEPT,
            ])
            .max_age(3600);

        App::new()
            .wrap(cors)
            .app_data(db_data.clone())
            .app_data(supabase.clone())
            .app_data(verifier.clone())
            .app_data(guard.clone())
            .app_data(config_data.clone())
            .service(web::scope("/api").configure(handlers::init_routes))
    })
    .bind(&bind_addr)?
    .run()
    .await
}
