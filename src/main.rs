use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware::Logger};
use anyhow::Result;

use kwanza_erp::config::DataSource;
use kwanza_erp::database::{DataStore, InMemoryStore, PgStore, init_database};
use kwanza_erp::seed::seed_demo_data;
use kwanza_erp::{AppState, Config};

async fn serve<S: DataStore>(config: Config, store: S) -> Result<()> {
    let state = AppState::new(store);
    let server_address = config.server_address();
    let client_base_url = config.client_base_url.clone();
    log::info!("Server starting on http://{}", server_address);

    HttpServer::new(move || {
        let state = state.clone();
        App::new()
            .wrap(
                Cors::default()
                    .allowed_origin(&client_base_url)
                    .allowed_methods(vec!["GET", "POST", "DELETE", "OPTIONS"])
                    .allowed_headers(vec!["Content-Type", "Accept", "X-Requested-With"])
                    .max_age(3600),
            )
            .wrap(Logger::new(r#"%a "%r" %s %b "%{User-Agent}i" %T"#))
            .configure(move |cfg| state.configure(cfg))
    })
    .bind(&server_address)?
    .run()
    .await
    .map_err(|e| anyhow::anyhow!("Server error: {}", e))
}

#[actix_web::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;

    // Initialize logger; RUST_LOG still wins over the environment default
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.default_log_filter()),
    )
    .init();

    log::info!(
        "Configuration loaded (environment: {}, data source: {:?})",
        config.environment,
        config.data_source
    );

    match config.data_source {
        DataSource::Postgres => {
            let pool = init_database(&config.database_url).await?;
            log::info!("Database initialized");
            serve(config, PgStore::new(pool)).await
        }
        DataSource::Mock => {
            let store = InMemoryStore::new();
            let today = chrono::Local::now().date_naive();
            seed_demo_data(&store, today, 30, &config.work_rules(), config.mock_seed).await?;
            serve(config, store).await
        }
    }
}
