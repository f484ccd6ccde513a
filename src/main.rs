use dotenvy::dotenv;
use product_api::infrastructure::product_repo::InMemoryProductRepository;
use product_api::{build_server, Settings};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let settings = Settings::from_env()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

    log::info!(
        "Starting server at http://{}:{} ({})",
        settings.host,
        settings.port,
        settings.environment
    );

    build_server(InMemoryProductRepository::seeded(), &settings)?.await
}
