pub mod application;
pub mod config;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod infrastructure;
pub mod openapi;
pub mod problem;
pub mod validation;

use actix_web::{middleware::Logger, web, App, HttpServer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::application::product_service::ProductService;
use crate::handlers::{error_demos, fallback, products};
use crate::infrastructure::product_repo::InMemoryProductRepository;

pub use config::Settings;

/// Build and return an actix-web `Server` bound to `settings.host:settings.port`.
///
/// The product store is owned by the returned server and shared by all of its
/// workers. The caller is responsible for `.await`-ing (or `tokio::spawn`-ing)
/// the returned server.
pub fn build_server(
    repo: InMemoryProductRepository,
    settings: &Settings,
) -> std::io::Result<actix_web::dev::Server> {
    let service = web::Data::new(ProductService::new(repo));
    let expose_docs = settings.expose_api_docs();

    Ok(HttpServer::new(move || {
        App::new()
            .app_data(service.clone())
            .app_data(web::JsonConfig::default().error_handler(fallback::json_error))
            .app_data(web::PathConfig::default().error_handler(fallback::path_error))
            .wrap(Logger::default())
            .configure(|cfg| {
                if expose_docs {
                    cfg.service(
                        SwaggerUi::new("/swagger-ui/{_:.*}")
                            .url(openapi::OPENAPI_JSON_PATH, openapi::ApiDoc::openapi()),
                    );
                }
            })
            .service(
                web::scope(products::BASE_PATH)
                    .service(
                        web::resource("")
                            .route(web::get().to(products::list_products))
                            .route(web::post().to(products::create_product))
                            .default_service(fallback::method_not_allowed("GET, POST")),
                    )
                    .service(
                        web::resource("/{id}")
                            .route(web::get().to(products::get_product))
                            .route(web::put().to(products::update_product))
                            .route(web::delete().to(products::delete_product))
                            .default_service(fallback::method_not_allowed("GET, PUT, DELETE")),
                    ),
            )
            .service(
                web::scope("/api/errors")
                    .service(
                        web::resource("/validation-error")
                            .route(web::post().to(error_demos::validation_error))
                            .default_service(fallback::method_not_allowed("POST")),
                    )
                    .service(
                        web::resource("/bad-request")
                            .route(web::post().to(error_demos::bad_request))
                            .default_service(fallback::method_not_allowed("POST")),
                    )
                    .service(
                        web::resource("/unauthorized")
                            .route(web::get().to(error_demos::unauthorized))
                            .default_service(fallback::method_not_allowed("GET")),
                    )
                    .service(
                        web::resource("/forbidden")
                            .route(web::get().to(error_demos::forbidden))
                            .default_service(fallback::method_not_allowed("GET")),
                    )
                    .service(
                        web::resource("/not-found/{id}")
                            .route(web::get().to(error_demos::not_found))
                            .default_service(fallback::method_not_allowed("GET")),
                    )
                    .service(
                        web::resource("/conflict")
                            .route(web::post().to(error_demos::conflict))
                            .default_service(fallback::method_not_allowed("POST")),
                    )
                    .service(
                        web::resource("/unprocessable")
                            .route(web::post().to(error_demos::unprocessable))
                            .default_service(fallback::method_not_allowed("POST")),
                    )
                    .service(
                        web::resource("/rate-limit")
                            .route(web::get().to(error_demos::rate_limit))
                            .default_service(fallback::method_not_allowed("GET")),
                    )
                    .service(
                        web::resource("/server-error")
                            .route(web::get().to(error_demos::server_error))
                            .default_service(fallback::method_not_allowed("GET")),
                    )
                    .service(
                        web::resource("/service-unavailable")
                            .route(web::get().to(error_demos::service_unavailable))
                            .default_service(fallback::method_not_allowed("GET")),
                    ),
            )
            .default_service(web::to(fallback::route_not_found))
    })
    .bind((settings.host.clone(), settings.port))?
    .run())
}
