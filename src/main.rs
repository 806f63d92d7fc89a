use actix_files::Files;
use actix_identity::IdentityMiddleware;
use actix_session::SessionMiddleware;
use actix_session::storage::CookieSessionStore;
use actix_web::cookie::Key;
use actix_web::{App, HttpServer, middleware, web};
use actix_web_flash_messages::FlashMessagesFramework;
use actix_web_flash_messages::storage::CookieMessageStore;
use tera::Tera;

use reelbase::db::establish_connection_pool;
use reelbase::models::config::ServerConfig;
use reelbase::repository::DieselRepository;
use reelbase::routes;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let settings = match config::Config::builder()
        .add_source(config::File::with_name("config").required(false))
        .add_source(config::Environment::default())
        .build()
    {
        Ok(settings) => settings,
        Err(e) => {
            log::error!("Failed to load configuration: {e}");
            return Err(std::io::Error::other(e));
        }
    };
    let server_config: ServerConfig = match settings.try_deserialize() {
        Ok(server_config) => server_config,
        Err(e) => {
            log::error!("Invalid configuration: {e}");
            return Err(std::io::Error::other(e));
        }
    };
    if server_config.secret_key.len() < 32 {
        log::error!("secret_key must be at least 32 bytes long");
        return Err(std::io::Error::other("secret_key too short"));
    }

    let pool = match establish_connection_pool(&server_config.database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to open database {}: {e}", server_config.database_url);
            return Err(std::io::Error::other(e));
        }
    };

    let tera = match Tera::new("templates/**/*") {
        Ok(tera) => tera,
        Err(e) => {
            log::error!("Failed to load templates: {e}");
            return Err(std::io::Error::other(e));
        }
    };

    let secret_key = Key::derive_from(server_config.secret_key.as_bytes());
    let message_store = CookieMessageStore::builder(secret_key.clone()).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();
    let repo = DieselRepository::new(pool);
    let bind_address = server_config.bind_address.clone();

    log::info!("Starting server at {bind_address}");

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .wrap(message_framework.clone())
            .wrap(IdentityMiddleware::default())
            .wrap(SessionMiddleware::new(
                CookieSessionStore::default(),
                secret_key.clone(),
            ))
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(server_config.clone()))
            .app_data(web::Data::new(tera.clone()))
            .service(Files::new("/assets", "./assets"))
            .service(routes::auth::login_page)
            .service(routes::auth::login)
            .service(routes::auth::logout)
            .service(routes::main::index)
            .service(routes::main::not_assigned)
            .service(routes::categories::show_categories)
            .service(routes::categories::add_category)
            .service(routes::categories::edit_category)
            .service(routes::categories::update_category)
            .service(routes::categories::delete_category)
            .service(routes::categories::toggle_expand)
            .service(routes::video_refs::show_video_refs)
            .service(routes::video_refs::new_video_ref)
            .service(routes::video_refs::edit_video_ref)
            .service(routes::video_refs::create_video_ref)
            .service(routes::video_refs::update_video_ref)
            .service(routes::video_refs::delete_video_ref)
            .service(routes::preview::show_preview)
            .service(routes::preview::run_preview)
            .service(
                web::scope("/api")
                    .service(routes::api::api_v1_tags)
                    .service(routes::api::api_v1_add_tag)
                    .service(routes::api::api_v1_categories)
                    .service(routes::api::api_v1_preview),
            )
    })
    .bind(bind_address)?
    .run()
    .await
}
