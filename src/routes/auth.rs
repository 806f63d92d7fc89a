use actix_identity::Identity;
use actix_web::{HttpMessage, HttpRequest, HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::{Context, Tera};
use validator::Validate;

use crate::SERVICE_ACCESS_ROLE;
use crate::auth::AuthenticatedUser;
use crate::forms::auth::LoginForm;
use crate::models::config::ServerConfig;
use crate::routes::{alert_level_to_str, redirect, render_template};

#[get("/login")]
pub async fn login_page(
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let alerts = flash_messages
        .iter()
        .map(|f| (f.content(), alert_level_to_str(&f.level())))
        .collect::<Vec<_>>();

    let mut context = Context::new();
    context.insert("alerts", &alerts);
    context.insert("current_page", "login");

    render_template(&tera, "auth/login.html", &context)
}

#[post("/login")]
pub async fn login(
    request: HttpRequest,
    server_config: web::Data<ServerConfig>,
    web::Form(form): web::Form<LoginForm>,
) -> impl Responder {
    if form.validate().is_err()
        || form.email != server_config.admin_email
        || form.password != server_config.admin_password
    {
        FlashMessage::error("Invalid email or password.").send();
        return redirect("/login");
    }

    let user = AuthenticatedUser {
        email: form.email,
        name: server_config
            .admin_name
            .clone()
            .unwrap_or_else(|| "Admin".to_string()),
        roles: vec![SERVICE_ACCESS_ROLE.to_string()],
    };

    let session_string = match user.to_session_string() {
        Ok(session_string) => session_string,
        Err(e) => {
            log::error!("Failed to serialize identity: {e}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    match Identity::login(&request.extensions(), session_string) {
        Ok(_) => redirect("/"),
        Err(e) => {
            log::error!("Failed to establish identity: {e}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/logout")]
pub async fn logout(identity: Identity) -> impl Responder {
    identity.logout();
    redirect("/login")
}
