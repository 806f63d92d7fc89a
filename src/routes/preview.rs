use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::auth::AuthenticatedUser;
use crate::forms::preview::PreviewForm;
use crate::routes::{base_context, redirect, render_template};
use crate::services::ServiceError;
use crate::services::preview::preview_video as preview_video_service;

#[get("/preview")]
pub async fn show_preview(
    user: AuthenticatedUser,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let context = base_context(&flash_messages, &user, "preview");
    render_template(&tera, "preview/index.html", &context)
}

#[post("/preview")]
pub async fn run_preview(
    user: AuthenticatedUser,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
    web::Form(form): web::Form<PreviewForm>,
) -> impl Responder {
    match preview_video_service(&form.url, &user) {
        Ok(resolved) => {
            let mut context = base_context(&flash_messages, &user, "preview");
            context.insert("url", &form.url);
            context.insert("resolved", &resolved);
            // Placeholder title for the embed card, the real one is only known
            // after the reference is saved.
            context.insert("preview_title", "Test Video");
            render_template(&tera, "preview/index.html", &context)
        }
        Err(ServiceError::Unauthorized) => redirect("/na"),
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect("/preview")
        }
        Err(err) => {
            log::error!("Failed to resolve preview URL: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
