use actix_web::{Responder, get, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::auth::AuthenticatedUser;
use crate::routes::{base_context, redirect, render_template};

#[get("/")]
pub async fn index(_user: AuthenticatedUser) -> impl Responder {
    // The video list is the landing page.
    redirect("/videos")
}

#[get("/na")]
pub async fn not_assigned(
    user: AuthenticatedUser,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let context = base_context(&flash_messages, &user, "index");
    render_template(&tera, "main/not_assigned.html", &context)
}
