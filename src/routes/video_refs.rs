use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use serde::Deserialize;
use tera::Tera;

use crate::auth::AuthenticatedUser;
use crate::domain::category_tree::TreeSelection;
use crate::domain::types::VideoRefId;
use crate::dto::categories::all_rows;
use crate::dto::video_refs::list_rows;
use crate::forms::video_refs::{SaveVideoRefForm, SaveVideoRefFormPayload};
use crate::repository::{DEFAULT_ITEMS_PER_PAGE, DieselRepository};
use crate::routes::{base_context, redirect, render_template};
use crate::services::ServiceError;
use crate::services::categories::show_categories as show_categories_service;
use crate::services::video_refs::{
    delete_video_ref as delete_video_ref_service, load_form_context as load_form_context_service,
    save_video_ref as save_video_ref_service, show_video_ref as show_video_ref_service,
    show_video_refs as show_video_refs_service,
};

#[derive(Deserialize)]
struct VideosQueryParams {
    page: Option<usize>,
    /// Exact-id search field.
    id: Option<i32>,
    /// Source-URL search field.
    source_url: Option<String>,
}

#[get("/videos")]
pub async fn show_video_refs(
    params: web::Query<VideosQueryParams>,
    user: AuthenticatedUser,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let page = params.page.unwrap_or(1);

    match show_video_refs_service(
        params.id,
        params.source_url.clone(),
        page,
        &user,
        repo.get_ref(),
    ) {
        Ok((total, videos)) => {
            let tree = match show_categories_service(&user, repo.get_ref()) {
                Ok(tree) => tree,
                Err(ServiceError::Unauthorized) => return redirect("/na"),
                Err(err) => {
                    log::error!("Failed to load categories for video list: {err}");
                    return HttpResponse::InternalServerError().finish();
                }
            };

            let mut context = base_context(&flash_messages, &user, "videos");
            context.insert("videos", &list_rows(&videos, &tree));
            context.insert("total", &total);
            context.insert("page", &page);
            context.insert("total_pages", &total.div_ceil(DEFAULT_ITEMS_PER_PAGE).max(1));
            context.insert("search_id", &params.id);
            context.insert("search_source_url", &params.source_url);
            render_template(&tera, "videos/index.html", &context)
        }
        Err(ServiceError::Unauthorized) => redirect("/na"),
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect("/videos")
        }
        Err(err) => {
            log::error!("Failed to render video list: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

fn render_video_form(
    video_id: Option<VideoRefId>,
    user: &AuthenticatedUser,
    flash_messages: &IncomingFlashMessages,
    repo: &DieselRepository,
    tera: &Tera,
) -> HttpResponse {
    let form_context = match load_form_context_service(user, repo) {
        Ok(form_context) => form_context,
        Err(ServiceError::Unauthorized) => return redirect("/na"),
        Err(err) => {
            log::error!("Failed to load video form context: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    let mut context = base_context(flash_messages, user, "videos");
    let selection = match video_id {
        Some(id) => match show_video_ref_service(id, user, repo) {
            Ok(video) => {
                let selection = TreeSelection::with_selected(video.category_ids.iter().copied());
                context.insert("video", &video);
                selection
            }
            Err(ServiceError::Unauthorized) => return redirect("/na"),
            Err(ServiceError::NotFound) => {
                FlashMessage::error("Video reference not found.").send();
                return redirect("/videos");
            }
            Err(err) => {
                log::error!("Failed to load video reference: {err}");
                return HttpResponse::InternalServerError().finish();
            }
        },
        None => TreeSelection::new(),
    };

    context.insert("category_rows", &all_rows(&form_context.tree, &selection));
    context.insert(
        "selected_categories",
        &selection
            .resolve_selected(&form_context.tree)
            .iter()
            .map(|c| c.name.as_str())
            .collect::<Vec<_>>(),
    );
    context.insert("all_tags", &form_context.tags);
    context.insert("hooks", &form_context.hooks);
    context.insert("tutorials", &form_context.tutorials);
    render_template(tera, "videos/form.html", &context)
}

#[get("/videos/new")]
pub async fn new_video_ref(
    user: AuthenticatedUser,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    render_video_form(None, &user, &flash_messages, repo.get_ref(), &tera)
}

#[get("/videos/{video_id}/edit")]
pub async fn edit_video_ref(
    video_id: web::Path<i32>,
    user: AuthenticatedUser,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let video_id = match VideoRefId::new(video_id.into_inner()) {
        Ok(id) => id,
        Err(e) => {
            FlashMessage::error(e.to_string()).send();
            return redirect("/videos");
        }
    };

    render_video_form(Some(video_id), &user, &flash_messages, repo.get_ref(), &tera)
}

fn save_response(
    result: Result<VideoRefId, ServiceError>,
    success_message: &str,
) -> HttpResponse {
    match result {
        Ok(id) => {
            FlashMessage::success(success_message.to_string()).send();
            HttpResponse::Ok().json(serde_json::json!({ "id": id.get() }))
        }
        Err(ServiceError::Unauthorized) => HttpResponse::Unauthorized().finish(),
        Err(ServiceError::NotFound) => HttpResponse::NotFound()
            .json(serde_json::json!({ "message": "Video reference not found" })),
        Err(ServiceError::Form(message)) => HttpResponse::UnprocessableEntity()
            .json(serde_json::json!({ "message": message })),
        Err(err) => {
            log::error!("Failed to save video reference: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/videos")]
pub async fn create_video_ref(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<SaveVideoRefForm>,
) -> impl Responder {
    let payload: SaveVideoRefFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => {
            return HttpResponse::UnprocessableEntity()
                .json(serde_json::json!({ "message": e.to_string() }));
        }
    };

    save_response(
        save_video_ref_service(payload, None, &user, repo.get_ref()),
        "Video reference created.",
    )
}

#[post("/videos/{video_id}/update")]
pub async fn update_video_ref(
    video_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<SaveVideoRefForm>,
) -> impl Responder {
    let video_id = match VideoRefId::new(video_id.into_inner()) {
        Ok(id) => id,
        Err(e) => {
            return HttpResponse::UnprocessableEntity()
                .json(serde_json::json!({ "message": e.to_string() }));
        }
    };

    let payload: SaveVideoRefFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => {
            return HttpResponse::UnprocessableEntity()
                .json(serde_json::json!({ "message": e.to_string() }));
        }
    };

    save_response(
        save_video_ref_service(payload, Some(video_id), &user, repo.get_ref()),
        "Video reference updated.",
    )
}

#[post("/videos/{video_id}/delete")]
pub async fn delete_video_ref(
    video_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let video_id = match VideoRefId::new(video_id.into_inner()) {
        Ok(id) => id,
        Err(e) => {
            FlashMessage::error(e.to_string()).send();
            return redirect("/videos");
        }
    };

    match delete_video_ref_service(video_id, &user, repo.get_ref()) {
        Ok(true) => FlashMessage::success("Video reference deleted.").send(),
        Ok(false) => FlashMessage::error("Failed to delete video reference.").send(),
        Err(ServiceError::Unauthorized) => return redirect("/na"),
        Err(ServiceError::NotFound) => FlashMessage::error("Video reference not found.").send(),
        Err(ServiceError::Form(message)) => FlashMessage::error(message).send(),
        Err(err) => {
            log::error!("Failed to delete video reference: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    }

    redirect("/videos")
}
