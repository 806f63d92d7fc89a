//! JSON endpoints consumed by the admin form scripts: tag autocomplete, the
//! category tree and the in-form URL preview.

use actix_web::{HttpResponse, Responder, get, post, web};
use log::error;
use serde::Deserialize;

use crate::SERVICE_ACCESS_ROLE;
use crate::auth::{AuthenticatedUser, ensure_role};
use crate::repository::DieselRepository;
use crate::services::ServiceError;
use crate::services::categories::show_categories as show_categories_service;
use crate::services::preview::preview_video as preview_video_service;
use crate::services::tags::{add_tag as add_tag_service, list_tags as list_tags_service};

#[derive(Deserialize, Debug)]
struct ApiV1TagsQueryParams {
    search: Option<String>,
}

#[get("/v1/tags")]
pub async fn api_v1_tags(
    params: web::Query<ApiV1TagsQueryParams>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    if ensure_role(&user, SERVICE_ACCESS_ROLE, None).is_err() {
        return HttpResponse::Unauthorized().finish();
    }

    match list_tags_service(params.search.clone(), &user, repo.get_ref()) {
        Ok(tags) => HttpResponse::Ok().json(tags),
        Err(e) => {
            error!("Failed to list tags: {e}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[derive(Deserialize, Debug)]
struct ApiV1AddTagRequest {
    name: String,
}

#[post("/v1/tags")]
pub async fn api_v1_add_tag(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(request): web::Json<ApiV1AddTagRequest>,
) -> impl Responder {
    if ensure_role(&user, SERVICE_ACCESS_ROLE, None).is_err() {
        return HttpResponse::Unauthorized().finish();
    }

    match add_tag_service(request.name, &user, repo.get_ref()) {
        Ok(tag) => HttpResponse::Created().json(tag),
        Err(ServiceError::Form(message)) => {
            HttpResponse::UnprocessableEntity().json(serde_json::json!({ "message": message }))
        }
        Err(e) => {
            error!("Failed to create tag: {e}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/v1/categories")]
pub async fn api_v1_categories(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    if ensure_role(&user, SERVICE_ACCESS_ROLE, None).is_err() {
        return HttpResponse::Unauthorized().finish();
    }

    match show_categories_service(&user, repo.get_ref()) {
        Ok(tree) => HttpResponse::Ok().json(tree.to_nested()),
        Err(e) => {
            error!("Failed to list categories: {e}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[derive(Deserialize, Debug)]
struct ApiV1PreviewQueryParams {
    url: String,
}

#[get("/v1/preview")]
pub async fn api_v1_preview(
    params: web::Query<ApiV1PreviewQueryParams>,
    user: AuthenticatedUser,
) -> impl Responder {
    if ensure_role(&user, SERVICE_ACCESS_ROLE, None).is_err() {
        return HttpResponse::Unauthorized().finish();
    }

    match preview_video_service(&params.url, &user) {
        Ok(resolved) => HttpResponse::Ok().json(resolved),
        Err(ServiceError::Form(message)) => {
            HttpResponse::UnprocessableEntity().json(serde_json::json!({ "message": message }))
        }
        Err(e) => {
            error!("Failed to resolve preview URL: {e}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
