use actix_session::Session;
use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::auth::AuthenticatedUser;
use crate::domain::category_tree::TreeSelection;
use crate::domain::types::CategoryId;
use crate::dto::categories::{parent_options, visible_rows};
use crate::forms::categories::{
    AddCategoryForm, AddCategoryFormPayload, DeleteCategoryForm, DeleteCategoryFormPayload,
    UpdateCategoryForm, UpdateCategoryFormPayload,
};
use crate::repository::DieselRepository;
use crate::routes::{base_context, redirect, render_template};
use crate::services::ServiceError;
use crate::services::categories::{
    add_category as add_category_service, delete_category as delete_category_service,
    show_categories as show_categories_service, update_category as update_category_service,
};

/// Session key for the expanded-row set; purely a presentation nicety, losing
/// it on a fresh session is fine.
const EXPANDED_CATEGORIES_KEY: &str = "expanded_categories";

fn expansion_from_session(session: &Session) -> TreeSelection {
    let ids = session
        .get::<Vec<i32>>(EXPANDED_CATEGORIES_KEY)
        .ok()
        .flatten()
        .unwrap_or_default();
    TreeSelection::with_expanded(ids.into_iter().filter_map(|id| CategoryId::new(id).ok()))
}

fn store_expansion(session: &Session, selection: &TreeSelection) {
    let ids: Vec<i32> = selection.expanded_ids().iter().map(|id| id.get()).collect();
    if let Err(e) = session.insert(EXPANDED_CATEGORIES_KEY, ids) {
        log::error!("Failed to store expanded categories in session: {e}");
    }
}

#[get("/categories")]
pub async fn show_categories(
    user: AuthenticatedUser,
    flash_messages: IncomingFlashMessages,
    session: Session,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match show_categories_service(&user, repo.get_ref()) {
        Ok(tree) => {
            let selection = expansion_from_session(&session);
            let mut context = base_context(&flash_messages, &user, "categories");
            context.insert("categories", &visible_rows(&tree, &selection));
            context.insert("parent_options", &parent_options(&tree, None));
            render_template(&tera, "categories/index.html", &context)
        }
        Err(ServiceError::Unauthorized) => redirect("/na"),
        Err(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect("/categories")
        }
        Err(err) => {
            log::error!("Failed to render categories page: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/categories")]
pub async fn add_category(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<AddCategoryForm>,
) -> impl Responder {
    let payload: AddCategoryFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => {
            FlashMessage::error(e.to_string()).send();
            return redirect("/categories");
        }
    };

    match add_category_service(payload, &user, repo.get_ref()) {
        Ok(true) => FlashMessage::success("Category created.").send(),
        Ok(false) => FlashMessage::error("Failed to create category.").send(),
        Err(ServiceError::Unauthorized) => return redirect("/na"),
        Err(ServiceError::NotFound) => FlashMessage::error("Category not found.").send(),
        Err(ServiceError::Form(message)) => FlashMessage::error(message).send(),
        Err(err) => {
            log::error!("Failed to add category: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    }

    redirect("/categories")
}

#[get("/categories/{category_id}/edit")]
pub async fn edit_category(
    category_id: web::Path<i32>,
    user: AuthenticatedUser,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let category_id = match CategoryId::new(category_id.into_inner()) {
        Ok(id) => id,
        Err(e) => {
            FlashMessage::error(e.to_string()).send();
            return redirect("/categories");
        }
    };

    match show_categories_service(&user, repo.get_ref()) {
        Ok(tree) => {
            let Some(category) = tree.find(category_id) else {
                FlashMessage::error("Category not found.").send();
                return redirect("/categories");
            };
            let mut context = base_context(&flash_messages, &user, "categories");
            context.insert("category", category);
            // The edited category is excluded so it cannot become its own
            // ancestor.
            context.insert("parent_options", &parent_options(&tree, Some(category_id)));
            render_template(&tera, "categories/edit.html", &context)
        }
        Err(ServiceError::Unauthorized) => redirect("/na"),
        Err(err) => {
            log::error!("Failed to render category edit page: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/categories/{category_id}/update")]
pub async fn update_category(
    category_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<UpdateCategoryForm>,
) -> impl Responder {
    let mut payload: UpdateCategoryFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => {
            FlashMessage::error(e.to_string()).send();
            return redirect("/categories");
        }
    };

    payload.category_id = match category_id.into_inner().try_into() {
        Ok(id) => id,
        Err(e) => {
            FlashMessage::error(e.to_string()).send();
            return redirect("/categories");
        }
    };

    match update_category_service(payload, &user, repo.get_ref()) {
        Ok(true) => FlashMessage::success("Category updated.").send(),
        Ok(false) => FlashMessage::error("Failed to update category.").send(),
        Err(ServiceError::Unauthorized) => return redirect("/na"),
        Err(ServiceError::NotFound) => FlashMessage::error("Category not found.").send(),
        Err(ServiceError::Form(message)) => FlashMessage::error(message).send(),
        Err(err) => {
            log::error!("Failed to update category: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    }

    redirect("/categories")
}

#[post("/categories/{category_id}/delete")]
pub async fn delete_category(
    category_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<DeleteCategoryForm>,
) -> impl Responder {
    let mut payload: DeleteCategoryFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => {
            FlashMessage::error(e.to_string()).send();
            return redirect("/categories");
        }
    };

    payload.category_id = match category_id.into_inner().try_into() {
        Ok(id) => id,
        Err(e) => {
            FlashMessage::error(e.to_string()).send();
            return redirect("/categories");
        }
    };

    match delete_category_service(payload, &user, repo.get_ref()) {
        Ok(true) => FlashMessage::success("Category deleted.").send(),
        Ok(false) => FlashMessage::error("Failed to delete category.").send(),
        Err(ServiceError::Unauthorized) => return redirect("/na"),
        Err(ServiceError::NotFound) => FlashMessage::error("Category not found.").send(),
        Err(ServiceError::Form(message)) => FlashMessage::error(message).send(),
        Err(err) => {
            log::error!("Failed to delete category: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    }

    redirect("/categories")
}

#[post("/categories/{category_id}/toggle")]
pub async fn toggle_expand(
    category_id: web::Path<i32>,
    _user: AuthenticatedUser,
    session: Session,
) -> impl Responder {
    match CategoryId::new(category_id.into_inner()) {
        Ok(id) => {
            let mut selection = expansion_from_session(&session);
            selection.toggle_expand(id);
            store_expansion(&session, &selection);
        }
        Err(e) => FlashMessage::error(e.to_string()).send(),
    }

    redirect("/categories")
}
