use chrono::Utc;
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::category::NewCategory;
use crate::domain::types::{
    CategoryId, CategoryName, CategorySlug, SortOrder, TypeConstraintError,
};
use crate::forms::empty_string_as_none;

#[derive(Deserialize, Validate)]
pub struct AddCategoryForm {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub slug: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub parent_id: Option<i32>,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub order: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AddCategoryFormPayload {
    pub name: CategoryName,
    pub slug: CategorySlug,
    pub parent_id: Option<CategoryId>,
    pub order: SortOrder,
}

impl AddCategoryFormPayload {
    pub fn into_new_category(self) -> NewCategory {
        let now = Utc::now().naive_utc();
        NewCategory {
            name: self.name,
            slug: self.slug,
            parent_id: self.parent_id,
            order: self.order,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Error)]
pub enum AddCategoryFormError {
    #[error("Add category form validation failed: {0}")]
    Validation(String),
    #[error("Add category form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for AddCategoryFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for AddCategoryFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<AddCategoryForm> for AddCategoryFormPayload {
    type Error = AddCategoryFormError;

    fn try_from(value: AddCategoryForm) -> Result<Self, Self::Error> {
        value.validate()?;

        Ok(Self {
            name: CategoryName::new(value.name)?,
            slug: CategorySlug::new(value.slug)?,
            parent_id: value.parent_id.map(CategoryId::new).transpose()?,
            order: SortOrder::new(value.order)?,
        })
    }
}

#[derive(Deserialize, Validate)]
pub struct UpdateCategoryForm {
    #[validate(range(min = 1))]
    pub category_id: i32,
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub slug: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub parent_id: Option<i32>,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub order: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateCategoryFormPayload {
    pub category_id: CategoryId,
    pub name: CategoryName,
    pub slug: CategorySlug,
    pub parent_id: Option<CategoryId>,
    pub order: SortOrder,
}

#[derive(Debug, Error)]
pub enum UpdateCategoryFormError {
    #[error("Update category form validation failed: {0}")]
    Validation(String),
    #[error("Update category form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for UpdateCategoryFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for UpdateCategoryFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<UpdateCategoryForm> for UpdateCategoryFormPayload {
    type Error = UpdateCategoryFormError;

    fn try_from(value: UpdateCategoryForm) -> Result<Self, Self::Error> {
        value.validate()?;

        Ok(Self {
            category_id: CategoryId::new(value.category_id)?,
            name: CategoryName::new(value.name)?,
            slug: CategorySlug::new(value.slug)?,
            parent_id: value.parent_id.map(CategoryId::new).transpose()?,
            order: SortOrder::new(value.order)?,
        })
    }
}

#[derive(Deserialize, Validate)]
pub struct DeleteCategoryForm {
    #[validate(range(min = 1))]
    pub category_id: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeleteCategoryFormPayload {
    pub category_id: CategoryId,
}

#[derive(Debug, Error)]
pub enum DeleteCategoryFormError {
    #[error("Delete category form validation failed: {0}")]
    Validation(String),
    #[error("Delete category form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for DeleteCategoryFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for DeleteCategoryFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<DeleteCategoryForm> for DeleteCategoryFormPayload {
    type Error = DeleteCategoryFormError;

    fn try_from(value: DeleteCategoryForm) -> Result<Self, Self::Error> {
        value.validate()?;
        Ok(Self {
            category_id: CategoryId::new(value.category_id)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_category_builds_typed_payload() {
        let form = AddCategoryForm {
            name: "  Motion Design ".to_string(),
            slug: "motion-design".to_string(),
            parent_id: Some(2),
            order: 3,
        };

        let payload: AddCategoryFormPayload = form.try_into().unwrap();
        assert_eq!(payload.name.as_str(), "Motion Design");
        assert_eq!(payload.slug.as_str(), "motion-design");
        assert_eq!(payload.parent_id.unwrap().get(), 2);
        assert_eq!(payload.order.get(), 3);
    }

    #[test]
    fn add_category_rejects_bad_slug() {
        let form = AddCategoryForm {
            name: "Motion".to_string(),
            slug: "-motion".to_string(),
            parent_id: None,
            order: 0,
        };

        let payload: Result<AddCategoryFormPayload, _> = form.try_into();
        assert!(payload.is_err());
    }

    #[test]
    fn update_category_keeps_root_parent_as_none() {
        let form = UpdateCategoryForm {
            category_id: 1,
            name: "Motion".to_string(),
            slug: "motion".to_string(),
            parent_id: None,
            order: 0,
        };

        let payload: UpdateCategoryFormPayload = form.try_into().unwrap();
        assert_eq!(payload.parent_id, None);
    }

    #[test]
    fn empty_parent_select_deserializes_to_none() {
        let form: AddCategoryForm =
            serde_json::from_str(r#"{"name":"Motion","slug":"motion","parent_id":"","order":0}"#)
                .unwrap();
        assert_eq!(form.parent_id, None);
    }
}
