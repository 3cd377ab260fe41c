use crate::auth::AuthContext;
use crate::domain::types::CategoryId;
use crate::dto::categories::CategoryDto;
use crate::forms::categories::AddCategoryFormPayload;
use crate::repository::{CategoryReader, CategoryWriter, UserReader};

use super::auth::current_user;
use super::{ServiceError, ServiceResult, read_error, write_error};

/// All categories, alphabetically.
pub fn list_categories<R>(repo: &R) -> ServiceResult<Vec<CategoryDto>>
where
    R: CategoryReader,
{
    match repo.list_categories() {
        Ok(categories) => Ok(categories.into_iter().map(CategoryDto::from).collect()),
        Err(e) => Err(read_error("list categories", e)),
    }
}

pub fn show_category<R>(category_id: CategoryId, repo: &R) -> ServiceResult<CategoryDto>
where
    R: CategoryReader,
{
    match repo.get_category_by_id(category_id) {
        Ok(Some(category)) => Ok(category.into()),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => Err(read_error("get category", e)),
    }
}

/// Create a category. Names are unique; a duplicate is a conflict.
pub fn add_category<R>(
    payload: AddCategoryFormPayload,
    auth: &AuthContext,
    repo: &R,
) -> ServiceResult<CategoryDto>
where
    R: CategoryReader + CategoryWriter + UserReader,
{
    let user = current_user(auth, repo)?;

    match repo.get_category_by_name(&payload.name) {
        Ok(None) => {}
        Ok(Some(_)) => {
            return Err(ServiceError::Conflict {
                message: format!("Category '{}' already exists", payload.name),
                code: "UNIQUE",
            });
        }
        Err(e) => return Err(read_error("look up category", e)),
    }

    let category = repo
        .create_category(&payload.into_new_category())
        .map_err(|e| write_error("create category", e))?;

    log::info!(
        "User {} created category {} ({})",
        user.profile_id,
        category.id,
        category.name
    );
    Ok(category.into())
}
