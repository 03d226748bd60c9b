use std::sync::Arc;

use serde::de::DeserializeOwned;
use validator::Validate;

use crate::controller::{ListOptions, PaginationController};
use crate::domain::list_query::ListQuery;
use crate::domain::resource::{Resource, ResourceKind};
use crate::domain::types::EntityId;
use crate::fetcher::{FetchRequest, Fetcher, Method};
use crate::services::{ServiceError, ServiceResult};

/// One page of rows plus the total row count of the listing.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
}

fn collection_path(kind: ResourceKind, parent: Option<EntityId>) -> ServiceResult<String> {
    kind.collection_path(parent)
        .ok_or(ServiceError::MissingParent(kind))
}

fn member_path(kind: ResourceKind, parent: Option<EntityId>, id: EntityId) -> ServiceResult<String> {
    kind.member_path(parent, id)
        .ok_or(ServiceError::MissingParent(kind))
}

/// Fetches one page of any resource collection.
pub async fn list_by_kind<T, F>(
    fetcher: &F,
    kind: ResourceKind,
    parent: Option<EntityId>,
    query: &ListQuery,
) -> ServiceResult<Page<T>>
where
    T: DeserializeOwned,
    F: Fetcher + ?Sized,
{
    let path = collection_path(kind, parent)?;
    let response = fetcher
        .fetch(&path, FetchRequest::get().params(query.to_params()))
        .await?;

    let total = response.total_count();
    let items = serde_json::from_value(response.body)?;

    Ok(Page { items, total })
}

pub async fn get_by_kind<T, F>(
    fetcher: &F,
    kind: ResourceKind,
    parent: Option<EntityId>,
    id: EntityId,
) -> ServiceResult<T>
where
    T: DeserializeOwned,
    F: Fetcher + ?Sized,
{
    let path = member_path(kind, parent, id)?;
    let response = fetcher.fetch(&path, FetchRequest::get()).await?;
    Ok(serde_json::from_value(response.body)?)
}

pub async fn delete_by_kind<F>(
    fetcher: &F,
    kind: ResourceKind,
    parent: Option<EntityId>,
    id: EntityId,
) -> ServiceResult<()>
where
    F: Fetcher + ?Sized,
{
    let path = member_path(kind, parent, id)?;
    fetcher.fetch(&path, FetchRequest::delete()).await?;
    log::info!("Deleted {kind} {id}");
    Ok(())
}

/// Returns the requested page of a typed resource.
pub async fn list_page<R, F>(
    fetcher: &F,
    parent: Option<EntityId>,
    query: &ListQuery,
) -> ServiceResult<Page<R>>
where
    R: Resource,
    F: Fetcher + ?Sized,
{
    list_by_kind(fetcher, R::KIND, parent, query).await
}

pub async fn get_entity<R, F>(fetcher: &F, parent: Option<EntityId>, id: EntityId) -> ServiceResult<R>
where
    R: Resource,
    F: Fetcher + ?Sized,
{
    get_by_kind(fetcher, R::KIND, parent, id).await
}

/// Validates the form and creates the entity, returning the stored row.
pub async fn create_entity<R, F>(
    fetcher: &F,
    parent: Option<EntityId>,
    form: &R::Form,
) -> ServiceResult<R>
where
    R: Resource,
    F: Fetcher + ?Sized,
{
    if let Err(err) = form.validate() {
        log::error!("Refusing to create {}: {err}", R::KIND);
        return Err(ServiceError::Validation(err));
    }

    let path = collection_path(R::KIND, parent)?;
    let request = FetchRequest::with_json(Method::Post, form)?;
    let response = fetcher.fetch(&path, request).await?;
    Ok(serde_json::from_value(response.body)?)
}

/// Validates the form and replaces the entity, returning the stored row.
pub async fn update_entity<R, F>(
    fetcher: &F,
    parent: Option<EntityId>,
    id: EntityId,
    form: &R::Form,
) -> ServiceResult<R>
where
    R: Resource,
    F: Fetcher + ?Sized,
{
    if let Err(err) = form.validate() {
        log::error!("Refusing to update {} {id}: {err}", R::KIND);
        return Err(ServiceError::Validation(err));
    }

    let path = member_path(R::KIND, parent, id)?;
    let request = FetchRequest::with_json(Method::Put, form)?;
    let response = fetcher.fetch(&path, request).await?;
    Ok(serde_json::from_value(response.body)?)
}

pub async fn delete_entity<R, F>(fetcher: &F, parent: Option<EntityId>, id: EntityId) -> ServiceResult<()>
where
    R: Resource,
    F: Fetcher + ?Sized,
{
    delete_by_kind(fetcher, R::KIND, parent, id).await
}

/// Builds a list controller over a typed resource collection.
///
/// A nested resource without a parent gets an unset endpoint, so the
/// controller shows an empty listing until it is pointed somewhere.
pub fn list_controller<R, F>(
    fetcher: Arc<F>,
    parent: Option<EntityId>,
    options: ListOptions,
) -> PaginationController<R, F>
where
    R: Resource + Sync,
    F: Fetcher + ?Sized,
{
    PaginationController::new(fetcher, R::KIND.collection_path(parent), options)
}
