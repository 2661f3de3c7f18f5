use crate::{
    database::RequestContext,
    models::{CreateUserRequest, UserDocument, UserResponse},
    utils::error::ApiError,
};
use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId};

const COLLECTION: &str = "users";

/// Inserts a new 'user'. The identifier is always generated here; whatever id
/// the client sent is discarded.
pub async fn add_user(
    ctx: &RequestContext,
    request: CreateUserRequest,
) -> Result<UserResponse, ApiError> {
    let document = UserDocument {
        id: ObjectId::new(),
        name: request.name,
        tags: request.tags,
    };

    ctx.collection::<UserDocument>(COLLECTION)
        .insert_one(&document)
        .await
        .map_err(|e| ApiError::Storage(e.to_string()))?;

    Ok(document.into())
}

/// Fetches one 'user' by its hex ObjectId.
pub async fn get_user(ctx: &RequestContext, id_hex: &str) -> Result<UserResponse, ApiError> {
    let oid = ObjectId::parse_str(id_hex)
        .map_err(|_| ApiError::InvalidIdentifier("Invalid ObjectID".to_string()))?;

    let found = ctx
        .collection::<UserDocument>(COLLECTION)
        .find_one(doc! { "_id": oid })
        .await
        .map_err(|e| ApiError::Storage(e.to_string()))?;

    match found {
        Some(document) => Ok(document.into()),
        None => Err(ApiError::NotFound(format!("no user with id {}", id_hex))),
    }
}

/// Fetches every 'user' in the collection, unfiltered.
pub async fn get_users(ctx: &RequestContext) -> Result<Vec<UserResponse>, ApiError> {
    let cursor = ctx
        .collection::<UserDocument>(COLLECTION)
        .find(doc! {})
        .await
        .map_err(|e| ApiError::Storage(e.to_string()))?;

    let documents: Vec<UserDocument> = cursor
        .try_collect()
        .await
        .map_err(|e| ApiError::Storage(e.to_string()))?;

    Ok(documents.into_iter().map(UserResponse::from).collect())
}
