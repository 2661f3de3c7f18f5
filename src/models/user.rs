use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// A 'user' as stored in the `users` collection.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct UserDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    pub tags: Vec<String>,
}

/// Create payload. A client-supplied `id` is accepted and silently discarded,
/// the server always assigns its own.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct CreateUserRequest {
    pub name: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    #[allow(dead_code)]
    pub id: Option<String>,
}

/// A 'user' as returned over HTTP, with the ObjectId rendered as hex.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, utoipa::ToSchema)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub tags: Vec<String>,
}

impl From<UserDocument> for UserResponse {
    fn from(doc: UserDocument) -> Self {
        Self {
            id: doc.id.to_hex(),
            name: doc.name,
            tags: doc.tags,
        }
    }
}
