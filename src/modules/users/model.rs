use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::utils::pagination::{PaginationMeta, PaginationParams};

/// A user in the system. The password hash and the deactivation flag
/// never leave the service layer.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub description: Option<String>,
    pub email: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Reduced user shape exposed by the administrator listing.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct UserSummary {
    pub id: Uuid,
    pub email: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProfileResponse {
    pub full_name: String,
    pub email: String,
    pub description: Option<String>,
}

/// Only the description is client-mutable; names and email are fixed at
/// registration.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateDescriptionDto {
    #[validate(length(max = 500, message = "description must be at most 500 characters"))]
    pub description: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UserFilterParams {
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedUsersResponse {
    pub users: Vec<UserSummary>,
    pub meta: PaginationMeta,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_serialization_excludes_nothing_public() {
        let user = User {
            id: Uuid::new_v4(),
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            description: Some("hello".to_string()),
            email: "john@example.com".to_string(),
            created_at: chrono::Utc::now(),
        };

        let serialized = serde_json::to_string(&user).unwrap();
        assert!(serialized.contains("john@example.com"));
        assert!(!serialized.contains("password"));
    }

    #[test]
    fn test_update_description_dto_deserialize() {
        let dto: UpdateDescriptionDto =
            serde_json::from_str(r#"{"description":"new text"}"#).unwrap();
        assert_eq!(dto.description, "new text");
    }

    #[test]
    fn test_update_description_dto_missing_key_fails() {
        let result: Result<UpdateDescriptionDto, _> = serde_json::from_str(r#"{}"#);
        assert!(result.is_err());
    }
}
