use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::requirement;
use crate::utils::deserialize::{lenient_bool, lenient_id, present_nullable_string};

#[derive(Debug, Serialize, ToSchema)]
pub struct RequirementItem {
    pub id: i32,
    #[schema(example = "Weekly Report")]
    pub name: String,
    pub description: String,
    pub is_required: bool,
    #[schema(example = "weekly-report")]
    pub slug: Option<String>,
}

impl From<requirement::Model> for RequirementItem {
    fn from(model: requirement::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            is_required: model.is_required,
            slug: model.slug,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateRequirementRequest {
    #[schema(example = "Medical Certificate")]
    pub name: Option<String>,
    pub description: Option<String>,
    /// Accepts `true`/`false`, `1`/`0` or `"1"`/`"0"`. Defaults to optional.
    #[serde(default, deserialize_with = "lenient_bool")]
    #[schema(value_type = Option<bool>)]
    pub is_required: Option<bool>,
    pub slug: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateRequirementRequest {
    #[serde(default, deserialize_with = "lenient_id")]
    #[schema(value_type = Option<i32>, example = 1)]
    pub id: Option<i32>,
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_bool")]
    #[schema(value_type = Option<bool>)]
    pub is_required: Option<bool>,
    /// Blank or `null` removes the slug.
    #[serde(default, deserialize_with = "present_nullable_string")]
    #[schema(value_type = Option<String>)]
    pub slug: Option<Option<String>>,
}
