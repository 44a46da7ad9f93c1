use anyhow::Result;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

use crate::entities::requirement;

pub struct NewRequirement {
    pub name: String,
    pub description: String,
    pub is_required: bool,
    pub slug: Option<String>,
}

#[derive(Debug, Default)]
pub struct RequirementUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub is_required: Option<bool>,
    pub slug: Option<Option<String>>,
}

pub struct RequirementRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> RequirementRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, requirement_id: i32) -> Result<Option<requirement::Model>> {
        let requirement = requirement::Entity::find_by_id(requirement_id)
            .one(self.db)
            .await?;
        Ok(requirement)
    }

    /// Catalog order: ascending id.
    pub async fn find_all(&self) -> Result<Vec<requirement::Model>> {
        let requirements = requirement::Entity::find()
            .order_by_asc(requirement::Column::Id)
            .all(self.db)
            .await?;
        Ok(requirements)
    }

    pub async fn find_ids_by_slug(&self, slug: &str) -> Result<Vec<i32>> {
        let ids = requirement::Entity::find()
            .select_only()
            .column(requirement::Column::Id)
            .filter(requirement::Column::Slug.eq(slug))
            .into_tuple::<i32>()
            .all(self.db)
            .await?;
        Ok(ids)
    }

    pub async fn slug_taken(&self, slug: &str, except_id: Option<i32>) -> Result<bool> {
        let mut query = requirement::Entity::find().filter(requirement::Column::Slug.eq(slug));
        if let Some(id) = except_id {
            query = query.filter(requirement::Column::Id.ne(id));
        }
        Ok(query.count(self.db).await? > 0)
    }

    pub async fn create(&self, new_requirement: NewRequirement) -> Result<requirement::Model> {
        let requirement_model = requirement::ActiveModel {
            name: Set(new_requirement.name),
            description: Set(new_requirement.description),
            is_required: Set(new_requirement.is_required),
            slug: Set(new_requirement.slug),
            ..Default::default()
        };
        let result = requirement_model.insert(self.db).await?;
        Ok(result)
    }

    pub async fn update(&self, requirement_id: i32, updates: RequirementUpdate) -> Result<()> {
        let mut requirement_model = requirement::ActiveModel {
            id: Set(requirement_id),
            ..Default::default()
        };
        if let Some(name) = updates.name {
            requirement_model.name = Set(name);
        }
        if let Some(description) = updates.description {
            requirement_model.description = Set(description);
        }
        if let Some(is_required) = updates.is_required {
            requirement_model.is_required = Set(is_required);
        }
        if let Some(slug) = updates.slug {
            requirement_model.slug = Set(slug);
        }
        requirement_model.update(self.db).await?;
        Ok(())
    }

    pub async fn delete(&self, requirement_id: i32) -> Result<u64> {
        let result = requirement::Entity::delete_by_id(requirement_id)
            .exec(self.db)
            .await?;
        Ok(result.rows_affected)
    }
}
