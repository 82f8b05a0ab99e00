//! The repository facade over a Sea-ORM entity.

use async_trait::async_trait;
use sea_orm::{
    Condition, DatabaseConnection, EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, entity::prelude::*,
};
use uuid::Uuid;

use crate::config::RepositoryConfig;
use crate::criteria::{
    SearchRelation, SearchableField, SortDirection, apply_criteria, resolve_sort_strict,
};
use crate::errors::RepositoryError;
use crate::models::CriteriaParams;
use crate::pagination::Page;

/// Merge an update payload into an existing active model.
pub trait ApplyUpdate<A> {
    /// # Errors
    ///
    /// Returns a `DbErr` when a field fails to convert.
    fn apply_update(self, existing: A) -> Result<A, DbErr>;
}

/// A uniform facade for CRUD, filtering, sorting, and pagination of a
/// database-backed entity.
///
/// Implementers declare their searchable surface at compile time —
/// [`searchable_fields`](Repository::searchable_fields) is required,
/// so an entity without the declaration is a type error, not a runtime
/// surprise — and inherit the full read/write/bulk surface as default
/// methods delegating to the Sea-ORM query builder.
#[async_trait]
pub trait Repository: Sized + Send + Sync
where
    Self::EntityType: EntityTrait + Sync,
    Self::ActiveModelType: ActiveModelTrait + ActiveModelBehavior + Send + Sync,
    <Self::EntityType as EntityTrait>::Model: Sync + IntoActiveModel<Self::ActiveModelType>,
    <<Self::EntityType as EntityTrait>::PrimaryKey as PrimaryKeyTrait>::ValueType: From<Uuid>,
    Self: From<<Self::EntityType as EntityTrait>::Model>,
{
    type EntityType: EntityTrait + Sync;
    type ColumnType: ColumnTrait + std::fmt::Debug;
    type ActiveModelType: ActiveModelTrait<Entity = Self::EntityType>;
    type CreateModel: Into<Self::ActiveModelType> + Send;
    type UpdateModel: Send + Sync + ApplyUpdate<Self::ActiveModelType>;

    const ID_COLUMN: Self::ColumnType;
    const TABLE_NAME: &'static str;
    const RESOURCE_NAME_SINGULAR: &'static str;
    const RESOURCE_NAME_PLURAL: &'static str;

    /// Fields eligible for dynamic search. An entity with no
    /// searchable surface declares an empty set explicitly.
    fn searchable_fields() -> Vec<SearchableField>;

    /// Relations usable in relation-qualified search fields.
    #[must_use]
    fn search_relations() -> Vec<SearchRelation> {
        vec![]
    }

    /// Columns accepted by the strict list-view sort variant.
    #[must_use]
    fn sortable_columns() -> Vec<(&'static str, Self::ColumnType)> {
        vec![("id", Self::ID_COLUMN)]
    }

    /// Ordering applied to un-sorted listings.
    #[must_use]
    fn default_sort() -> (Self::ColumnType, SortDirection) {
        (Self::ID_COLUMN, SortDirection::Asc)
    }

    /// Load the requested relations onto fetched items. Entities with
    /// eager-loadable relations override this; the default ignores the
    /// directive.
    async fn eager_load(
        db: &DatabaseConnection,
        items: Vec<Self>,
        relations: &[String],
    ) -> Result<Vec<Self>, RepositoryError> {
        let _ = (db, relations);
        Ok(items)
    }

    /// Find by primary key; absence is a `NotFound` error.
    async fn find_one(db: &DatabaseConnection, id: Uuid) -> Result<Self, RepositoryError> {
        Self::EntityType::find_by_id(id)
            .one(db)
            .await
            .map_err(RepositoryError::database)?
            .map(Self::from)
            .ok_or_else(|| {
                RepositoryError::not_found(Self::RESOURCE_NAME_SINGULAR, Some(id.to_string()))
            })
    }

    /// Find by primary key; absence is `None`.
    async fn find_one_optional(
        db: &DatabaseConnection,
        id: Uuid,
    ) -> Result<Option<Self>, RepositoryError> {
        Ok(Self::EntityType::find_by_id(id)
            .one(db)
            .await
            .map_err(RepositoryError::database)?
            .map(Self::from))
    }

    /// Find by primary key and load the given relations.
    async fn find_one_with(
        db: &DatabaseConnection,
        id: Uuid,
        relations: &[String],
    ) -> Result<Self, RepositoryError> {
        let item = Self::find_one(db, id).await?;
        let mut items = Self::eager_load(db, vec![item], relations).await?;
        items.pop().ok_or_else(|| {
            RepositoryError::not_found(Self::RESOURCE_NAME_SINGULAR, Some(id.to_string()))
        })
    }

    /// First record matching a condition; absence is `NotFound`.
    async fn query_one(
        db: &DatabaseConnection,
        condition: Condition,
    ) -> Result<Self, RepositoryError> {
        Self::EntityType::find()
            .filter(condition)
            .one(db)
            .await
            .map_err(RepositoryError::database)?
            .map(Self::from)
            .ok_or_else(|| RepositoryError::not_found(Self::RESOURCE_NAME_SINGULAR, None))
    }

    /// Single-record lookup by column value (the find-by-slug
    /// pattern); absence is `NotFound`.
    async fn find_one_by(
        db: &DatabaseConnection,
        column: Self::ColumnType,
        value: sea_orm::Value,
    ) -> Result<Self, RepositoryError> {
        Self::query_one(db, Condition::all().add(column.eq(value))).await
    }

    /// All records matching a condition.
    async fn find_many(
        db: &DatabaseConnection,
        condition: Condition,
    ) -> Result<Vec<Self>, RepositoryError> {
        Ok(Self::EntityType::find()
            .filter(condition)
            .all(db)
            .await
            .map_err(RepositoryError::database)?
            .into_iter()
            .map(Self::from)
            .collect())
    }

    /// All records matching a condition, with the given relations
    /// loaded.
    async fn find_many_with(
        db: &DatabaseConnection,
        condition: Condition,
        relations: &[String],
    ) -> Result<Vec<Self>, RepositoryError> {
        let items = Self::find_many(db, condition).await?;
        Self::eager_load(db, items, relations).await
    }

    /// Every record, default-ordered.
    async fn all(db: &DatabaseConnection) -> Result<Vec<Self>, RepositoryError> {
        let (column, direction) = Self::default_sort();
        Ok(Self::EntityType::find()
            .order_by(column, direction.into_order())
            .all(db)
            .await
            .map_err(RepositoryError::database)?
            .into_iter()
            .map(Self::from)
            .collect())
    }

    /// Simple list view: sort taken from `sort_by`/`sort_dir` through
    /// the strict resolver, so only declared sortable columns are
    /// honored; anything else falls back to the default ordering.
    async fn list(
        db: &DatabaseConnection,
        params: &CriteriaParams,
    ) -> Result<Vec<Self>, RepositoryError> {
        let (column, direction) = resolve_sort_strict(
            params.sort_by.as_deref(),
            params.sort_dir.as_deref(),
            &Self::sortable_columns(),
        )
        .unwrap_or_else(Self::default_sort);
        Ok(Self::EntityType::find()
            .order_by(column, direction.into_order())
            .all(db)
            .await
            .map_err(RepositoryError::database)?
            .into_iter()
            .map(Self::from)
            .collect())
    }

    /// Whether any record matches the condition.
    async fn exists(db: &DatabaseConnection, condition: Condition) -> Result<bool, RepositoryError> {
        Ok(Self::count(db, condition).await? > 0)
    }

    /// Count of records matching the condition.
    async fn count(db: &DatabaseConnection, condition: Condition) -> Result<u64, RepositoryError> {
        Self::EntityType::find()
            .filter(condition)
            .count(db)
            .await
            .map_err(RepositoryError::database)
    }

    /// Distinct records matching a condition, default-ordered.
    async fn distinct(
        db: &DatabaseConnection,
        condition: Condition,
    ) -> Result<Vec<Self>, RepositoryError> {
        let (column, direction) = Self::default_sort();
        Ok(Self::EntityType::find()
            .filter(condition)
            .order_by(column, direction.into_order())
            .distinct()
            .all(db)
            .await
            .map_err(RepositoryError::database)?
            .into_iter()
            .map(Self::from)
            .collect())
    }

    /// List with criteria applied (search, sort, projection,
    /// eager-load), without pagination.
    async fn get_all(
        db: &DatabaseConnection,
        params: &CriteriaParams,
        config: &RepositoryConfig,
    ) -> Result<Vec<Self>, RepositoryError> {
        let application = apply_criteria::<Self>(Self::EntityType::find(), params, config)?;
        let items: Vec<Self> = application
            .query
            .all(db)
            .await
            .map_err(RepositoryError::database)?
            .into_iter()
            .map(Self::from)
            .collect();
        Self::eager_load(db, items, &application.eager).await
    }

    /// Paginated list with criteria applied. Page size resolution:
    /// explicit request value first, then the configured limit.
    async fn get_paginated(
        db: &DatabaseConnection,
        params: &CriteriaParams,
        config: &RepositoryConfig,
    ) -> Result<Page<Self>, RepositoryError> {
        let application = apply_criteria::<Self>(Self::EntityType::find(), params, config)?;
        let per_page = params.per_page.unwrap_or(config.pagination_limit).max(1);
        let page = params.page.unwrap_or(1).max(1);

        let paginator = application.query.paginate(db, per_page);
        let total = paginator
            .num_items()
            .await
            .map_err(RepositoryError::database)?;
        let models = paginator
            .fetch_page(page - 1)
            .await
            .map_err(RepositoryError::database)?;
        let items = Self::eager_load(
            db,
            models.into_iter().map(Self::from).collect(),
            &application.eager,
        )
        .await?;
        Ok(Page::new(items, total, page, per_page))
    }

    /// Insert one record.
    async fn create(
        db: &DatabaseConnection,
        create_model: Self::CreateModel,
    ) -> Result<Self, RepositoryError> {
        let active_model: Self::ActiveModelType = create_model.into();
        let model = active_model
            .insert(db)
            .await
            .map_err(RepositoryError::database)?;
        Ok(Self::from(model))
    }

    /// Bulk insert. Goes through the entity's insert statement
    /// directly, so per-record lifecycle hooks do not run.
    async fn create_many(
        db: &DatabaseConnection,
        create_models: Vec<Self::CreateModel>,
    ) -> Result<u64, RepositoryError> {
        if create_models.is_empty() {
            return Ok(0);
        }
        let count = create_models.len() as u64;
        Self::EntityType::insert_many(create_models.into_iter().map(Into::into))
            .exec(db)
            .await
            .map_err(RepositoryError::database)?;
        Ok(count)
    }

    /// Find and update one record; the lookup miss is `NotFound`.
    async fn update(
        db: &DatabaseConnection,
        id: Uuid,
        update_model: Self::UpdateModel,
    ) -> Result<Self, RepositoryError> {
        let model = Self::EntityType::find_by_id(id)
            .one(db)
            .await
            .map_err(RepositoryError::database)?
            .ok_or_else(|| {
                RepositoryError::not_found(Self::RESOURCE_NAME_SINGULAR, Some(id.to_string()))
            })?;
        let existing: Self::ActiveModelType = model.into_active_model();
        let merged = update_model
            .apply_update(existing)
            .map_err(RepositoryError::database)?;
        let updated = merged.update(db).await.map_err(RepositoryError::database)?;
        Ok(Self::from(updated))
    }

    /// Apply one update payload to every given id; zero affected rows
    /// is a `WriteFailure`.
    async fn update_many(
        db: &DatabaseConnection,
        ids: Vec<Uuid>,
        update_model: Self::UpdateModel,
    ) -> Result<u64, RepositoryError> {
        let values = update_model
            .apply_update(<Self::ActiveModelType as ActiveModelTrait>::default())
            .map_err(RepositoryError::database)?;
        let result = Self::EntityType::update_many()
            .set(values)
            .filter(Self::ID_COLUMN.is_in(ids))
            .exec(db)
            .await
            .map_err(RepositoryError::database)?;
        if result.rows_affected == 0 {
            return Err(RepositoryError::write_failure("bulk update"));
        }
        Ok(result.rows_affected)
    }

    /// Look up and delete one record. The lookup miss is `NotFound`; a
    /// delete reporting zero rows is a `WriteFailure`.
    async fn delete(db: &DatabaseConnection, id: Uuid) -> Result<Uuid, RepositoryError> {
        Self::find_one(db, id).await?;
        let result = Self::EntityType::delete_by_id(id)
            .exec(db)
            .await
            .map_err(RepositoryError::database)?;
        if result.rows_affected == 0 {
            return Err(RepositoryError::write_failure("delete"));
        }
        Ok(id)
    }

    /// Delete many records by id; zero affected rows is a
    /// `WriteFailure`.
    async fn delete_many(
        db: &DatabaseConnection,
        ids: Vec<Uuid>,
    ) -> Result<u64, RepositoryError> {
        let result = Self::EntityType::delete_many()
            .filter(Self::ID_COLUMN.is_in(ids))
            .exec(db)
            .await
            .map_err(RepositoryError::database)?;
        if result.rows_affected == 0 {
            return Err(RepositoryError::write_failure("bulk delete"));
        }
        Ok(result.rows_affected)
    }
}
