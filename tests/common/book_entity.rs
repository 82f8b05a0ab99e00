use async_trait::async_trait;
use repokit::{
    ApplyUpdate, Repository, RepositoryError,
    criteria::{CompareOperator, SearchRelation, SearchableField},
};
use sea_orm::{ActiveValue, DatabaseConnection, entity::prelude::*};
use uuid::Uuid;

use super::author_entity::{self, Author};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "books")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    pub genre: String,
    pub author_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::author_entity::Entity",
        from = "Column::AuthorId",
        to = "super::author_entity::Column::Id"
    )]
    Author,
}

impl Related<super::author_entity::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Clone, Debug, PartialEq)]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    pub genre: String,
    pub author_id: Uuid,
    pub author: Option<Author>,
}

impl From<Model> for Book {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            genre: model.genre,
            author_id: model.author_id,
            author: None,
        }
    }
}

pub struct BookCreate {
    pub title: String,
    pub genre: String,
    pub author_id: Uuid,
}

impl From<BookCreate> for ActiveModel {
    fn from(create: BookCreate) -> Self {
        Self {
            id: ActiveValue::Set(Uuid::new_v4()),
            title: ActiveValue::Set(create.title),
            genre: ActiveValue::Set(create.genre),
            author_id: ActiveValue::Set(create.author_id),
        }
    }
}

#[derive(Default)]
pub struct BookUpdate {
    pub title: Option<String>,
    pub genre: Option<String>,
}

impl ApplyUpdate<ActiveModel> for BookUpdate {
    fn apply_update(self, mut existing: ActiveModel) -> Result<ActiveModel, DbErr> {
        if let Some(title) = self.title {
            existing.title = ActiveValue::Set(title);
        }
        if let Some(genre) = self.genre {
            existing.genre = ActiveValue::Set(genre);
        }
        Ok(existing)
    }
}

#[async_trait]
impl Repository for Book {
    type EntityType = Entity;
    type ColumnType = Column;
    type ActiveModelType = ActiveModel;
    type CreateModel = BookCreate;
    type UpdateModel = BookUpdate;

    const ID_COLUMN: Column = Column::Id;
    const TABLE_NAME: &'static str = "books";
    const RESOURCE_NAME_SINGULAR: &'static str = "book";
    const RESOURCE_NAME_PLURAL: &'static str = "books";

    fn searchable_fields() -> Vec<SearchableField> {
        vec![
            SearchableField::new("title"),
            SearchableField::with_operator("genre", CompareOperator::Like),
            SearchableField::new("author.name"),
        ]
    }

    fn search_relations() -> Vec<SearchRelation> {
        vec![SearchRelation::new("author", "authors", "author_id", "id")]
    }

    fn sortable_columns() -> Vec<(&'static str, Column)> {
        vec![
            ("id", Column::Id),
            ("title", Column::Title),
            ("genre", Column::Genre),
        ]
    }

    async fn eager_load(
        db: &DatabaseConnection,
        items: Vec<Self>,
        relations: &[String],
    ) -> Result<Vec<Self>, RepositoryError> {
        if !relations.iter().any(|relation| relation == "author") {
            return Ok(items);
        }
        let mut items = items;
        for book in &mut items {
            book.author = author_entity::Entity::find_by_id(book.author_id)
                .one(db)
                .await
                .map_err(RepositoryError::database)?
                .map(Author::from);
        }
        Ok(items)
    }
}
