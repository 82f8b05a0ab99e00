use repokit::{
    ApplyUpdate, Repository,
    criteria::{SearchableField, sort::SortDirection},
};
use sea_orm::{ActiveValue, entity::prelude::*};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "authors")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::book_entity::Entity")]
    Books,
}

impl Related<super::book_entity::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Books.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Clone, Debug, PartialEq)]
pub struct Author {
    pub id: Uuid,
    pub name: String,
}

impl From<Model> for Author {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
        }
    }
}

pub struct AuthorCreate {
    pub name: String,
}

impl From<AuthorCreate> for ActiveModel {
    fn from(create: AuthorCreate) -> Self {
        Self {
            id: ActiveValue::Set(Uuid::new_v4()),
            name: ActiveValue::Set(create.name),
        }
    }
}

#[derive(Default)]
pub struct AuthorUpdate {
    pub name: Option<String>,
}

impl ApplyUpdate<ActiveModel> for AuthorUpdate {
    fn apply_update(self, mut existing: ActiveModel) -> Result<ActiveModel, DbErr> {
        if let Some(name) = self.name {
            existing.name = ActiveValue::Set(name);
        }
        Ok(existing)
    }
}

impl Repository for Author {
    type EntityType = Entity;
    type ColumnType = Column;
    type ActiveModelType = ActiveModel;
    type CreateModel = AuthorCreate;
    type UpdateModel = AuthorUpdate;

    const ID_COLUMN: Column = Column::Id;
    const TABLE_NAME: &'static str = "authors";
    const RESOURCE_NAME_SINGULAR: &'static str = "author";
    const RESOURCE_NAME_PLURAL: &'static str = "authors";

    fn searchable_fields() -> Vec<SearchableField> {
        vec![SearchableField::new("name")]
    }

    fn sortable_columns() -> Vec<(&'static str, Column)> {
        vec![("id", Column::Id), ("name", Column::Name)]
    }

    fn default_sort() -> (Column, SortDirection) {
        (Column::Name, SortDirection::Asc)
    }
}
