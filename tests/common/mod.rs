use sea_orm::{ConnectionTrait, Database, DatabaseConnection, DbBackend, DbErr, Schema};

pub mod author_entity;
pub mod book_entity;

pub async fn setup_test_db() -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect("sqlite::memory:").await?;

    let schema = Schema::new(DbBackend::Sqlite);
    let backend = db.get_database_backend();
    db.execute(backend.build(&schema.create_table_from_entity(author_entity::Entity)))
        .await?;
    db.execute(backend.build(&schema.create_table_from_entity(book_entity::Entity)))
        .await?;

    Ok(db)
}
