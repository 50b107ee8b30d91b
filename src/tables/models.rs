use crate::db;

/// A table guests can book, these are seeded once and never change
#[derive(Debug, Clone, sqlx::FromRow, PartialEq)]
pub struct Table {
    pub id: i32,
    pub capacity: i32,
    pub location: String,
}

impl Table {
    #[tracing::instrument(name = "Table::find_all", skip(db))]
    pub async fn find_all(db: &db::Pool) -> Result<Vec<Table>, sqlx::Error> {
        sqlx::query_as::<_, Table>("SELECT id, capacity, location FROM tables ORDER BY id")
            .fetch_all(db)
            .await
    }

    /// Returns `sqlx::Error::RowNotFound` when the table doesn't exist
    #[tracing::instrument(name = "Table::find_by_id", skip(db))]
    pub async fn find_by_id(id: i32, db: &db::Pool) -> Result<Table, sqlx::Error> {
        sqlx::query_as::<_, Table>("SELECT id, capacity, location FROM tables WHERE id = $1")
            .bind(id)
            .fetch_one(db)
            .await
    }
}
