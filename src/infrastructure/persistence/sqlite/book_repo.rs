//! SQLite Book Repository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use super::DbPool;
use crate::application::ports::{BookRecord, BookRepositoryPort, RepositoryError};

/// SQLite Book Repository
pub struct SqliteBookRepository {
    pool: DbPool,
}

impl SqliteBookRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct BookRow {
    id: String,
    title: String,
    description: Option<String>,
    original_text: Option<String>,
    style: String,
    created_at: String,
    updated_at: String,
}

impl TryFrom<BookRow> for BookRecord {
    type Error = RepositoryError;

    fn try_from(row: BookRow) -> Result<Self, Self::Error> {
        Ok(BookRecord {
            id: Uuid::parse_str(&row.id)
                .map_err(|e| RepositoryError::SerializationError(e.to_string()))?,
            title: row.title,
            description: row.description,
            original_text: row.original_text,
            style: row.style,
            created_at: DateTime::parse_from_rfc3339(&row.created_at)
                .map_err(|e| RepositoryError::SerializationError(e.to_string()))?
                .with_timezone(&Utc),
            updated_at: DateTime::parse_from_rfc3339(&row.updated_at)
                .map_err(|e| RepositoryError::SerializationError(e.to_string()))?
                .with_timezone(&Utc),
        })
    }
}

#[async_trait]
impl BookRepositoryPort for SqliteBookRepository {
    async fn save(&self, book: &BookRecord) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO books (id, title, description, original_text, style, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                title = excluded.title,
                description = excluded.description,
                original_text = excluded.original_text,
                style = excluded.style,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(book.id.to_string())
        .bind(&book.title)
        .bind(&book.description)
        .bind(&book.original_text)
        .bind(&book.style)
        .bind(book.created_at.to_rfc3339())
        .bind(book.updated_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<BookRecord>, RepositoryError> {
        let row: Option<BookRow> = sqlx::query_as(
            "SELECT id, title, description, original_text, style, created_at, updated_at FROM books WHERE id = ?",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        row.map(BookRecord::try_from).transpose()
    }

    async fn find_all(&self) -> Result<Vec<BookRecord>, RepositoryError> {
        let rows: Vec<BookRow> = sqlx::query_as(
            "SELECT id, title, description, original_text, style, created_at, updated_at FROM books ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(BookRecord::try_from).collect()
    }

    async fn delete(&self, id: Uuid) -> Result<usize, RepositoryError> {
        // 使用事务确保原子性
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        // 先删关联的 chapters
        let chapters = sqlx::query("DELETE FROM chapters WHERE book_id = ?")
            .bind(id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        // 再删 book 本身
        sqlx::query("DELETE FROM books WHERE id = ?")
            .bind(id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        tx.commit()
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(chapters.rows_affected() as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::super::{create_pool, run_migrations, DatabaseConfig, SqliteChapterRepository};
    use super::*;
    use crate::application::ports::{ChapterRecord, ChapterRepositoryPort, ChapterStatus};
    use chrono::Duration;

    async fn setup_pool() -> DbPool {
        let config = DatabaseConfig::in_memory();
        let pool = create_pool(&config).await.unwrap();
        run_migrations(&pool).await.unwrap();
        pool
    }

    fn sample_book(title: &str) -> BookRecord {
        let now = Utc::now();
        BookRecord {
            id: Uuid::new_v4(),
            title: title.to_string(),
            description: None,
            original_text: Some("Il etait une fois".to_string()),
            style: "narratif".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    fn sample_chapter(book_id: Uuid, number: i64) -> ChapterRecord {
        let now = Utc::now();
        ChapterRecord {
            id: Uuid::new_v4(),
            book_id,
            number,
            title: None,
            original_content: Some(format!("chapitre {}", number)),
            generated_content: None,
            status: ChapterStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_save_and_find_by_id() {
        let pool = setup_pool().await;
        let repo = SqliteBookRepository::new(pool);

        let book = sample_book("Le Voyage");
        repo.save(&book).await.unwrap();

        let found = repo.find_by_id(book.id).await.unwrap().unwrap();
        assert_eq!(found.id, book.id);
        assert_eq!(found.title, "Le Voyage");
        assert_eq!(found.description, None);
        assert_eq!(found.original_text.as_deref(), Some("Il etait une fois"));
        assert_eq!(found.style, "narratif");

        let missing = repo.find_by_id(Uuid::new_v4()).await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_save_is_upsert() {
        let pool = setup_pool().await;
        let repo = SqliteBookRepository::new(pool);

        let mut book = sample_book("Premier titre");
        repo.save(&book).await.unwrap();

        book.title = "Titre corrige".to_string();
        book.updated_at = Utc::now();
        repo.save(&book).await.unwrap();

        let all = repo.find_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].title, "Titre corrige");
    }

    #[tokio::test]
    async fn test_find_all_newest_first() {
        let pool = setup_pool().await;
        let repo = SqliteBookRepository::new(pool);

        let mut older = sample_book("Ancien");
        older.created_at = Utc::now() - Duration::minutes(5);
        let newer = sample_book("Recent");

        repo.save(&older).await.unwrap();
        repo.save(&newer).await.unwrap();

        let all = repo.find_all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].title, "Recent");
        assert_eq!(all[1].title, "Ancien");
    }

    #[tokio::test]
    async fn test_delete_cascades_chapters() {
        let pool = setup_pool().await;
        let book_repo = SqliteBookRepository::new(pool.clone());
        let chapter_repo = SqliteChapterRepository::new(pool);

        let book = sample_book("A supprimer");
        book_repo.save(&book).await.unwrap();
        for number in 1..=3 {
            chapter_repo
                .save(&sample_chapter(book.id, number))
                .await
                .unwrap();
        }

        let removed = book_repo.delete(book.id).await.unwrap();
        assert_eq!(removed, 3);

        assert!(book_repo.find_by_id(book.id).await.unwrap().is_none());
        assert!(chapter_repo.find_by_book(book.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_missing_book_removes_nothing() {
        let pool = setup_pool().await;
        let repo = SqliteBookRepository::new(pool);

        // 存在性检查在应用层，这里只保证无副作用
        let removed = repo.delete(Uuid::new_v4()).await.unwrap();
        assert_eq!(removed, 0);
    }

    #[tokio::test]
    async fn test_delete_leaves_other_books_intact() {
        let pool = setup_pool().await;
        let book_repo = SqliteBookRepository::new(pool.clone());
        let chapter_repo = SqliteChapterRepository::new(pool);

        let doomed = sample_book("Condamne");
        let kept = sample_book("Conserve");
        book_repo.save(&doomed).await.unwrap();
        book_repo.save(&kept).await.unwrap();
        chapter_repo
            .save(&sample_chapter(doomed.id, 1))
            .await
            .unwrap();
        chapter_repo.save(&sample_chapter(kept.id, 1)).await.unwrap();

        book_repo.delete(doomed.id).await.unwrap();

        assert!(book_repo.find_by_id(kept.id).await.unwrap().is_some());
        assert_eq!(chapter_repo.find_by_book(kept.id).await.unwrap().len(), 1);
    }
}
