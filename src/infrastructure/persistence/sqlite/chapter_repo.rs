//! SQLite Chapter Repository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use super::DbPool;
use crate::application::ports::{
    BookChapterCount, ChapterPatch, ChapterRecord, ChapterRepositoryPort, ChapterStatus,
    PendingChapterRecord, RepositoryError,
};

/// SQLite Chapter Repository
pub struct SqliteChapterRepository {
    pool: DbPool,
}

impl SqliteChapterRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct ChapterRow {
    id: String,
    book_id: String,
    number: i64,
    title: Option<String>,
    original_content: Option<String>,
    generated_content: Option<String>,
    status: String,
    created_at: String,
    updated_at: String,
}

impl TryFrom<ChapterRow> for ChapterRecord {
    type Error = RepositoryError;

    fn try_from(row: ChapterRow) -> Result<Self, Self::Error> {
        Ok(ChapterRecord {
            id: Uuid::parse_str(&row.id)
                .map_err(|e| RepositoryError::SerializationError(e.to_string()))?,
            book_id: Uuid::parse_str(&row.book_id)
                .map_err(|e| RepositoryError::SerializationError(e.to_string()))?,
            number: row.number,
            title: row.title,
            original_content: row.original_content,
            generated_content: row.generated_content,
            // 库里出现未知状态值时按 pending 读取
            status: ChapterStatus::from_str(&row.status).unwrap_or_default(),
            created_at: DateTime::parse_from_rfc3339(&row.created_at)
                .map_err(|e| RepositoryError::SerializationError(e.to_string()))?
                .with_timezone(&Utc),
            updated_at: DateTime::parse_from_rfc3339(&row.updated_at)
                .map_err(|e| RepositoryError::SerializationError(e.to_string()))?
                .with_timezone(&Utc),
        })
    }
}

#[derive(FromRow)]
struct PendingChapterRow {
    chapter_id: String,
    book_id: String,
    book_title: Option<String>,
    book_style: Option<String>,
    book_description: Option<String>,
    chapter_number: i64,
    original_content: Option<String>,
    created_at: String,
}

impl TryFrom<PendingChapterRow> for PendingChapterRecord {
    type Error = RepositoryError;

    fn try_from(row: PendingChapterRow) -> Result<Self, Self::Error> {
        Ok(PendingChapterRecord {
            chapter_id: Uuid::parse_str(&row.chapter_id)
                .map_err(|e| RepositoryError::SerializationError(e.to_string()))?,
            book_id: Uuid::parse_str(&row.book_id)
                .map_err(|e| RepositoryError::SerializationError(e.to_string()))?,
            book_title: row.book_title,
            book_style: row.book_style,
            book_description: row.book_description,
            chapter_number: row.chapter_number,
            original_content: row.original_content,
            created_at: DateTime::parse_from_rfc3339(&row.created_at)
                .map_err(|e| RepositoryError::SerializationError(e.to_string()))?
                .with_timezone(&Utc),
        })
    }
}

const CHAPTER_COLUMNS: &str =
    "id, book_id, number, title, original_content, generated_content, status, created_at, updated_at";

#[async_trait]
impl ChapterRepositoryPort for SqliteChapterRepository {
    async fn save(&self, chapter: &ChapterRecord) -> Result<(), RepositoryError> {
        // book_id 与 created_at 在冲突时保持不变
        sqlx::query(
            r#"
            INSERT INTO chapters (id, book_id, number, title, original_content, generated_content, status, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                number = excluded.number,
                title = excluded.title,
                original_content = excluded.original_content,
                generated_content = excluded.generated_content,
                status = excluded.status,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(chapter.id.to_string())
        .bind(chapter.book_id.to_string())
        .bind(chapter.number)
        .bind(&chapter.title)
        .bind(&chapter.original_content)
        .bind(&chapter.generated_content)
        .bind(chapter.status.as_str())
        .bind(chapter.created_at.to_rfc3339())
        .bind(chapter.updated_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn find_by_book_and_id(
        &self,
        book_id: Uuid,
        chapter_id: Uuid,
    ) -> Result<Option<ChapterRecord>, RepositoryError> {
        let query = format!(
            "SELECT {} FROM chapters WHERE id = ? AND book_id = ?",
            CHAPTER_COLUMNS
        );

        let row: Option<ChapterRow> = sqlx::query_as(&query)
            .bind(chapter_id.to_string())
            .bind(book_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        row.map(ChapterRecord::try_from).transpose()
    }

    async fn find_by_book(&self, book_id: Uuid) -> Result<Vec<ChapterRecord>, RepositoryError> {
        let query = format!(
            "SELECT {} FROM chapters WHERE book_id = ? ORDER BY number",
            CHAPTER_COLUMNS
        );

        let rows: Vec<ChapterRow> = sqlx::query_as(&query)
            .bind(book_id.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(ChapterRecord::try_from).collect()
    }

    async fn count_by_book(&self, book_id: Uuid) -> Result<usize, RepositoryError> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM chapters WHERE book_id = ?")
            .bind(book_id.to_string())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(row.0 as usize)
    }

    async fn count_grouped_by_book(&self) -> Result<Vec<BookChapterCount>, RepositoryError> {
        let rows: Vec<(String, i64)> =
            sqlx::query_as("SELECT book_id, COUNT(*) FROM chapters GROUP BY book_id")
                .fetch_all(&self.pool)
                .await
                .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        rows.into_iter()
            .map(|(book_id, chapters)| {
                Ok(BookChapterCount {
                    book_id: Uuid::parse_str(&book_id)
                        .map_err(|e| RepositoryError::SerializationError(e.to_string()))?,
                    chapters: chapters as usize,
                })
            })
            .collect()
    }

    async fn apply_patch(
        &self,
        book_id: Uuid,
        chapter_id: Uuid,
        patch: &ChapterPatch,
    ) -> Result<Option<ChapterRecord>, RepositoryError> {
        // 空补丁退化为一次读取，不触碰 updated_at
        if patch.is_empty() {
            return self.find_by_book_and_id(book_id, chapter_id).await;
        }

        // 只为补丁中出现的字段构建 SET 子句，
        // 并发补丁各自只覆盖自己命名的列
        let mut sets: Vec<&str> = Vec::new();
        if patch.title.is_some() {
            sets.push("title = ?");
        }
        if patch.original_content.is_some() {
            sets.push("original_content = ?");
        }
        if patch.generated_content.is_some() {
            sets.push("generated_content = ?");
        }
        if patch.status.is_some() {
            sets.push("status = ?");
        }
        sets.push("updated_at = ?");

        let query = format!(
            "UPDATE chapters SET {} WHERE id = ? AND book_id = ?",
            sets.join(", ")
        );

        let mut sql_query = sqlx::query(&query);
        if let Some(title) = &patch.title {
            sql_query = sql_query.bind(title.as_deref());
        }
        if let Some(original_content) = &patch.original_content {
            sql_query = sql_query.bind(original_content.as_deref());
        }
        if let Some(generated_content) = &patch.generated_content {
            sql_query = sql_query.bind(generated_content.as_deref());
        }
        if let Some(status) = patch.status {
            sql_query = sql_query.bind(status.as_str());
        }
        sql_query = sql_query
            .bind(Utc::now().to_rfc3339())
            .bind(chapter_id.to_string())
            .bind(book_id.to_string());

        let result = sql_query
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        // (chapter_id, book_id) 未命中任何行
        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.find_by_book_and_id(book_id, chapter_id).await
    }

    async fn delete_by_book_and_id(
        &self,
        book_id: Uuid,
        chapter_id: Uuid,
    ) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM chapters WHERE id = ? AND book_id = ?")
            .bind(chapter_id.to_string())
            .bind(book_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn find_pending(&self) -> Result<Vec<PendingChapterRecord>, RepositoryError> {
        // LEFT JOIN: 孤儿章节（父书籍缺失）也要出现在工作队列里
        let rows: Vec<PendingChapterRow> = sqlx::query_as(
            r#"
            SELECT
                c.id AS chapter_id,
                c.book_id AS book_id,
                b.title AS book_title,
                b.style AS book_style,
                b.description AS book_description,
                c.number AS chapter_number,
                c.original_content AS original_content,
                c.created_at AS created_at
            FROM chapters c
            LEFT JOIN books b ON b.id = c.book_id
            WHERE c.status = ?
            ORDER BY c.created_at
            "#,
        )
        .bind(ChapterStatus::Pending.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        rows.into_iter()
            .map(PendingChapterRecord::try_from)
            .collect()
    }
}
