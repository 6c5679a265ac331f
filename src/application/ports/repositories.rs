//! Repository Ports - 出站端口
//!
//! 定义书籍/章节持久化的抽象接口
//! 具体实现在 infrastructure 层（SQLite）

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use thiserror::Error;
use uuid::Uuid;

/// Repository 错误
///
/// 只描述基础设施故障，记录不存在通过 Option / 计数表达，
/// 由应用层映射为 NotFound
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

// ============================================================================
// Book Repository
// ============================================================================

/// 书籍实体（用于持久化）
#[derive(Debug, Clone)]
pub struct BookRecord {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub original_text: Option<String>,
    /// 风格目录中的条目 id（存储层不做校验，按不透明文本保存）
    pub style: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Book Repository Port
#[async_trait]
pub trait BookRepositoryPort: Send + Sync {
    /// 保存书籍（按 id upsert）
    async fn save(&self, book: &BookRecord) -> Result<(), RepositoryError>;

    /// 根据 ID 查找书籍
    async fn find_by_id(&self, id: Uuid) -> Result<Option<BookRecord>, RepositoryError>;

    /// 获取所有书籍
    async fn find_all(&self) -> Result<Vec<BookRecord>, RepositoryError>;

    /// 删除书籍及其全部章节（单事务级联）
    ///
    /// 返回被级联删除的章节数，书籍本身不存在时依然返回 Ok(0)
    /// 存在性检查由调用方负责
    async fn delete(&self, id: Uuid) -> Result<usize, RepositoryError>;
}

// ============================================================================
// Chapter Repository
// ============================================================================

/// 章节生成状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChapterStatus {
    /// 等待生成
    Pending,
    /// 已生成
    Generated,
}

impl ChapterStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChapterStatus::Pending => "pending",
            ChapterStatus::Generated => "generated",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(ChapterStatus::Pending),
            "generated" => Some(ChapterStatus::Generated),
            _ => None,
        }
    }
}

impl Default for ChapterStatus {
    fn default() -> Self {
        ChapterStatus::Pending
    }
}

/// 章节实体（用于持久化）
#[derive(Debug, Clone)]
pub struct ChapterRecord {
    pub id: Uuid,
    /// 所属书籍，创建后不可变更
    pub book_id: Uuid,
    /// 调用方指定的排序号，不要求唯一或连续，仅作展示排序键
    pub number: i64,
    pub title: Option<String>,
    pub original_content: Option<String>,
    pub generated_content: Option<String>,
    pub status: ChapterStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 章节部分更新补丁
///
/// 可空文本字段使用三态表示：
/// - 字段缺失        -> `None`（保持原值）
/// - 显式 null       -> `Some(None)`（清空）
/// - 显式给值        -> `Some(Some(v))`（覆盖）
///
/// `status` 列非空，缺失与 null 同样视为保持原值
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChapterPatch {
    #[serde(default, deserialize_with = "double_option")]
    pub title: Option<Option<String>>,

    #[serde(default, deserialize_with = "double_option")]
    pub original_content: Option<Option<String>>,

    #[serde(default, deserialize_with = "double_option")]
    pub generated_content: Option<Option<String>>,

    #[serde(default)]
    pub status: Option<ChapterStatus>,
}

impl ChapterPatch {
    /// 补丁中是否没有任何待应用字段
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.original_content.is_none()
            && self.generated_content.is_none()
            && self.status.is_none()
    }
}

/// 将出现过的字段反序列化为 Some(..)，使缺失字段保持 None
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

/// 待生成章节（与所属书籍元数据联查的结果行）
///
/// 书籍侧字段来自 LEFT JOIN，父记录缺失时为 None，
/// 由查询处理器代入安全默认值
#[derive(Debug, Clone)]
pub struct PendingChapterRecord {
    pub chapter_id: Uuid,
    pub book_id: Uuid,
    pub book_title: Option<String>,
    pub book_style: Option<String>,
    pub book_description: Option<String>,
    pub chapter_number: i64,
    pub original_content: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// 某本书的章节计数（分组统计结果行）
#[derive(Debug, Clone)]
pub struct BookChapterCount {
    pub book_id: Uuid,
    pub chapters: usize,
}

/// Chapter Repository Port
#[async_trait]
pub trait ChapterRepositoryPort: Send + Sync {
    /// 保存章节（按 id upsert）
    async fn save(&self, chapter: &ChapterRecord) -> Result<(), RepositoryError>;

    /// 按 (book_id, chapter_id) 对查找章节
    ///
    /// 章节存在但归属另一本书时返回 None，与完全不存在不作区分
    async fn find_by_book_and_id(
        &self,
        book_id: Uuid,
        chapter_id: Uuid,
    ) -> Result<Option<ChapterRecord>, RepositoryError>;

    /// 获取某本书的全部章节，按 number 升序
    async fn find_by_book(&self, book_id: Uuid) -> Result<Vec<ChapterRecord>, RepositoryError>;

    /// 统计某本书的章节数
    async fn count_by_book(&self, book_id: Uuid) -> Result<usize, RepositoryError>;

    /// 一次性统计所有书籍的章节数（用于列表页派生 chapters_count）
    async fn count_grouped_by_book(&self) -> Result<Vec<BookChapterCount>, RepositoryError>;

    /// 按 (book_id, chapter_id) 对应用部分更新
    ///
    /// 只有补丁中出现的字段会进入 SET 子句，空补丁退化为一次读取
    /// 返回更新后的章节，无匹配行时返回 None
    async fn apply_patch(
        &self,
        book_id: Uuid,
        chapter_id: Uuid,
        patch: &ChapterPatch,
    ) -> Result<Option<ChapterRecord>, RepositoryError>;

    /// 按 (book_id, chapter_id) 对删除章节
    async fn delete_by_book_and_id(
        &self,
        book_id: Uuid,
        chapter_id: Uuid,
    ) -> Result<(), RepositoryError>;

    /// 跨所有书籍扫描 pending 章节，并联查所属书籍元数据
    async fn find_pending(&self) -> Result<Vec<PendingChapterRecord>, RepositoryError>;
}
