//! Style Query Handlers

use crate::application::queries::ListStyles;
use crate::domain::{all_styles, Style};

// ============================================================================
// Response DTOs
// ============================================================================

/// 风格条目响应
#[derive(Debug, Clone)]
pub struct StyleResponse {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

impl From<&Style> for StyleResponse {
    fn from(style: &Style) -> Self {
        Self {
            id: style.id,
            name: style.name,
            description: style.description,
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// ListStyles Handler
///
/// 目录为编译期常量，查询不会失败
#[derive(Default)]
pub struct ListStylesHandler;

impl ListStylesHandler {
    pub fn new() -> Self {
        Self
    }

    pub async fn handle(&self, _query: ListStyles) -> Vec<StyleResponse> {
        all_styles().iter().map(StyleResponse::from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_list_styles_returns_catalog_in_order() {
        let handler = ListStylesHandler::new();
        let styles = handler.handle(ListStyles).await;

        assert_eq!(styles.len(), 8);
        assert_eq!(styles[0].id, "narratif");
        assert_eq!(styles[7].id, "contemporain");
    }
}
