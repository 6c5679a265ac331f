//! Style Catalog - 写作风格目录
//!
//! 固定的八种叙事风格，作为只读配置数据在编译期内置
//! 仅供客户端构建创建表单使用：存储层不校验 Book.style 是否在目录中

/// 风格条目
///
/// `description` 是提供给生成端的风格提示片段（源数据为法语）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

/// 完整风格目录（顺序固定）
pub const STYLES: [Style; 8] = [
    Style {
        id: "narratif",
        name: "Narratif",
        description: "un style narratif classique, fluide et immersif",
    },
    Style {
        id: "poetique",
        name: "Poetique",
        description: "un style poetique et lyrique, avec des metaphores",
    },
    Style {
        id: "suspense",
        name: "Suspense",
        description: "un style thriller/suspense, avec du rythme et de la tension",
    },
    Style {
        id: "jeunesse",
        name: "Jeunesse",
        description: "un style adapte aux enfants et adolescents",
    },
    Style {
        id: "fantastique",
        name: "Fantastique",
        description: "un style fantastique/fantasy, atmosphere magique",
    },
    Style {
        id: "humoristique",
        name: "Humoristique",
        description: "un style humoristique et leger",
    },
    Style {
        id: "historique",
        name: "Historique",
        description: "un style historique avec attention aux details d'epoque",
    },
    Style {
        id: "contemporain",
        name: "Contemporain",
        description: "un style moderne et realiste",
    },
];

/// 按目录顺序返回所有风格
pub fn all_styles() -> &'static [Style] {
    &STYLES
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_has_eight_entries() {
        assert_eq!(all_styles().len(), 8);
    }

    #[test]
    fn test_style_ids_are_unique() {
        let ids: HashSet<&str> = all_styles().iter().map(|s| s.id).collect();
        assert_eq!(ids.len(), STYLES.len());
    }

    #[test]
    fn test_catalog_order_is_stable() {
        assert_eq!(all_styles()[0].id, "narratif");
        assert_eq!(all_styles()[7].id, "contemporain");
    }

    #[test]
    fn test_no_empty_fields() {
        for style in all_styles() {
            assert!(!style.id.is_empty());
            assert!(!style.name.is_empty());
            assert!(!style.description.is_empty());
        }
    }
}
