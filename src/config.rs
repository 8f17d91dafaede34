//! 配置加载
//!
//! 启动时从 TOML 读取调色板与区块布局，缺省时使用内置演示数据。
//! 屏幕只在启动时构建一次，此后结构不再变化。

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{DEFAULT_PALETTE, Item, Rgb, Row, Screen, Section};

/// 顶层配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardConfig {
    /// 调色板，省略时使用内置九色
    #[serde(default = "default_palette")]
    pub palette: Vec<Rgb>,
    /// 区块布局，省略时使用内置两区块演示布局
    #[serde(default)]
    pub sections: Vec<SectionConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionConfig {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub rows: Vec<RowConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RowConfig {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub order: ItemOrder,
}

/// 行内条目的排列方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ItemOrder {
    #[default]
    Forward,
    Reversed,
}

fn default_palette() -> Vec<Rgb> {
    DEFAULT_PALETTE.to_vec()
}

/// 内置演示布局：两个区块各一行，第二行条目倒序
fn default_sections() -> Vec<SectionConfig> {
    vec![
        SectionConfig {
            id: "section1".to_string(),
            rows: vec![RowConfig {
                id: "row1".to_string(),
                order: ItemOrder::Forward,
            }],
        },
        SectionConfig {
            id: "section2".to_string(),
            rows: vec![RowConfig {
                id: "row2".to_string(),
                order: ItemOrder::Reversed,
            }],
        },
    ]
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            palette: default_palette(),
            sections: default_sections(),
        }
    }
}

impl BoardConfig {
    /// 由配置构建初始屏幕
    pub fn build(&self) -> Screen {
        let sections = if self.sections.is_empty() {
            default_sections()
        } else {
            self.sections.clone()
        };

        Screen {
            sections: sections
                .iter()
                .map(|section| Section {
                    id: ensure_id(&section.id),
                    rows: section
                        .rows
                        .iter()
                        .map(|row| Row {
                            id: ensure_id(&row.id),
                            items: build_items(&self.palette, row.order),
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}

/// 配置里缺省 id 时补一个生成的稳定标识
fn ensure_id(id: &str) -> String {
    if id.is_empty() {
        Uuid::new_v4().to_string()
    } else {
        id.to_string()
    }
}

/// 按调色板生成一行条目，id 取创建时的位置
fn build_items(palette: &[Rgb], order: ItemOrder) -> Vec<Item> {
    let items = palette.iter().enumerate().map(|(index, &color)| Item {
        id: index,
        color,
        state: false,
    });

    match order {
        ItemOrder::Forward => items.collect(),
        ItemOrder::Reversed => items.rev().collect(),
    }
}

/// 从 TOML 文件加载配置，文件不存在时使用默认配置
pub fn load_config(path: &Path) -> io::Result<BoardConfig> {
    if !path.exists() {
        return Ok(BoardConfig::default());
    }

    let content = fs::read_to_string(path)?;
    let config: BoardConfig =
        toml::from_str(&content).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_build() {
        let screen = BoardConfig::default().build();

        assert_eq!(screen.sections.len(), 2);
        assert_eq!(screen.sections[0].id, "section1");
        assert_eq!(screen.sections[1].rows[0].id, "row2");

        let row1 = &screen.sections[0].rows[0];
        let row2 = &screen.sections[1].rows[0];
        assert_eq!(row1.items.len(), DEFAULT_PALETTE.len());
        assert_eq!(row1.items[0].id, 0);
        // 第二行条目倒序，首个条目是调色板最后一色
        assert_eq!(row2.items[0].id, DEFAULT_PALETTE.len() - 1);
        assert_eq!(row2.items[0].color, DEFAULT_PALETTE[DEFAULT_PALETTE.len() - 1]);
        assert!(row1.items.iter().all(|item| !item.state));
    }

    #[test]
    fn test_palette_override() {
        let config: BoardConfig = toml::from_str(
            r##"
            palette = ["#112233", "#AABBCC"]

            [[sections]]
            id = "s"

            [[sections.rows]]
            id = "r"
            order = "reversed"
            "##,
        )
        .unwrap();

        let screen = config.build();
        assert_eq!(screen.sections.len(), 1);

        let row = &screen.sections[0].rows[0];
        assert_eq!(row.items.len(), 2);
        assert_eq!(row.items[0].color, Rgb(0xAA, 0xBB, 0xCC));
        assert_eq!(row.items[0].id, 1);
    }

    #[test]
    fn test_missing_id_backfilled() {
        let config: BoardConfig = toml::from_str(
            r#"
            [[sections]]
            [[sections.rows]]
            "#,
        )
        .unwrap();

        let screen = config.build();
        assert!(!screen.sections[0].id.is_empty());
        assert!(!screen.sections[0].rows[0].id.is_empty());
    }

    #[test]
    fn test_invalid_color_rejected() {
        let result: Result<BoardConfig, _> = toml::from_str(r#"palette = ["nope"]"#);
        assert!(result.is_err());
    }
}
