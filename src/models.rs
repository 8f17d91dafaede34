//! 数据模型
//!
//! Screen -> Section -> Row -> Item 四层嵌套结构，
//! 以及行粒度的局部重载计算。

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// RGB 颜色值（与具体渲染端无关）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// 解析 "#RRGGBB" 形式的颜色
    pub fn parse(s: &str) -> Option<Rgb> {
        let hex = s.strip_prefix('#')?;
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let n = u32::from_str_radix(hex, 16).ok()?;
        Some(Rgb((n >> 16) as u8, (n >> 8) as u8, n as u8))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Rgb::parse(&s).ok_or_else(|| serde::de::Error::custom(format!("无效的颜色值: {s}")))
    }
}

/// 内置九色调色板
pub const DEFAULT_PALETTE: [Rgb; 9] = [
    Rgb(0xFF, 0x3B, 0x30), // red
    Rgb(0xFF, 0x95, 0x00), // orange
    Rgb(0xFF, 0xCC, 0x00), // yellow
    Rgb(0x34, 0xC7, 0x59), // green
    Rgb(0x00, 0x7A, 0xFF), // blue
    Rgb(0x58, 0x56, 0xD6), // indigo
    Rgb(0xFF, 0x2D, 0x55), // pink
    Rgb(0xAF, 0x52, 0xDE), // purple
    Rgb(0x30, 0xB0, 0xC7), // teal
];

/// 条目：叶子节点，颜色不可变，选中状态可变
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub id: usize,
    pub color: Rgb,
    pub state: bool,
}

/// 行：局部重载的最小单位
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub id: String,
    pub items: Vec<Item>,
}

/// 区块：拥有若干行
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub id: String,
    pub rows: Vec<Row>,
}

/// 屏幕：根聚合，持有全部区块
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Screen {
    pub sections: Vec<Section>,
}

/// 条目的三级定位，三个下标均从零起
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemIndex {
    pub section: usize,
    pub row: usize,
    pub item: usize,
}

/// 模型层错误
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// 三级下标中任意一级越界
    #[error("索引越界: section={section} row={row} item={item}")]
    IndexOutOfRange {
        section: usize,
        row: usize,
        item: usize,
    },
}

impl Screen {
    /// 按三级下标取条目
    pub fn item(&self, index: ItemIndex) -> Option<&Item> {
        self.sections
            .get(index.section)?
            .rows
            .get(index.row)?
            .items
            .get(index.item)
    }

    /// 按二级下标取行
    pub fn row(&self, section: usize, row: usize) -> Option<&Row> {
        self.sections.get(section)?.rows.get(row)
    }

    /// 切换指定条目的选中状态，返回所在行的 id 作为最小重载指令
    ///
    /// 三个下标在任何修改前全部校验，越界时屏幕保持原样。
    pub fn toggle_item(&mut self, index: ItemIndex) -> Result<&str, ModelError> {
        let oob = || ModelError::IndexOutOfRange {
            section: index.section,
            row: index.row,
            item: index.item,
        };

        let row = self
            .sections
            .get_mut(index.section)
            .and_then(|section| section.rows.get_mut(index.row))
            .ok_or_else(oob)?;
        let item = row.items.get_mut(index.item).ok_or_else(oob)?;

        item.state = !item.state;
        Ok(&row.id)
    }

    /// 把重载计划应用到展示快照上
    ///
    /// 计划内的行从 `source` 整行拷贝条目。出现结构性变化时直接整体重建，
    /// 对已不存在的行下发重载是非法的。
    pub fn apply_reload(&mut self, source: &Screen, plan: &ReloadPlan) {
        if !plan.structural.is_empty() {
            *self = source.clone();
            return;
        }

        for section in &mut self.sections {
            let Some(src_section) = source.sections.iter().find(|s| s.id == section.id) else {
                continue;
            };
            for row in &mut section.rows {
                if !plan.reload.contains(&row.id) {
                    continue;
                }
                if let Some(src_row) = src_section.rows.iter().find(|r| r.id == row.id) {
                    row.items = src_row.items.clone();
                }
            }
        }
    }
}

/// 局部重载计划：需要重载的行，加上结构性变化
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReloadPlan {
    pub reload: BTreeSet<String>,
    pub structural: Vec<StructuralChange>,
}

impl ReloadPlan {
    pub fn is_empty(&self) -> bool {
        self.reload.is_empty() && self.structural.is_empty()
    }
}

/// 结构性变化：区块或行的新增/移除，区别于内容重载
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StructuralChange {
    SectionInserted(String),
    SectionRemoved(String),
    RowInserted { section: String, row: String },
    RowRemoved { section: String, row: String },
}

/// 比较两份屏幕快照，给出行粒度的最小重载集合
///
/// 区块与行按 id 匹配。匹配上的行只要条目内容有任何差异
/// （数量或任一条目的字段）就整行进入重载集合，行内差异不再细分。
/// 只在一侧出现的 id 归类为结构性变化，不会被当作重载。
pub fn compute_reload_set(prev: &Screen, curr: &Screen) -> ReloadPlan {
    let mut plan = ReloadPlan::default();

    for prev_section in &prev.sections {
        match curr.sections.iter().find(|s| s.id == prev_section.id) {
            Some(curr_section) => diff_section(prev_section, curr_section, &mut plan),
            None => plan
                .structural
                .push(StructuralChange::SectionRemoved(prev_section.id.clone())),
        }
    }

    for curr_section in &curr.sections {
        if !prev.sections.iter().any(|s| s.id == curr_section.id) {
            plan.structural
                .push(StructuralChange::SectionInserted(curr_section.id.clone()));
        }
    }

    plan
}

fn diff_section(prev: &Section, curr: &Section, plan: &mut ReloadPlan) {
    for prev_row in &prev.rows {
        match curr.rows.iter().find(|r| r.id == prev_row.id) {
            Some(curr_row) => {
                if prev_row.items != curr_row.items {
                    plan.reload.insert(curr_row.id.clone());
                }
            }
            None => plan.structural.push(StructuralChange::RowRemoved {
                section: prev.id.clone(),
                row: prev_row.id.clone(),
            }),
        }
    }

    for curr_row in &curr.rows {
        if !prev.rows.iter().any(|r| r.id == curr_row.id) {
            plan.structural.push(StructuralChange::RowInserted {
                section: curr.id.clone(),
                row: curr_row.id.clone(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: usize) -> Item {
        Item {
            id,
            color: DEFAULT_PALETTE[id % DEFAULT_PALETTE.len()],
            state: false,
        }
    }

    fn test_screen() -> Screen {
        Screen {
            sections: vec![
                Section {
                    id: "section1".to_string(),
                    rows: vec![Row {
                        id: "row1".to_string(),
                        items: vec![item(0), item(1)],
                    }],
                },
                Section {
                    id: "section2".to_string(),
                    rows: vec![Row {
                        id: "row2".to_string(),
                        items: vec![item(0), item(1), item(2)],
                    }],
                },
            ],
        }
    }

    #[test]
    fn test_toggle_flips_exactly_one_item() {
        let mut screen = test_screen();
        let before = screen.clone();

        let row_id = screen
            .toggle_item(ItemIndex {
                section: 0,
                row: 0,
                item: 0,
            })
            .unwrap()
            .to_owned();

        assert_eq!(row_id, "row1");
        assert!(screen.sections[0].rows[0].items[0].state);
        // 其余条目与所有标识不受影响
        assert_eq!(
            screen.sections[0].rows[0].items[1],
            before.sections[0].rows[0].items[1]
        );
        assert_eq!(screen.sections[1], before.sections[1]);
        assert_eq!(screen.sections[0].id, "section1");
        assert_eq!(screen.sections[0].rows[0].id, "row1");
    }

    #[test]
    fn test_toggle_twice_restores() {
        let mut screen = test_screen();
        let before = screen.clone();
        let index = ItemIndex {
            section: 1,
            row: 0,
            item: 2,
        };

        screen.toggle_item(index).unwrap();
        screen.toggle_item(index).unwrap();

        assert_eq!(screen, before);
    }

    #[test]
    fn test_toggle_out_of_range() {
        let mut screen = test_screen();
        let before = screen.clone();

        for index in [
            ItemIndex { section: 2, row: 0, item: 0 },
            ItemIndex { section: 0, row: 1, item: 0 },
            ItemIndex { section: 0, row: 0, item: 2 },
        ] {
            let err = screen.toggle_item(index).unwrap_err();
            assert_eq!(
                err,
                ModelError::IndexOutOfRange {
                    section: index.section,
                    row: index.row,
                    item: index.item,
                }
            );
        }

        assert_eq!(screen, before);
    }

    #[test]
    fn test_reload_set_identity() {
        let screen = test_screen();
        assert!(compute_reload_set(&screen, &screen).is_empty());
    }

    #[test]
    fn test_reload_set_single_toggle() {
        let mut screen = test_screen();
        let before = screen.clone();

        screen
            .toggle_item(ItemIndex { section: 0, row: 0, item: 0 })
            .unwrap();

        assert!(screen.sections[0].rows[0].items[0].state);
        assert!(!screen.sections[0].rows[0].items[1].state);

        let plan = compute_reload_set(&before, &screen);
        assert_eq!(plan.reload, BTreeSet::from(["row1".to_string()]));
        assert!(plan.structural.is_empty());
    }

    #[test]
    fn test_structural_changes_reported() {
        let before = test_screen();
        let mut after = before.clone();
        after.sections[0].rows.push(Row {
            id: "row1b".to_string(),
            items: vec![item(0)],
        });
        after.sections.remove(1);

        let plan = compute_reload_set(&before, &after);
        assert!(plan.reload.is_empty());
        assert!(plan.structural.contains(&StructuralChange::RowInserted {
            section: "section1".to_string(),
            row: "row1b".to_string(),
        }));
        assert!(
            plan.structural
                .contains(&StructuralChange::SectionRemoved("section2".to_string()))
        );
    }

    #[test]
    fn test_item_count_change_is_reload() {
        let before = test_screen();
        let mut after = before.clone();
        after.sections[1].rows[0].items.pop();

        let plan = compute_reload_set(&before, &after);
        assert_eq!(plan.reload, BTreeSet::from(["row2".to_string()]));
        assert!(plan.structural.is_empty());
    }

    #[test]
    fn test_apply_reload_copies_planned_rows_only() {
        let mut rendered = test_screen();
        let mut source = test_screen();
        source
            .toggle_item(ItemIndex { section: 0, row: 0, item: 1 })
            .unwrap();
        source
            .toggle_item(ItemIndex { section: 1, row: 0, item: 0 })
            .unwrap();

        let mut plan = ReloadPlan::default();
        plan.reload.insert("row1".to_string());
        rendered.apply_reload(&source, &plan);

        // 只有计划内的 row1 被同步，row2 仍是旧内容
        assert!(rendered.sections[0].rows[0].items[1].state);
        assert!(!rendered.sections[1].rows[0].items[0].state);
    }

    #[test]
    fn test_apply_reload_structural_rebuilds() {
        let mut rendered = test_screen();
        let mut source = test_screen();
        source.sections[0].rows[0].items[0].state = true;
        source.sections.remove(1);

        let plan = compute_reload_set(&rendered, &source);
        rendered.apply_reload(&source, &plan);

        assert_eq!(rendered, source);
    }

    #[test]
    fn test_rgb_parse() {
        assert_eq!(Rgb::parse("#FF3B30"), Some(Rgb(0xFF, 0x3B, 0x30)));
        assert_eq!(Rgb::parse("#ff3b30"), Some(Rgb(0xFF, 0x3B, 0x30)));
        assert_eq!(Rgb::parse("FF3B30"), None);
        assert_eq!(Rgb::parse("#FF3B3"), None);
        assert_eq!(Rgb(0xFF, 0x3B, 0x30).to_string(), "#FF3B30");
    }
}
