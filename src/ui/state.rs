//! App 状态定义 (Model)
//!
//! 同时持有两份屏幕：`screen` 是被修改的数据源，
//! `rendered` 是展示层当前显示的快照，只随重载指令更新。
//! 两者的差距正是重载粒度问题的可视化依据。

use chrono::{DateTime, Local};

use crate::models::{Item, ItemIndex, Row, Screen};

/// 重载日志最多保留的条数
const JOURNAL_LIMIT: usize = 50;

/// 应用状态
pub struct App {
    /// 数据源，选中切换直接作用在这份上
    pub screen: Screen,
    /// 展示层持有的快照
    pub rendered: Screen,
    /// 展开后的行列表 (section_idx, row_idx)，结构固定，启动时算一次
    pub display_list: Vec<(usize, usize)>,
    pub cursor: Cursor,
    pub policy: DiffPolicy,
    pub journal: Vec<ReloadRecord>,
    pub message: Option<String>,
    pub show_help: bool,
}

/// 光标位置：按展开后的行列表定位
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    /// 展开行列表中的下标
    pub line: usize,
    /// 行内条目下标
    pub item: usize,
}

/// 展示层的行差分策略
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffPolicy {
    /// 行内条目有任何变化即整行重载
    RowContents,
    /// 仅按行 id 判断变化，id 未变就跳过重载，用于复现显示过期的缺陷
    RowIdentity,
}

impl DiffPolicy {
    pub fn label(&self) -> &'static str {
        match self {
            DiffPolicy::RowContents => "行内容",
            DiffPolicy::RowIdentity => "仅行标识",
        }
    }

    /// 切换到另一种策略
    pub fn cycled(self) -> Self {
        match self {
            DiffPolicy::RowContents => DiffPolicy::RowIdentity,
            DiffPolicy::RowIdentity => DiffPolicy::RowContents,
        }
    }
}

/// 重载日志条目
#[derive(Debug, Clone, PartialEq)]
pub struct ReloadRecord {
    pub at: DateTime<Local>,
    pub event: ReloadEvent,
}

/// 展示层收到（或跳过）的一条重载指令
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReloadEvent {
    /// 按行重载
    RowsReloaded(Vec<String>),
    /// 行 id 未变而被差分跳过
    SkippedByIdentity(String),
    /// 全量刷新
    FullResync,
    /// 结构性变化触发的整体重建
    StructuralResync,
}

impl ReloadEvent {
    /// 日志面板里的一行描述
    pub fn describe(&self) -> String {
        match self {
            ReloadEvent::RowsReloaded(rows) if rows.is_empty() => {
                "重载集合为空（内容一致）".to_string()
            }
            ReloadEvent::RowsReloaded(rows) => format!("重载行: {}", rows.join(", ")),
            ReloadEvent::SkippedByIdentity(row) => {
                format!("跳过重载: {row}（行标识未变，显示过期）")
            }
            ReloadEvent::FullResync => "全量刷新".to_string(),
            ReloadEvent::StructuralResync => "结构变化，整体重建".to_string(),
        }
    }
}

impl App {
    /// 创建新的应用实例
    pub fn new(screen: Screen) -> Self {
        let display_list = screen
            .sections
            .iter()
            .enumerate()
            .flat_map(|(si, section)| (0..section.rows.len()).map(move |ri| (si, ri)))
            .collect();
        let rendered = screen.clone();

        Self {
            screen,
            rendered,
            display_list,
            cursor: Cursor::default(),
            policy: DiffPolicy::RowContents,
            journal: Vec::new(),
            message: None,
            show_help: false,
        }
    }

    /// 光标当前指向的三级下标
    pub fn cursor_index(&self) -> Option<ItemIndex> {
        let (section, row) = *self.display_list.get(self.cursor.line)?;
        Some(ItemIndex {
            section,
            row,
            item: self.cursor.item,
        })
    }

    /// 光标所在的行（数据源里的）
    pub fn cursor_row(&self) -> Option<&Row> {
        let (section, row) = *self.display_list.get(self.cursor.line)?;
        self.screen.row(section, row)
    }

    /// 光标若落在指定行上，给出行内条目下标
    pub fn cursor_position(&self, section: usize, row: usize) -> Option<usize> {
        let (cs, cr) = *self.display_list.get(self.cursor.line)?;
        (cs == section && cr == row).then_some(self.cursor.item)
    }

    /// 数据源中光标指向的条目
    pub fn selected_item(&self) -> Option<&Item> {
        self.screen.item(self.cursor_index()?)
    }

    /// 展示快照中光标指向的条目
    pub fn selected_rendered_item(&self) -> Option<&Item> {
        self.rendered.item(self.cursor_index()?)
    }

    /// 记录一条重载日志
    pub fn record(&mut self, event: ReloadEvent) {
        self.journal.push(ReloadRecord {
            at: Local::now(),
            event,
        });
        if self.journal.len() > JOURNAL_LIMIT {
            let excess = self.journal.len() - JOURNAL_LIMIT;
            self.journal.drain(..excess);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_journal_capped() {
        let mut app = App::new(Screen::default());
        for _ in 0..(JOURNAL_LIMIT + 10) {
            app.record(ReloadEvent::FullResync);
        }
        assert_eq!(app.journal.len(), JOURNAL_LIMIT);
    }

    #[test]
    fn test_cursor_index_on_empty_screen() {
        let app = App::new(Screen::default());
        assert_eq!(app.cursor_index(), None);
        assert!(app.selected_item().is_none());
    }
}
