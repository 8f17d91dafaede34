//! 业务逻辑处理 (Update/Dispatch)
//!
//! 包含核心的 dispatch 逻辑：光标移动、选中切换，
//! 以及重载计划在不同差分策略下的落地。

use log::{debug, info, warn};

use super::actions::Action;
use super::state::{App, DiffPolicy, ReloadEvent};
use crate::models::{ReloadPlan, compute_reload_set};

impl App {
    /// 核心逻辑分发
    pub fn dispatch(&mut self, action: Action) -> bool {
        match action {
            Action::Quit => return true,
            Action::MoveLeft => self.move_left(),
            Action::MoveRight => self.move_right(),
            Action::MoveUp => self.move_up(),
            Action::MoveDown => self.move_down(),

            Action::ToggleSelected => self.toggle_selected(),

            Action::CyclePolicy => self.cycle_policy(),
            Action::Refresh => self.refresh_rendered(),
            Action::ClearJournal => self.clear_journal(),
            Action::ToggleHelp => self.show_help = !self.show_help,
        }
        false
    }

    // ============ 导航相关 ============

    /// 行内向左
    pub fn move_left(&mut self) {
        if self.cursor.item > 0 {
            self.cursor.item -= 1;
        }
    }

    /// 行内向右
    pub fn move_right(&mut self) {
        if let Some(row) = self.cursor_row() {
            if self.cursor.item + 1 < row.items.len() {
                self.cursor.item += 1;
            }
        }
    }

    /// 移到上一行
    pub fn move_up(&mut self) {
        if self.cursor.line > 0 {
            self.cursor.line -= 1;
            self.clamp_cursor_item();
        }
    }

    /// 移到下一行
    pub fn move_down(&mut self) {
        if self.cursor.line + 1 < self.display_list.len() {
            self.cursor.line += 1;
            self.clamp_cursor_item();
        }
    }

    /// 换行后条目下标按行长截断
    fn clamp_cursor_item(&mut self) {
        let len = self.cursor_row().map_or(0, |row| row.items.len());
        if len == 0 {
            self.cursor.item = 0;
        } else if self.cursor.item >= len {
            self.cursor.item = len - 1;
        }
    }

    // ============ 选中切换 ============

    /// 切换光标处条目并向展示层下发重载
    pub fn toggle_selected(&mut self) {
        let Some(index) = self.cursor_index() else {
            return;
        };

        let row_id = match self.screen.toggle_item(index) {
            Ok(id) => id.to_owned(),
            Err(e) => {
                warn!("切换失败: {e}");
                self.message = Some(e.to_string());
                return;
            }
        };
        debug!("条目已切换: {index:?}，所在行 {row_id}");

        let plan = compute_reload_set(&self.rendered, &self.screen);
        self.apply_plan(plan, &row_id);
    }

    /// 把重载计划交给当前差分策略处理
    fn apply_plan(&mut self, plan: ReloadPlan, row_id: &str) {
        if !plan.structural.is_empty() {
            // id 的增删两种策略都能看到，结构变化一律整体重建
            self.rendered.apply_reload(&self.screen, &plan);
            info!("结构性变化，整体重建展示快照");
            self.record(ReloadEvent::StructuralResync);
            return;
        }

        match self.policy {
            DiffPolicy::RowContents => {
                let rows: Vec<String> = plan.reload.iter().cloned().collect();
                self.rendered.apply_reload(&self.screen, &plan);
                info!("行已重载: {rows:?}");
                self.message = Some(format!("已重载行 {row_id}"));
                self.record(ReloadEvent::RowsReloaded(rows));
            }
            DiffPolicy::RowIdentity => {
                // 行 id 没变，等值差分认为无事发生，展示快照保持过期内容
                info!("重载被跳过，行 {row_id} 标识未变");
                self.message = Some(format!("行 {row_id} 被标识差分跳过，显示已过期"));
                self.record(ReloadEvent::SkippedByIdentity(row_id.to_owned()));
            }
        }
    }

    // ============ 展示层控制 ============

    /// 切换差分策略
    pub fn cycle_policy(&mut self) {
        self.policy = self.policy.cycled();
        info!("差分策略切换为: {}", self.policy.label());
        self.message = Some(format!("差分策略: {}", self.policy.label()));
    }

    /// 全量刷新：展示快照与数据源强制同步
    pub fn refresh_rendered(&mut self) {
        self.rendered = self.screen.clone();
        info!("全量刷新展示快照");
        self.message = Some("已全量刷新".to_string());
        self.record(ReloadEvent::FullResync);
    }

    /// 清空重载日志
    pub fn clear_journal(&mut self) {
        self.journal.clear();
        self.message = None;
    }
}
