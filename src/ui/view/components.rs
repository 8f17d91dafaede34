//! 通用 UI 组件
//!
//! 弹窗框架、水平色块条等通用组件

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::layouts::scroll_window;
use crate::models::{Item, Rgb, Row};

/// [组件] 弹窗基础框架
pub fn render_dialog_framework(frame: &mut Frame, area: Rect, title: &str) -> Rect {
    frame.render_widget(Clear, area);
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}

/// [组件] 水平滚动的色块条
///
/// `selected` 为光标所在的条目下标，光标不在本行时为 None
pub fn render_swatch_strip(frame: &mut Frame, area: Rect, row: &Row, selected: Option<usize>) {
    if row.items.is_empty() || area.width < 8 {
        return;
    }

    // 一屏大约放三个色块
    let cell_width = (area.width / 3).clamp(7, 24);
    let visible = (area.width / cell_width).max(1) as usize;
    let offset = scroll_window(row.items.len(), visible, selected.unwrap_or(0));

    let window: Vec<(usize, &Item)> = row
        .items
        .iter()
        .enumerate()
        .skip(offset)
        .take(visible)
        .collect();
    let constraints: Vec<Constraint> = window
        .iter()
        .map(|_| Constraint::Length(cell_width))
        .collect();
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    for ((index, item), chunk) in window.into_iter().zip(chunks.iter()) {
        render_swatch(frame, *chunk, item, selected == Some(index));
    }
}

/// [组件] 单个色块
fn render_swatch(frame: &mut Frame, area: Rect, item: &Item, is_selected: bool) {
    let border_style = if is_selected {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let label = if item.state { "On" } else { "Off" };
    let swatch = Paragraph::new(format!("{label}\n#{}", item.id))
        .alignment(Alignment::Center)
        .style(Style::default().bg(to_color(item.color)).fg(Color::White))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style),
        );

    frame.render_widget(swatch, area);
}

/// 模型颜色到终端颜色
pub fn to_color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}
