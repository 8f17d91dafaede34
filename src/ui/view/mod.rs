//! 视图层模块
//!
//! 纯函数，将 App 状态映射为 UI。
//! 板面一律画 `rendered` 快照，数据源只出现在详情面板里，
//! 两者不一致时正好把重载缺陷摆在眼前。

pub mod components;
pub mod layouts;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};

use super::state::{App, ReloadEvent};
use crate::models::Section;
use components::{render_dialog_framework, render_swatch_strip};
use layouts::centered_rect;

/// 渲染 UI
pub fn render(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // 标题
            Constraint::Min(10),   // 板面
            Constraint::Length(4), // 详情
            Constraint::Length(7), // 重载日志
            Constraint::Length(3), // 帮助
        ])
        .split(frame.area());

    render_title(frame, app, chunks[0]);
    render_board(frame, app, chunks[1]);
    render_details(frame, app, chunks[2]);
    render_journal(frame, app, chunks[3]);
    render_status(frame, app, chunks[4]);

    if app.show_help {
        render_help_dialog(frame);
    }
}

fn render_title(frame: &mut Frame, app: &App, area: Rect) {
    let title = Paragraph::new(format!(
        "🎠 嵌套色块板  |  差分策略: {}",
        app.policy.label()
    ))
    .style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, area);
}

fn render_board(frame: &mut Frame, app: &App, area: Rect) {
    if app.rendered.sections.is_empty() {
        let empty = Paragraph::new("配置中没有任何区块")
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(empty, area);
        return;
    }

    let count = app.rendered.sections.len() as u32;
    let constraints: Vec<Constraint> = app
        .rendered
        .sections
        .iter()
        .map(|_| Constraint::Ratio(1, count))
        .collect();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (si, (section, chunk)) in app.rendered.sections.iter().zip(chunks.iter()).enumerate() {
        render_section(frame, app, si, section, *chunk);
    }
}

fn render_section(frame: &mut Frame, app: &App, si: usize, section: &Section, area: Rect) {
    let block = Block::default()
        .title(format!(" {} ", section.id))
        .borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if section.rows.is_empty() {
        return;
    }

    let count = section.rows.len() as u32;
    let constraints: Vec<Constraint> = section
        .rows
        .iter()
        .map(|_| Constraint::Ratio(1, count))
        .collect();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    for (ri, (row, chunk)) in section.rows.iter().zip(chunks.iter()).enumerate() {
        render_swatch_strip(frame, *chunk, row, app.cursor_position(si, ri));
    }
}

fn render_details(frame: &mut Frame, app: &App, area: Rect) {
    let content = match (app.selected_item(), app.selected_rendered_item()) {
        (Some(model), Some(shown)) => {
            let verdict = if model.state == shown.state {
                "一致"
            } else {
                "显示过期!"
            };
            format!(
                "条目 #{}  颜色: {}\n模型状态: {}  显示状态: {}  [{}]",
                model.id,
                model.color,
                on_off(model.state),
                on_off(shown.state),
                verdict,
            )
        }
        _ => "没有可选中的条目".to_string(),
    };

    let details = Paragraph::new(content)
        .block(Block::default().title("详情").borders(Borders::ALL))
        .wrap(Wrap { trim: true });
    frame.render_widget(details, area);
}

fn render_journal(frame: &mut Frame, app: &App, area: Rect) {
    // 最新的排最上面
    let items: Vec<ListItem> = app
        .journal
        .iter()
        .rev()
        .map(|record| {
            let style = match &record.event {
                ReloadEvent::SkippedByIdentity(_) => Style::default().fg(Color::Red),
                ReloadEvent::RowsReloaded(_) => Style::default().fg(Color::Green),
                _ => Style::default().fg(Color::Cyan),
            };
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{} ", record.at.format("%H:%M:%S")),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(record.event.describe(), style),
            ]))
        })
        .collect();

    let list =
        List::new(items).block(Block::default().title("重载日志").borders(Borders::ALL));
    frame.render_widget(list, area);
}

fn render_status(frame: &mut Frame, app: &App, area: Rect) {
    let help_text =
        "[空格] 切换  [h/j/k/l] 移动  [b] 差分策略  [u] 全量刷新  [c] 清空日志  [?] 帮助  [q] 退出";

    let message = app.message.as_deref().unwrap_or("");
    let text = if message.is_empty() {
        help_text.to_string()
    } else {
        format!("{}  |  {}", help_text, message)
    };

    let help = Paragraph::new(text)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(help, area);
}

fn render_help_dialog(frame: &mut Frame) {
    let area = centered_rect(64, 60, frame.area());
    let inner = render_dialog_framework(frame, area, "按键说明");

    let text = "空格/Enter   切换光标处条目的选中状态\n\
                h/l ←/→      行内左右移动\n\
                j/k ↓/↑      在行之间移动\n\
                b            切换差分策略（行内容 / 仅行标识）\n\
                u            全量刷新展示快照\n\
                c            清空重载日志\n\
                ?            关闭本帮助\n\
                q            退出\n\
                \n\
                “仅行标识”策略下，行 id 未变的重载会被跳过，\n\
                板面显示过期内容，详情面板会标出模型与显示的差异。";

    let help = Paragraph::new(text).wrap(Wrap { trim: true });
    frame.render_widget(help, inner);
}

fn on_off(state: bool) -> &'static str {
    if state { "On" } else { "Off" }
}
