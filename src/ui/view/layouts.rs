//! 布局辅助函数

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// 在给定区域中按百分比居中取一块矩形
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// 计算水平滚动窗口的起点，让光标尽量居中且窗口不越界
pub fn scroll_window(len: usize, visible: usize, cursor: usize) -> usize {
    if visible == 0 || len <= visible {
        0
    } else {
        cursor.saturating_sub(visible / 2).min(len - visible)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_window() {
        // 全部可见时不滚动
        assert_eq!(scroll_window(3, 5, 2), 0);
        // 光标靠边时窗口贴边
        assert_eq!(scroll_window(9, 3, 0), 0);
        assert_eq!(scroll_window(9, 3, 8), 6);
        // 中段光标居中
        assert_eq!(scroll_window(9, 3, 4), 3);
    }
}
