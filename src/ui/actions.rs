//! Action 枚举定义 (Intent)
//!
//! 用户交互转化为明确的语义化 Action，
//! 全部经由 App::dispatch 单入口处理。

/// 用户操作枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,

    // 核心交互
    ToggleSelected,

    // 展示层控制
    CyclePolicy,
    Refresh,
    ClearJournal,
    ToggleHelp,
}
