//! # Flow Runtime
//!
//! 多阶段互动装置的核心运行时库。
//!
//! ## 架构概述
//!
//! `flow-runtime` 是纯逻辑核心，不依赖任何 IO 或渲染引擎。
//! 它通过 **命令驱动模式** 与宿主层（Host）通信：
//!
//! ```text
//! Host                               Runtime
//!   │                                   │
//!   │──── FlowInput ──────────────────►│
//!   │                                   │ tick(dt)
//!   │◄─── (Vec<Command>, FlowStatus) ──│
//!   │◄─── mask_buffer()（只读） ────────│
//!   │                                   │
//! ```
//!
//! 流程是一串全屏"页面"（开场、网格探索、双人确认、拍摄、
//! 视频播放），由流程控制器按具名过渡策略串联；页面完成信号
//! 携带触发标记（哪位参与者触发），用于选择下一页与过渡效果。
//!
//! ## 核心类型
//!
//! - [`FlowController`]：流程控制器（页面数组 + 过渡闩锁）
//! - [`Command`]：Runtime 向 Host 发出的指令
//! - [`FlowInput`]：Host 向 Runtime 传递的输入
//! - [`TransitionPolicy`]：具名过渡策略
//! - [`GridRevealEngine`]：网格探索引擎（雾中逐格软揭示）
//!
//! ## 使用示例
//!
//! ```ignore
//! use flow_runtime::{FlowConfig, FlowController};
//!
//! // 加载配置并创建流程
//! let config = FlowConfig::from_json(&text)?;
//! let mut flow = FlowController::new(config)?;
//!
//! // 主循环（外部帧时钟驱动）
//! loop {
//!     let (commands, status) = flow.tick(dt, input.take());
//!
//!     // Host 执行 commands
//!     for cmd in commands {
//!         host.execute(cmd);
//!     }
//!
//!     // 渲染网格遮罩
//!     if let Some(mask) = flow.mask_buffer() {
//!         host.draw_mask(mask);
//!     }
//!
//!     if status.is_finished() {
//!         break; // SceneHost 已收到 GoTo
//!     }
//! }
//! ```
//!
//! ## 模块结构
//!
//! - [`command`]：Command 定义
//! - [`input`]：FlowInput 定义
//! - [`state`]：生命周期、流程状态与显式计时原语
//! - [`config`]：流程配置数据模型
//! - [`error`]：错误类型定义
//! - [`diagnostic`]：配置静态检查
//! - [`journal`]：运行日志
//! - [`flow`]：流程控制器与过渡策略
//! - [`page`]：页面契约与各页面实现
//! - [`grid`]：网格探索引擎

pub mod command;
pub mod config;
pub mod diagnostic;
pub mod error;
pub mod flow;
pub mod grid;
pub mod input;
pub mod journal;
pub mod page;
pub mod state;

// 重导出核心类型
pub use command::{BlinkCue, Command, CoverStyle};
pub use config::{
    AxisConflictRule, CaptureFailurePolicy, FlowConfig, GridSettings, PageConfig, PolicyRule,
};
pub use diagnostic::{
    Diagnostic, DiagnosticLevel, DiagnosticResult, analyze_config,
};
pub use error::{ConfigError, FlowResult};
pub use flow::{FlowController, PageSlot, TransitionPolicy};
pub use grid::{GridPhase, GridRevealEngine, MaskBuffer};
pub use input::{FlowInput, SignalId, TriggerInfo};
pub use journal::{DropReason, FlowEvent, Journal, JournalEntry};
pub use page::{Page, PageContract, PageSignal, PageTick};
pub use state::{Fade, FlowStatus, Lifecycle, Timer};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_api_accessible() {
        // 验证所有公共类型都可以正常使用
        let _cmd = Command::PageOpacity {
            page: 0,
            opacity: 1.0,
        };

        let _input = FlowInput::Skip;

        let _status = FlowStatus::Idle;

        let _policy = TransitionPolicy::sequential_default();
    }
}
