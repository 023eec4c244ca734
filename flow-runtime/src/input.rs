//! # Input 模块
//!
//! 定义 Host 向 Runtime 传递的输入事件。
//!
//! ## 设计说明
//!
//! - `FlowInput` 是 Host 采集用户操作后，传递给 Runtime 的抽象输入
//! - Runtime 不直接处理按键/传感器事件，只处理语义化的输入
//! - 外部任务（拍摄、视频播放）的状态由 Host 轮询后以
//!   `CaptureStatus` / `Signal` 形式回传

use serde::{Deserialize, Serialize};

/// 信号标识符
///
/// 用于等待外部系统（如视频播放器）通知 Runtime 继续执行。
pub type SignalId = String;

/// 完成触发标记
///
/// 页面完成信号携带的整数标记，标识由哪位参与者或哪个分支
/// 触发了完成。`0` 表示未指定，`1` / `2` 表示对应参与者。
pub type TriggerInfo = i32;

/// Host 向 Runtime 传递的输入
///
/// Runtime 通过 `tick(dt, input)` 接收这些输入。过渡进行中
/// 收到的输入一律被忽略。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FlowInput {
    /// 光标移动请求（网格页）
    ///
    /// `dx` / `dy` 为有符号步长；双轴同时非零视为轴冲突，
    /// 按网格配置的冲突规则处理。
    Move { dx: i32, dy: i32 },

    /// 参与者按键（intro / 问答 / 确认页）
    Trigger { participant: i32 },

    /// 跳过当前页面（立即完成，标记 0）
    Skip,

    /// 外部信号（解除视频页等待）
    Signal { id: SignalId },

    /// 外部拍摄任务状态回报（Host 轮询 CaptureService 后传入）
    CaptureStatus { busy: bool, succeeded: bool },
}

impl FlowInput {
    /// 创建移动输入
    pub fn move_by(dx: i32, dy: i32) -> Self {
        Self::Move { dx, dy }
    }

    /// 创建参与者按键输入
    pub fn trigger(participant: i32) -> Self {
        Self::Trigger { participant }
    }

    /// 创建跳过输入
    pub fn skip() -> Self {
        Self::Skip
    }

    /// 创建信号输入
    pub fn signal(id: impl Into<SignalId>) -> Self {
        Self::Signal { id: id.into() }
    }

    /// 创建拍摄状态回报
    pub fn capture_status(busy: bool, succeeded: bool) -> Self {
        Self::CaptureStatus { busy, succeeded }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_creation() {
        assert_eq!(FlowInput::move_by(1, 0), FlowInput::Move { dx: 1, dy: 0 });
        assert_eq!(FlowInput::trigger(2), FlowInput::Trigger { participant: 2 });
        assert_eq!(FlowInput::skip(), FlowInput::Skip);
        assert_eq!(
            FlowInput::signal("video_finished"),
            FlowInput::Signal {
                id: "video_finished".to_string()
            }
        );
    }

    #[test]
    fn test_input_serialization() {
        let input = FlowInput::CaptureStatus {
            busy: false,
            succeeded: true,
        };
        let json = serde_json::to_string(&input).unwrap();
        let deserialized: FlowInput = serde_json::from_str(&json).unwrap();
        assert_eq!(input, deserialized);
    }
}
