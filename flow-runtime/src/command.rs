//! # Command 模块
//!
//! 定义 Runtime 向 Host 发出的所有指令。
//! Command 是 Runtime 与 Host（Presenter / CaptureService / SceneHost）
//! 之间的**唯一输出通道**。
//!
//! ## 设计原则
//!
//! - **声明式**：Command 描述"做什么"，不描述"怎么做"
//! - **无副作用**：Command 本身不执行任何操作
//! - **引擎无关**：不包含任何渲染引擎的类型
//!
//! 网格遮罩缓冲不经过 Command 传输：Presenter 直接通过
//! [`crate::flow::FlowController::mask_buffer`] 只读访问。

use serde::{Deserialize, Serialize};

/// 全屏遮挡层样式
///
/// Cover / Blackout 过渡用全屏遮挡层隐藏页面切换，
/// 具体外观由 Host 解释。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoverStyle {
    /// 装饰面板（Cover 过渡）
    Panel,
    /// 纯黑（Blackout 过渡）
    Black,
}

/// 警示闪烁提示类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlinkCue {
    /// 长时间无输入提示
    Idle,
    /// 非法移动提示（双轴同时输入）
    InvalidMove,
}

/// Runtime 向 Host 发出的指令
///
/// Host 接收 Command 后，将其转换为实际的渲染、拍摄、跳转等操作。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Command {
    /// 设置页面不透明度（[0, 1]）
    PageOpacity {
        /// 页面索引
        page: usize,
        /// 不透明度
        opacity: f64,
    },

    /// 设置全屏遮挡层不透明度
    CoverOpacity {
        /// 遮挡层样式
        style: CoverStyle,
        /// 不透明度
        opacity: f64,
    },

    /// 显示问答页当前问题
    ShowQuestion {
        /// 问题索引（从 0 开始）
        index: usize,
        /// 问题文本
        text: String,
    },

    /// 点亮某位参与者的确认标记
    ConfirmMark {
        /// 参与者编号（1 或 2）
        participant: i32,
    },

    /// 播放一次警示闪烁
    Blink {
        /// 提示类型
        cue: BlinkCue,
    },

    /// 设置"已解开"覆盖层不透明度（网格完成序列）
    SolvedOverlay {
        /// 不透明度
        opacity: f64,
    },

    /// 设置网格与背景整体不透明度（完成序列淡出）
    GridOpacity {
        /// 不透明度
        opacity: f64,
    },

    /// 拍摄倒计时提示
    Countdown {
        /// 剩余整秒数
        seconds_left: u32,
    },

    /// 启动外部拍摄任务
    StartCapture,

    /// 中止外部拍摄任务
    StopCapture,

    /// 播放视频
    PlayVideo {
        /// 视频路径
        path: String,
    },

    /// 流程结束，切换到下一个场景（SceneHost）
    ///
    /// 整个流程生命周期内恰好发出一次。
    GoTo {
        /// 目标场景标识
        destination: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_serialization() {
        let cmd = Command::PageOpacity {
            page: 2,
            opacity: 0.5,
        };

        let json = serde_json::to_string(&cmd).unwrap();
        let deserialized: Command = serde_json::from_str(&json).unwrap();
        assert_eq!(cmd, deserialized);
    }

    #[test]
    fn test_cover_styles_distinct() {
        let cover = Command::CoverOpacity {
            style: CoverStyle::Panel,
            opacity: 1.0,
        };
        let blackout = Command::CoverOpacity {
            style: CoverStyle::Black,
            opacity: 1.0,
        };
        assert_ne!(cover, blackout);
    }

    #[test]
    fn test_blink_cue_serialization() {
        let cmd = Command::Blink {
            cue: BlinkCue::InvalidMove,
        };
        let json = serde_json::to_string(&cmd).unwrap();
        let loaded: Command = serde_json::from_str(&json).unwrap();
        assert_eq!(cmd, loaded);
    }
}
