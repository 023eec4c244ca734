//! # Camera 模块
//!
//! 拍摄页：倒计时后驱动外部拍摄任务，轮询其完成状态。
//!
//! ## 执行模型
//!
//! ```text
//! Countdown ──► Capturing ──(succeeded)──► 完成
//!                   │
//!                   └──(failed)──► 按失败策略重试或照常完成
//! ```
//!
//! 拍摄服务是不透明的外部协作方：核心只发出
//! [`Command::StartCapture`] / [`Command::StopCapture`]，
//! 由 Host 轮询后以 [`FlowInput::CaptureStatus`] 回报。
//! 失败的处理由本页面的配置决定，流程状态机自身从不重试。

use serde::{Deserialize, Serialize};

use crate::command::Command;
use crate::config::{CaptureFailurePolicy, PageConfig};
use crate::input::{FlowInput, TriggerInfo};
use crate::journal::FlowEvent;
use crate::page::{PageContract, PageTick};
use crate::state::Timer;

/// 拍摄页子状态
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
enum CameraStep {
    /// 倒计时
    Countdown {
        timer: Timer,
        /// 上一次下发的整秒数（避免重复提示）
        last_cue: u32,
    },
    /// 拍摄任务进行中
    Capturing {
        /// 第几次尝试（从 1 开始）
        attempt: u32,
    },
    /// 已发出完成信号
    Done,
}

/// 拍摄页
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraPage {
    /// 倒计时时长（秒）
    countdown: f64,
    /// 失败处理策略
    on_failure: CaptureFailurePolicy,
    /// 当前子状态
    step: CameraStep,
}

impl CameraPage {
    /// 创建拍摄页
    pub fn new(countdown: f64, on_failure: CaptureFailurePolicy) -> Self {
        Self {
            countdown,
            on_failure,
            step: CameraStep::Done,
        }
    }

    /// 倒计时初始子状态
    fn initial_step(&self) -> CameraStep {
        CameraStep::Countdown {
            timer: Timer::new(self.countdown.max(0.0)),
            last_cue: u32::MAX,
        }
    }

    /// 启动（或重试）拍摄任务
    fn start_capture(attempt: u32, out: &mut PageTick) -> CameraStep {
        out.commands.push(Command::StartCapture);
        out.events.push(FlowEvent::CaptureStarted { attempt });
        CameraStep::Capturing { attempt }
    }
}

impl PageContract for CameraPage {
    fn setup_data(&mut self, data: &PageConfig) -> bool {
        match data {
            PageConfig::Camera {
                countdown,
                on_failure,
            } => {
                self.countdown = *countdown;
                self.on_failure = *on_failure;
                true
            }
            _ => false,
        }
    }

    fn on_enter(&mut self) {
        self.step = self.initial_step();
    }

    fn on_exit(&mut self) {
        self.step = CameraStep::Done;
    }

    fn receive_trigger(&mut self, _trigger: TriggerInfo) {
        // 拍摄对两位参与者一视同仁
    }

    fn tick(&mut self, dt: f64, input: Option<&FlowInput>) -> PageTick {
        let mut out = PageTick::empty();

        // 跳过：中止进行中的拍摄任务后立即完成
        if matches!(input, Some(FlowInput::Skip)) {
            if matches!(self.step, CameraStep::Capturing { .. }) {
                out.commands.push(Command::StopCapture);
            }
            if !matches!(self.step, CameraStep::Done) {
                self.step = CameraStep::Done;
                out.complete(0);
            }
            return out;
        }

        let step = std::mem::replace(&mut self.step, CameraStep::Done);
        self.step = match step {
            CameraStep::Countdown {
                mut timer,
                mut last_cue,
            } => {
                if timer.advance(dt) {
                    Self::start_capture(1, &mut out)
                } else {
                    // 剩余整秒数变化时下发一次提示
                    let remaining = (timer.duration - timer.elapsed).max(0.0);
                    let cue = remaining.ceil() as u32;
                    if cue != last_cue {
                        out.commands.push(Command::Countdown { seconds_left: cue });
                        last_cue = cue;
                    }
                    CameraStep::Countdown { timer, last_cue }
                }
            }

            CameraStep::Capturing { attempt } => match input {
                Some(FlowInput::CaptureStatus {
                    busy: false,
                    succeeded: true,
                }) => {
                    out.complete(0);
                    CameraStep::Done
                }
                Some(FlowInput::CaptureStatus {
                    busy: false,
                    succeeded: false,
                }) => {
                    out.events.push(FlowEvent::CaptureFailed { attempt });
                    let retry = match self.on_failure {
                        CaptureFailurePolicy::Proceed => false,
                        CaptureFailurePolicy::Retry { max } => attempt <= max,
                    };
                    if retry {
                        Self::start_capture(attempt + 1, &mut out)
                    } else {
                        out.complete(0);
                        CameraStep::Done
                    }
                }
                // 仍在进行中（或无回报）：继续等待
                _ => CameraStep::Capturing { attempt },
            },

            CameraStep::Done => CameraStep::Done,
        };

        out
    }
}
