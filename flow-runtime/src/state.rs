//! # State 模块
//!
//! 定义页面生命周期、流程状态和显式计时原语。
//!
//! ## 设计原则
//!
//! - 所有状态必须**显式建模**
//! - 所有状态必须**可序列化**
//! - 所有"等待 N 秒"都是带累积耗时字段的显式状态，
//!   由 tick 函数以单调耗时推进，不依赖帧计数
//!
//! ## 等待模型
//!
//! ```text
//! tick(dt) ──► Timer.advance(dt) ──► 未完成：下一帧继续
//!                                └──► 完成：进入下一个子状态
//! ```

use serde::{Deserialize, Serialize};

/// 页面生命周期状态
///
/// 由 FlowController 独占维护，页面自身不修改。
///
/// # 状态转换
///
/// ```text
/// Inactive ──► Entering ──► Active ──► Exiting ──► Inactive
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Lifecycle {
    /// 未激活
    Inactive,
    /// 正在进入（过渡中）
    Entering,
    /// 已激活（接收输入、推进逻辑）
    Active,
    /// 正在退出（过渡中）
    Exiting,
}

impl Lifecycle {
    /// 是否已激活
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::Inactive
    }
}

/// 流程状态
///
/// FlowController 的顶层状态。`Transitioning` 即过渡闩锁：
/// 处于该状态时所有新的过渡请求被丢弃（不排队）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlowStatus {
    /// 空闲（当前页面接收输入）
    Idle,
    /// 过渡进行中（最多一个）
    Transitioning,
    /// 流程结束（已向 SceneHost 发出 GoTo）
    Finished,
}

impl FlowStatus {
    /// 是否处于过渡中
    pub fn is_transitioning(&self) -> bool {
        matches!(self, Self::Transitioning)
    }

    /// 流程是否已结束
    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Finished)
    }
}

/// 显式计时器
///
/// 协程式 "wait N seconds" 的替代：累积耗时字段 + tick 推进。
/// 容忍可变帧长，推进只依赖壁钟耗时。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timer {
    /// 已累积耗时（秒）
    pub elapsed: f64,
    /// 目标时长（秒）
    pub duration: f64,
}

impl Timer {
    /// 创建计时器
    pub fn new(duration: f64) -> Self {
        Self {
            elapsed: 0.0,
            duration,
        }
    }

    /// 推进计时器，返回是否已完成
    ///
    /// 时长小于等于 0 的计时器在第一次推进时立即完成。
    pub fn advance(&mut self, dt: f64) -> bool {
        self.elapsed += dt;
        self.is_done()
    }

    /// 是否已完成
    pub fn is_done(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// 完成进度，钳制在 [0, 1]
    pub fn progress(&self) -> f64 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        (self.elapsed / self.duration).clamp(0.0, 1.0)
    }

    /// 重置为未开始
    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }
}

/// 线性渐变
///
/// 所有淡入淡出的统一数值法则：标量在 [0, 1] 区间内
/// 按壁钟耗时 / 固定时长线性插值，钳制后在完成时
/// **精确对齐到端点值**（不留亚 ULP 级残差）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fade {
    /// 起始值
    pub from: f64,
    /// 目标值
    pub to: f64,
    /// 计时器
    pub timer: Timer,
}

impl Fade {
    /// 创建渐变
    pub fn new(from: f64, to: f64, duration: f64) -> Self {
        Self {
            from,
            to,
            timer: Timer::new(duration),
        }
    }

    /// 推进渐变，返回是否已完成
    pub fn advance(&mut self, dt: f64) -> bool {
        self.timer.advance(dt)
    }

    /// 是否已完成
    pub fn is_done(&self) -> bool {
        self.timer.is_done()
    }

    /// 当前插值结果
    ///
    /// 完成后直接返回目标值，保证端点精确。
    pub fn value(&self) -> f64 {
        if self.timer.is_done() {
            return self.to;
        }
        let t = self.timer.progress();
        self.from + (self.to - self.from) * t
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifecycle_default_inactive() {
        assert_eq!(Lifecycle::default(), Lifecycle::Inactive);
        assert!(!Lifecycle::Inactive.is_active());
        assert!(Lifecycle::Active.is_active());
    }

    #[test]
    fn test_flow_status() {
        assert!(FlowStatus::Transitioning.is_transitioning());
        assert!(!FlowStatus::Idle.is_transitioning());
        assert!(FlowStatus::Finished.is_finished());
    }

    #[test]
    fn test_timer_advance() {
        let mut timer = Timer::new(1.0);
        assert!(!timer.advance(0.4));
        assert!(!timer.is_done());
        assert!((timer.progress() - 0.4).abs() < 1e-12);

        // 跨过终点
        assert!(timer.advance(0.7));
        assert!(timer.is_done());
        assert_eq!(timer.progress(), 1.0);
    }

    #[test]
    fn test_timer_zero_duration_completes_immediately() {
        let mut timer = Timer::new(0.0);
        assert!(timer.advance(0.0));
        assert_eq!(timer.progress(), 1.0);
    }

    #[test]
    fn test_timer_reset() {
        let mut timer = Timer::new(0.5);
        timer.advance(0.5);
        assert!(timer.is_done());

        timer.reset();
        assert!(!timer.is_done());
        assert_eq!(timer.elapsed, 0.0);
    }

    #[test]
    fn test_fade_linear_interpolation() {
        let mut fade = Fade::new(0.0, 1.0, 0.5);
        assert_eq!(fade.value(), 0.0);

        fade.advance(0.25);
        assert!((fade.value() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_fade_endpoint_exact() {
        // 端点精确性：完成后必须恰好等于目标值，不能有残差
        let mut fade = Fade::new(0.1, 1.0, 0.3);
        fade.advance(0.2);
        fade.advance(0.2);
        assert!(fade.is_done());
        assert_eq!(fade.value(), 1.0);

        let mut out = Fade::new(0.73, 0.0, 0.5);
        out.advance(10.0);
        assert_eq!(out.value(), 0.0);
    }

    #[test]
    fn test_fade_variable_frame_duration() {
        // 不同帧长切分同一渐变，端点一致
        let mut a = Fade::new(0.0, 1.0, 1.0);
        for _ in 0..10 {
            a.advance(0.1);
        }
        let mut b = Fade::new(0.0, 1.0, 1.0);
        b.advance(0.7);
        b.advance(0.3);
        assert!(a.is_done() && b.is_done());
        assert_eq!(a.value(), b.value());
    }

    #[test]
    fn test_state_serialization() {
        let fade = Fade::new(0.0, 1.0, 0.5);
        let json = serde_json::to_string(&fade).unwrap();
        let loaded: Fade = serde_json::from_str(&json).unwrap();
        assert_eq!(fade, loaded);
    }
}
