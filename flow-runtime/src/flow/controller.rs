//! # Controller 模块
//!
//! 流程控制器：持有页面数组，驱动页面推进与过渡执行。
//!
//! ## 执行模型
//!
//! ```text
//! tick(dt, input) -> (Vec<Command>, FlowStatus)
//! ```
//!
//! 1. 首次 tick 发起入场过渡（None -> 0）
//! 2. 过渡进行中：推进过渡状态机，忽略一切输入
//! 3. 空闲：把输入转交当前页面；页面发出完成信号时，
//!    计算 next = i + 1 并发起过渡；越过末页则通知 SceneHost
//!
//! ## 不变量
//!
//! - 任一时刻至多一个页面 Active（过渡期间可以没有）
//! - 过渡闩锁：进行中收到的新过渡请求被丢弃，不排队
//! - 流程结束时 GoTo 恰好发出一次

use std::collections::HashMap;

use crate::command::Command;
use crate::config::{FlowConfig, PageConfig};
use crate::diagnostic::{DiagnosticLevel, analyze_config};
use crate::error::ConfigError;
use crate::flow::transition::{TransitionPolicy, TransitionRun};
use crate::grid::MaskBuffer;
use crate::input::{FlowInput, TriggerInfo};
use crate::journal::{DropReason, FlowEvent, Journal};
use crate::page::{Page, PageContract, PageSignal};
use crate::state::{FlowStatus, Lifecycle};

/// 页面槽位
///
/// 控制器独占页面的生命周期与排序；槽位为空时流程跳过该页
/// （例如 Host 在硬件缺失时摘除拍摄页）。
#[derive(Debug)]
pub struct PageSlot {
    /// 页面（None 表示槽位为空）
    pub(crate) page: Option<Page>,
    /// 生命周期状态
    pub(crate) lifecycle: Lifecycle,
    /// 不透明度 [0, 1]
    pub(crate) opacity: f64,
}

impl PageSlot {
    /// 创建持有页面的槽位
    pub(crate) fn new(page: Page) -> Self {
        Self {
            page: Some(page),
            lifecycle: Lifecycle::Inactive,
            opacity: 0.0,
        }
    }

    /// 页面引用
    pub fn page(&self) -> Option<&Page> {
        self.page.as_ref()
    }

    /// 生命周期状态
    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// 不透明度
    pub fn opacity(&self) -> f64 {
        self.opacity
    }
}

/// 流程控制器
///
/// # 使用示例
///
/// ```ignore
/// let config = FlowConfig::from_json(&text)?;
/// let mut flow = FlowController::new(config)?;
///
/// loop {
///     let (commands, status) = flow.tick(dt, input.take());
///
///     // Host 执行 commands、读取 flow.mask_buffer() 渲染网格...
///
///     if status.is_finished() {
///         break;
///     }
/// }
/// ```
pub struct FlowController {
    /// 页面槽位（顺序即流程顺序）
    slots: Vec<PageSlot>,
    /// 当前页面索引（入场前为 None）
    current: Option<usize>,
    /// 流程状态
    status: FlowStatus,
    /// 进行中的过渡（status 为 Transitioning 时存在）
    transition: Option<TransitionRun>,
    /// (from, to) 页面对到过渡策略的映射
    policies: HashMap<(Option<usize>, usize), TransitionPolicy>,
    /// 流程结束后的目标场景
    destination: String,
    /// 运行日志
    journal: Journal,
    /// 入场过渡是否已发起
    started: bool,
}

impl FlowController {
    /// 按配置构建流程
    ///
    /// 这是唯一允许阻断前进的失败点：配置校验有错误时返回
    /// [`ConfigError::Validation`]，之后的一切运行期异常都降级
    /// 为日志化的 no-op。
    pub fn new(config: FlowConfig) -> Result<Self, ConfigError> {
        let report = analyze_config(&config);
        if report.has_errors() {
            let first = report
                .diagnostics
                .iter()
                .find(|d| d.level == DiagnosticLevel::Error)
                .map(|d| d.message.clone())
                .unwrap_or_default();
            return Err(ConfigError::Validation {
                errors: report.error_count(),
                first,
            });
        }

        let slots = config
            .pages
            .iter()
            .map(|page| PageSlot::new(Page::from_config(page)))
            .collect();

        // 重复注册时后者生效（诊断阶段已告警）
        let mut policies = HashMap::new();
        for rule in &config.policies {
            policies.insert((rule.from_index(), rule.to), rule.policy);
        }

        Ok(Self {
            slots,
            current: None,
            status: FlowStatus::Idle,
            transition: None,
            policies,
            destination: config.destination,
            journal: Journal::new(),
            started: false,
        })
    }

    /// 核心驱动函数
    ///
    /// 根据输入与耗时推进流程，返回产生的 Command 和流程状态。
    /// 从不返回错误：运行期的可恢复状况一律降级为日志。
    pub fn tick(&mut self, dt: f64, input: Option<FlowInput>) -> (Vec<Command>, FlowStatus) {
        let mut commands = Vec::new();

        if self.status.is_finished() {
            return (commands, self.status);
        }

        // 首次 tick：发起入场过渡（None -> 0）
        if !self.started {
            self.started = true;
            self.try_request(0, 0, &mut commands);
        }

        // 过渡进行中：推进过渡，忽略一切输入（包括提前完成请求）
        if let Some(mut run) = self.transition.take() {
            let done = run.tick(dt, &mut self.slots, &mut commands, &mut self.journal);
            if done {
                let to = run.to();
                if let Some(slot) = self.slots.get_mut(to) {
                    slot.lifecycle = Lifecycle::Active;
                }
                self.current = Some(to);
                self.status = FlowStatus::Idle;
                self.journal.record(FlowEvent::TransitionFinished { to });
            } else {
                self.transition = Some(run);
            }
            return (commands, self.status);
        }

        // 空闲：推进当前页面
        if let Some(index) = self.current {
            match self.slots.get_mut(index).and_then(|s| s.page.as_mut()) {
                Some(page) => {
                    let result = page.tick(dt, input.as_ref());
                    commands.extend(result.commands);
                    for event in result.events {
                        self.record_page_event(index, event);
                    }
                    if let Some(PageSignal::Completed { trigger }) = result.signal {
                        self.journal.record(FlowEvent::PageCompleted {
                            page: index,
                            trigger,
                        });
                        self.advance_from(index, trigger, &mut commands);
                    }
                }
                None => {
                    // 空槽位：视为已完成，跳过该页继续
                    self.journal
                        .record(FlowEvent::NullPageSkipped { page: index });
                    self.advance_from(index, 0, &mut commands);
                }
            }
        }

        (commands, self.status)
    }

    /// 请求过渡到指定页面
    ///
    /// 过渡进行中或目标越界时为 no-op（记日志，不排队）。
    /// 返回本次请求即时产生的 Command。
    pub fn request_transition(
        &mut self,
        target: usize,
        trigger: TriggerInfo,
    ) -> Vec<Command> {
        let mut commands = Vec::new();
        self.try_request(target, trigger, &mut commands);
        commands
    }

    /// 流程状态
    pub fn status(&self) -> FlowStatus {
        self.status
    }

    /// 当前页面索引（入场前为 None）
    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    /// 流程是否已结束
    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    /// 页面数量
    pub fn page_count(&self) -> usize {
        self.slots.len()
    }

    /// 页面槽位
    pub fn slot(&self, index: usize) -> Option<&PageSlot> {
        self.slots.get(index)
    }

    /// 运行日志
    pub fn journal(&self) -> &Journal {
        &self.journal
    }

    /// 当前网格页的遮罩缓冲（Presenter 只读访问）
    ///
    /// 当前页面不是网格页时返回 None。
    pub fn mask_buffer(&self) -> Option<&MaskBuffer> {
        let index = self.current?;
        match self.slots.get(index)?.page.as_ref()? {
            Page::Grid(engine) => Some(engine.mask()),
            _ => None,
        }
    }

    /// 摘除页面（槽位保留，流程将跳过该页）
    ///
    /// 供 Host 在外部条件缺失（如相机硬件不可用）时使用。
    pub fn remove_page(&mut self, index: usize) -> Option<Page> {
        self.slots.get_mut(index)?.page.take()
    }

    /// 重新装配页面数据
    ///
    /// 数据种类与页面不匹配时忽略并记日志，绝不向外抛错。
    pub fn setup_page_data(&mut self, index: usize, data: &PageConfig) {
        let Some(slot) = self.slots.get_mut(index) else {
            return;
        };
        let Some(page) = slot.page.as_mut() else {
            return;
        };
        if !page.setup_data(data) {
            let expected = page.kind_name().to_string();
            self.journal.record(FlowEvent::DataMismatch {
                page: index,
                expected,
                actual: data.kind_name().to_string(),
            });
        }
    }

    /// 发起过渡（闩锁与越界检查）
    fn try_request(&mut self, target: usize, trigger: TriggerInfo, out: &mut Vec<Command>) -> bool {
        if self.status.is_finished() {
            self.journal.record(FlowEvent::RequestDropped {
                target,
                reason: DropReason::FlowFinished,
            });
            return false;
        }
        if self.status.is_transitioning() {
            self.journal.record(FlowEvent::RequestDropped {
                target,
                reason: DropReason::Transitioning,
            });
            return false;
        }
        if target >= self.slots.len() {
            self.journal.record(FlowEvent::RequestDropped {
                target,
                reason: DropReason::OutOfBounds,
            });
            return false;
        }

        let policy = match self.policies.get(&(self.current, target)) {
            Some(policy) => *policy,
            None => {
                // 未注册的页面对：回退到默认 Sequential
                self.journal.record(FlowEvent::PolicyFallback {
                    from: self.current,
                    to: target,
                });
                TransitionPolicy::sequential_default()
            }
        };

        self.journal.record(FlowEvent::TransitionStarted {
            from: self.current,
            to: target,
            policy: policy.name().to_string(),
        });
        self.status = FlowStatus::Transitioning;
        self.transition = Some(TransitionRun::new(
            policy,
            self.current,
            target,
            trigger,
            &mut self.slots,
            out,
            &mut self.journal,
        ));
        true
    }

    /// 页面 i 完成后前进到 i + 1，越过末页则结束流程
    fn advance_from(&mut self, index: usize, trigger: TriggerInfo, out: &mut Vec<Command>) {
        let next = index + 1;
        if next < self.slots.len() {
            self.try_request(next, trigger, out);
        } else {
            self.status = FlowStatus::Finished;
            out.push(Command::GoTo {
                destination: self.destination.clone(),
            });
            self.journal.record(FlowEvent::FlowFinished {
                destination: self.destination.clone(),
            });
        }
    }

    /// 补全页面事件中的页面索引后记入日志
    fn record_page_event(&mut self, index: usize, mut event: FlowEvent) {
        match &mut event {
            FlowEvent::StageCompleted { page }
            | FlowEvent::IdleWarning { page }
            | FlowEvent::InvalidMove { page, .. } => *page = index,
            _ => {}
        }
        self.journal.record(event);
    }
}
