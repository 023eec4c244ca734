//! # Grid Engine 模块
//!
//! 网格探索页的核心状态机。
//!
//! ## 执行模型
//!
//! ```text
//! Init ──► AwaitingFirstMove ──► Exploring ⇄ (格渐变中)
//!                                    │
//!                      所有目标发现  ▼
//!                               Completing ──► Completed
//! ```
//!
//! - 每次接受移动后，目的格的渐变未完成前拒绝新的移动
//! - 非目标格在光标离开后淡回雾中；目标格一经揭示保持揭示
//! - 完成序列：覆盖层淡入 1 秒，保持 2 秒，整体淡出 0.5 秒，
//!   随后发出页面完成信号

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::command::{BlinkCue, Command};
use crate::config::{AxisConflictRule, GridSettings, PageConfig};
use crate::grid::fade::FadeSet;
use crate::grid::mask::MaskBuffer;
use crate::input::{FlowInput, TriggerInfo};
use crate::journal::FlowEvent;
use crate::page::{PageContract, PageTick};
use crate::state::{Fade, Timer};

/// "已解开"覆盖层淡入时长（秒）
const SOLVED_OVERLAY_SECS: f64 = 1.0;
/// 覆盖层保持时长（秒）
const SOLVED_HOLD_SECS: f64 = 2.0;
/// 网格整体淡出时长（秒）
const GRID_FADE_OUT_SECS: f64 = 0.5;

/// 网格阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GridPhase {
    /// 等待首次移动
    AwaitingFirstMove,
    /// 探索中
    Exploring,
    /// 完成序列播放中
    Completing,
    /// 阶段完成（已发出完成信号）
    Completed,
}

/// 完成序列子状态
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
enum CompletionStep {
    /// 覆盖层淡入
    OverlayIn { fade: Fade },
    /// 覆盖层保持
    Hold { timer: Timer },
    /// 网格整体淡出
    FadeOut { fade: Fade },
}

/// 网格探索引擎
///
/// 每格揭示强度写入遮罩缓冲，Presenter 通过 [`GridRevealEngine::mask`]
/// 只读消费；缓冲的唯一写入方是本引擎的渐变推进。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridRevealEngine {
    /// 网格设置（setup 时装配，on_enter 时生效）
    settings: GridSettings,
    /// 目标格集合
    targets: HashSet<(usize, usize)>,
    /// 已发现的目标格（单调增长，on_enter 时重置）
    found: HashSet<(usize, usize)>,
    /// 光标坐标
    cursor: (usize, usize),
    /// 遮罩缓冲
    mask: MaskBuffer,
    /// 渐变任务集合
    fades: FadeSet,
    /// 当前阶段
    phase: GridPhase,
    /// 完成序列状态（仅 Completing 阶段存在）
    completion: Option<CompletionStep>,
    /// 输入阻塞：目的格渐变未完成前拒绝移动
    input_blocked: bool,
    /// 闲置累积时长（秒）
    idle: f64,
    /// 待上报的日志事件（on_enter 产生，下一次 tick 带出）
    pending_events: Vec<FlowEvent>,
}

impl GridRevealEngine {
    /// 创建引擎（惰性：状态在 on_enter 时构建）
    pub fn new(settings: GridSettings) -> Self {
        Self {
            settings,
            targets: HashSet::new(),
            found: HashSet::new(),
            cursor: (0, 0),
            mask: MaskBuffer::new(0),
            fades: FadeSet::new(),
            phase: GridPhase::AwaitingFirstMove,
            completion: None,
            input_blocked: false,
            idle: 0.0,
            pending_events: Vec::new(),
        }
    }

    /// 遮罩缓冲（Presenter 只读访问）
    pub fn mask(&self) -> &MaskBuffer {
        &self.mask
    }

    /// 光标坐标
    pub fn cursor(&self) -> (usize, usize) {
        self.cursor
    }

    /// 当前阶段
    pub fn phase(&self) -> GridPhase {
        self.phase
    }

    /// 已发现目标数
    pub fn found_count(&self) -> usize {
        self.found.len()
    }

    /// 目标总数
    pub fn total_targets(&self) -> usize {
        self.targets.len()
    }

    /// 输入是否被阻塞
    pub fn is_input_blocked(&self) -> bool {
        self.input_blocked
    }

    /// 单格渐变时长（负值视为 0）
    fn fade_duration(&self) -> f64 {
        self.settings.fade_duration.max(0.0)
    }

    /// 处理移动请求
    fn try_move(&mut self, dx: i32, dy: i32, out: &mut PageTick) {
        // 目的格渐变未完成或阶段已完成：拒绝
        if self.input_blocked
            || matches!(self.phase, GridPhase::Completing | GridPhase::Completed)
        {
            return;
        }

        let (mut dx, mut dy) = (dx, dy);
        if dx != 0 && dy != 0 {
            // 双轴同时输入，按配置的冲突规则处理
            match self.settings.axis_conflict {
                AxisConflictRule::RejectWithWarning => {
                    out.commands.push(Command::Blink {
                        cue: BlinkCue::InvalidMove,
                    });
                    out.events.push(FlowEvent::InvalidMove { page: 0, dx, dy });
                    return;
                }
                AxisConflictRule::PreferHorizontal => dy = 0,
                AxisConflictRule::PreferVertical => dx = 0,
            }
        }
        if dx == 0 && dy == 0 {
            return;
        }

        let size = self.mask.size() as i64;
        let nx = self.cursor.0 as i64 + dx as i64;
        let ny = self.cursor.1 as i64 + dy as i64;
        if nx < 0 || ny < 0 || nx >= size || ny >= size {
            // 越界移动是 no-op，不是错误
            return;
        }
        let dest = (nx as usize, ny as usize);

        // 接受移动
        self.idle = 0.0;
        let prev = self.cursor;
        if !self.targets.contains(&prev) {
            // 非目标格淡回雾中；起始值取当前插值结果，避免跳变
            let current = self.mask.get(prev.0, prev.1) as f64;
            self.fades.start(prev, current, 0.0, self.fade_duration());
        }
        let dest_current = self.mask.get(dest.0, dest.1) as f64;
        self.fades
            .start(dest, dest_current, 1.0, self.fade_duration());
        self.cursor = dest;
        self.input_blocked = true;
        if self.phase == GridPhase::AwaitingFirstMove {
            self.phase = GridPhase::Exploring;
        }
    }

    /// 推进渐变任务，解除输入阻塞并检测目标发现
    fn tick_fades(&mut self, dt: f64, out: &mut PageTick) {
        if self.fades.is_empty() {
            return;
        }

        let finished = self.fades.advance_into(dt, &mut self.mask);
        for job in finished {
            if job.cell == self.cursor && self.input_blocked {
                self.input_blocked = false;
            }
            // 揭示完成的格才算"访问过"
            if job.target() >= 1.0 {
                self.check_target_found(job.cell, out);
            }
        }
    }

    /// 记录目标发现；集齐后进入完成序列（恰好一次）
    fn check_target_found(&mut self, cell: (usize, usize), out: &mut PageTick) {
        if !self.targets.contains(&cell) {
            return;
        }
        if !self.found.insert(cell) {
            return; // 已记录过
        }

        out.events.push(FlowEvent::TargetFound {
            x: cell.0,
            y: cell.1,
            found: self.found.len(),
            total: self.targets.len(),
        });

        if self.found.len() >= self.targets.len()
            && !matches!(self.phase, GridPhase::Completing | GridPhase::Completed)
        {
            self.phase = GridPhase::Completing;
            self.completion = Some(CompletionStep::OverlayIn {
                fade: Fade::new(0.0, 1.0, SOLVED_OVERLAY_SECS),
            });
            out.events.push(FlowEvent::StageCompleted { page: 0 });
        }
    }

    /// 累积闲置时长，跨过阈值时触发一次警示并清零
    fn tick_idle(&mut self, dt: f64, out: &mut PageTick) {
        if self.input_blocked
            || matches!(self.phase, GridPhase::Completing | GridPhase::Completed)
        {
            return;
        }

        self.idle += dt;
        if self.idle >= self.settings.idle_threshold {
            out.commands.push(Command::Blink {
                cue: BlinkCue::Idle,
            });
            out.events.push(FlowEvent::IdleWarning { page: 0 });
            self.idle = 0.0;
        }
    }

    /// 推进完成序列
    fn tick_completion(&mut self, dt: f64, out: &mut PageTick) {
        let Some(step) = self.completion.take() else {
            return;
        };

        self.completion = match step {
            CompletionStep::OverlayIn { mut fade } => {
                fade.advance(dt);
                out.commands.push(Command::SolvedOverlay {
                    opacity: fade.value(),
                });
                if fade.is_done() {
                    Some(CompletionStep::Hold {
                        timer: Timer::new(SOLVED_HOLD_SECS),
                    })
                } else {
                    Some(CompletionStep::OverlayIn { fade })
                }
            }
            CompletionStep::Hold { mut timer } => {
                if timer.advance(dt) {
                    Some(CompletionStep::FadeOut {
                        fade: Fade::new(1.0, 0.0, GRID_FADE_OUT_SECS),
                    })
                } else {
                    Some(CompletionStep::Hold { timer })
                }
            }
            CompletionStep::FadeOut { mut fade } => {
                fade.advance(dt);
                out.commands.push(Command::GridOpacity {
                    opacity: fade.value(),
                });
                if fade.is_done() {
                    self.phase = GridPhase::Completed;
                    out.complete(0);
                    None
                } else {
                    Some(CompletionStep::FadeOut { fade })
                }
            }
        };
    }
}

impl PageContract for GridRevealEngine {
    fn setup_data(&mut self, data: &PageConfig) -> bool {
        match data {
            PageConfig::Grid { settings } => {
                self.settings = settings.clone();
                true
            }
            _ => false,
        }
    }

    fn on_enter(&mut self) {
        let size = self.settings.size.max(1);

        // 越界目标丢弃；列表为空时回退为网格中心的单一目标，
        // 保证阶段总是可完成
        self.targets = self
            .settings
            .targets
            .iter()
            .copied()
            .filter(|&(x, y)| x < size && y < size)
            .collect();
        self.pending_events.clear();
        if self.targets.is_empty() {
            let fallback = (size / 2, size / 2);
            self.targets.insert(fallback);
            self.pending_events.push(FlowEvent::FallbackTarget {
                x: fallback.0,
                y: fallback.1,
            });
        }

        self.found = HashSet::new();
        self.cursor = (
            self.settings.cursor_start.0.min(size - 1),
            self.settings.cursor_start.1.min(size - 1),
        );
        self.mask = MaskBuffer::new(size);
        self.fades = FadeSet::new();
        self.phase = GridPhase::AwaitingFirstMove;
        self.completion = None;
        self.input_blocked = false;
        self.idle = 0.0;

        // 揭示起始格（不阻塞输入）
        self.fades.start(self.cursor, 0.0, 1.0, self.fade_duration());
    }

    fn on_exit(&mut self) {
        // 释放本次进入分配的资源；on_enter 会完整重建
        self.fades.clear();
        self.completion = None;
        self.mask = MaskBuffer::new(0);
        self.input_blocked = false;
        self.idle = 0.0;
        self.pending_events.clear();
    }

    fn receive_trigger(&mut self, _trigger: TriggerInfo) {
        // 网格阶段与触发来源无关
    }

    fn tick(&mut self, dt: f64, input: Option<&FlowInput>) -> PageTick {
        let mut out = PageTick::empty();
        out.events.append(&mut self.pending_events);

        if let Some(input) = input {
            match input {
                FlowInput::Move { dx, dy } => self.try_move(*dx, *dy, &mut out),
                FlowInput::Skip => {
                    if self.phase != GridPhase::Completed {
                        self.phase = GridPhase::Completed;
                        self.completion = None;
                        out.complete(0);
                    }
                }
                _ => {}
            }
        }

        self.tick_fades(dt, &mut out);
        self.tick_idle(dt, &mut out);
        self.tick_completion(dt, &mut out);

        out
    }
}
