//! # Transition 模块
//!
//! 具名过渡策略与过渡执行状态机。
//!
//! ## 策略共同契约
//!
//! 一次过渡从头到尾必须保证：
//!
//! - 出页的 `on_exit` 恰好执行一次（槽位非空时）
//! - 入页的 `on_enter` 恰好执行一次
//! - 结束时入页不透明度为 1，出页（若保留）为 0
//! - 触发标记经 `receive_trigger` 恰好转发一次，
//!   时机在 `on_enter` 并把不透明度置 0 之后
//!
//! 排序保证：出页的 `on_exit` 总是先于入页的 `on_enter` 被完整
//! 执行。唯一例外是 Overlap：它在两条淡化开始前就调用
//! `on_enter`，而 `on_exit` 要等出页淡化完成之后。
//!
//! ## 执行模型
//!
//! 每个策略是一条显式的步骤序列（协程式等待的替代）：
//! 每步持有自己的渐变/计时状态，`tick(dt)` 按单调耗时推进，
//! 每 tick 恰好让出一次控制权。

use serde::{Deserialize, Serialize};

use crate::command::{Command, CoverStyle};
use crate::flow::controller::PageSlot;
use crate::input::TriggerInfo;
use crate::journal::{FlowEvent, Journal};
use crate::page::PageContract;
use crate::state::{Fade, Lifecycle, Timer};

/// 默认过渡时长（秒）
pub const DEFAULT_TRANSITION_SECS: f64 = 0.5;
/// Blackout 全黑保持的默认时长（秒）
pub const DEFAULT_BLACKOUT_HOLD_SECS: f64 = 0.5;

/// 过渡策略
///
/// 各策略只在淡出/淡入的排序与重叠方式、以及是否用全屏
/// 遮挡层隐藏切换上有差异。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "snake_case")]
pub enum TransitionPolicy {
    /// 装饰面板盖住切换：面板淡入、幕后换页、面板淡出
    Cover {
        #[serde(default = "default_duration")]
        duration: f64,
    },

    /// 新页在旧页定格画面之上淡入
    Reveal {
        #[serde(default = "default_duration")]
        duration: f64,
    },

    /// 黑场盖住切换，全黑时保持片刻
    Blackout {
        #[serde(default = "default_duration")]
        duration: f64,
        #[serde(default = "default_hold")]
        hold: f64,
    },

    /// 旧页淡出、间歇、新页淡入（默认策略）
    Sequential {
        #[serde(default = "default_duration")]
        duration: f64,
        #[serde(default)]
        gap: f64,
    },

    /// 新旧两页在同一时间轴上交叉淡化
    Overlap {
        #[serde(default = "default_duration")]
        duration: f64,
    },
}

impl TransitionPolicy {
    /// 默认策略：0.5 秒、无间歇的 Sequential
    pub fn sequential_default() -> Self {
        Self::Sequential {
            duration: DEFAULT_TRANSITION_SECS,
            gap: 0.0,
        }
    }

    /// 策略名（与配置 tag 一致，用于日志）
    pub fn name(&self) -> &'static str {
        match self {
            Self::Cover { .. } => "cover",
            Self::Reveal { .. } => "reveal",
            Self::Blackout { .. } => "blackout",
            Self::Sequential { .. } => "sequential",
            Self::Overlap { .. } => "overlap",
        }
    }

    /// 渐变时长
    fn duration(&self) -> f64 {
        match self {
            Self::Cover { duration }
            | Self::Reveal { duration }
            | Self::Overlap { duration }
            | Self::Blackout { duration, .. }
            | Self::Sequential { duration, .. } => *duration,
        }
    }
}

fn default_duration() -> f64 {
    DEFAULT_TRANSITION_SECS
}

fn default_hold() -> f64 {
    DEFAULT_BLACKOUT_HOLD_SECS
}

/// 过渡步骤
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
enum TransitionStep {
    /// 旧页淡出（Sequential）
    FadeOutCurrent { fade: Fade },
    /// 淡出与淡入之间的间歇（Sequential）
    Gap { timer: Timer },
    /// 新页淡入（Sequential / Reveal）
    FadeInNext { fade: Fade },
    /// 交叉淡化（Overlap）：fade 为入页不透明度，出页取 1 - value
    CrossFade { fade: Fade },
    /// 遮挡层淡入（Cover / Blackout）
    CoverIn { fade: Fade },
    /// 全遮挡保持（Blackout）
    Hold { timer: Timer },
    /// 遮挡层淡出（Cover / Blackout）
    CoverOut { fade: Fade },
}

/// 一次进行中的过渡
///
/// 由 FlowController 在过渡闩锁内持有；`tick` 返回 true 表示
/// 过渡完成，收尾（置 Active、更新当前索引）由控制器执行。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionRun {
    /// 出页索引（None 表示入场过渡）
    from: Option<usize>,
    /// 入页索引
    to: usize,
    /// 待转发的触发标记
    trigger: TriggerInfo,
    /// 策略
    policy: TransitionPolicy,
    /// 当前步骤（None 表示已完成）
    step: Option<TransitionStep>,
}

impl TransitionRun {
    /// 发起一次过渡
    ///
    /// 构造时完成各策略的即时动作：Overlap / Reveal 在此处
    /// 执行 `on_enter`（Reveal 还先执行 `on_exit`），其余策略的
    /// 生命周期调用发生在后续步骤边界。
    pub fn new(
        policy: TransitionPolicy,
        from: Option<usize>,
        to: usize,
        trigger: TriggerInfo,
        slots: &mut [PageSlot],
        out: &mut Vec<Command>,
        journal: &mut Journal,
    ) -> Self {
        let mut run = Self {
            from,
            to,
            trigger,
            policy,
            step: None,
        };

        // 出页进入 Exiting；空槽位视为已退出
        let mut from_has_page = false;
        if let Some(i) = from {
            if let Some(slot) = slots.get_mut(i) {
                if slot.page.is_some() {
                    slot.lifecycle = Lifecycle::Exiting;
                    from_has_page = true;
                } else {
                    slot.lifecycle = Lifecycle::Inactive;
                    journal.record(FlowEvent::NullPageSkipped { page: i });
                }
            }
        }

        let duration = policy.duration();
        run.step = match policy {
            TransitionPolicy::Sequential { .. } => {
                if from_has_page {
                    let start = run.from_opacity(slots);
                    Some(TransitionStep::FadeOutCurrent {
                        fade: Fade::new(start, 0.0, duration),
                    })
                } else {
                    // 无可淡出的页面：直接进入淡入段
                    run.do_enter(slots, out, journal);
                    Some(TransitionStep::FadeInNext {
                        fade: Fade::new(0.0, 1.0, duration),
                    })
                }
            }

            TransitionPolicy::Overlap { .. } => {
                // on_enter 先于两条淡化开始
                run.do_enter(slots, out, journal);
                Some(TransitionStep::CrossFade {
                    fade: Fade::new(0.0, 1.0, duration),
                })
            }

            TransitionPolicy::Cover { .. } | TransitionPolicy::Blackout { .. } => {
                Some(TransitionStep::CoverIn {
                    fade: Fade::new(0.0, 1.0, duration),
                })
            }

            TransitionPolicy::Reveal { .. } => {
                // 旧页逻辑立即停止，画面保持定格直到被完全盖住
                run.do_exit(slots, journal);
                run.do_enter(slots, out, journal);
                Some(TransitionStep::FadeInNext {
                    fade: Fade::new(0.0, 1.0, duration),
                })
            }
        };

        run
    }

    /// 入页索引
    pub fn to(&self) -> usize {
        self.to
    }

    /// 出页索引
    pub fn from_index(&self) -> Option<usize> {
        self.from
    }

    /// 推进过渡，返回是否已完成
    pub fn tick(
        &mut self,
        dt: f64,
        slots: &mut [PageSlot],
        out: &mut Vec<Command>,
        journal: &mut Journal,
    ) -> bool {
        let Some(step) = self.step.take() else {
            return true;
        };

        self.step = match step {
            TransitionStep::FadeOutCurrent { mut fade } => {
                fade.advance(dt);
                if let Some(i) = self.from {
                    set_opacity(slots, i, fade.value(), out);
                }
                if fade.is_done() {
                    self.do_exit(slots, journal);
                    let gap = match self.policy {
                        TransitionPolicy::Sequential { gap, .. } => gap,
                        _ => 0.0,
                    };
                    if gap > 0.0 {
                        Some(TransitionStep::Gap {
                            timer: Timer::new(gap),
                        })
                    } else {
                        self.do_enter(slots, out, journal);
                        Some(TransitionStep::FadeInNext {
                            fade: Fade::new(0.0, 1.0, self.policy.duration()),
                        })
                    }
                } else {
                    Some(TransitionStep::FadeOutCurrent { fade })
                }
            }

            TransitionStep::Gap { mut timer } => {
                if timer.advance(dt) {
                    self.do_enter(slots, out, journal);
                    Some(TransitionStep::FadeInNext {
                        fade: Fade::new(0.0, 1.0, self.policy.duration()),
                    })
                } else {
                    Some(TransitionStep::Gap { timer })
                }
            }

            TransitionStep::FadeInNext { mut fade } => {
                fade.advance(dt);
                set_opacity(slots, self.to, fade.value(), out);
                if fade.is_done() {
                    // Reveal：新页完全盖住后，旧页定格画面归零
                    if matches!(self.policy, TransitionPolicy::Reveal { .. }) {
                        if let Some(i) = self.from {
                            set_opacity(slots, i, 0.0, out);
                        }
                    }
                    None
                } else {
                    Some(TransitionStep::FadeInNext { fade })
                }
            }

            TransitionStep::CrossFade { mut fade } => {
                fade.advance(dt);
                let value = fade.value();
                set_opacity(slots, self.to, value, out);
                if let Some(i) = self.from {
                    set_opacity(slots, i, 1.0 - value, out);
                }
                if fade.is_done() {
                    // 出页淡化完成后才执行 on_exit
                    self.do_exit(slots, journal);
                    None
                } else {
                    Some(TransitionStep::CrossFade { fade })
                }
            }

            TransitionStep::CoverIn { mut fade } => {
                fade.advance(dt);
                out.push(Command::CoverOpacity {
                    style: self.cover_style(),
                    opacity: fade.value(),
                });
                if fade.is_done() {
                    match self.policy {
                        TransitionPolicy::Blackout { hold, .. } if hold > 0.0 => {
                            Some(TransitionStep::Hold {
                                timer: Timer::new(hold),
                            })
                        }
                        _ => {
                            self.swap_behind_cover(slots, out, journal);
                            Some(TransitionStep::CoverOut {
                                fade: Fade::new(1.0, 0.0, self.policy.duration()),
                            })
                        }
                    }
                } else {
                    Some(TransitionStep::CoverIn { fade })
                }
            }

            TransitionStep::Hold { mut timer } => {
                if timer.advance(dt) {
                    self.swap_behind_cover(slots, out, journal);
                    Some(TransitionStep::CoverOut {
                        fade: Fade::new(1.0, 0.0, self.policy.duration()),
                    })
                } else {
                    Some(TransitionStep::Hold { timer })
                }
            }

            TransitionStep::CoverOut { mut fade } => {
                fade.advance(dt);
                out.push(Command::CoverOpacity {
                    style: self.cover_style(),
                    opacity: fade.value(),
                });
                if fade.is_done() { None } else { Some(TransitionStep::CoverOut { fade }) }
            }
        };

        self.step.is_none()
    }

    /// 出页当前不透明度（渐变起点，避免跳变）
    fn from_opacity(&self, slots: &[PageSlot]) -> f64 {
        self.from
            .and_then(|i| slots.get(i))
            .map(|slot| slot.opacity)
            .unwrap_or(0.0)
    }

    /// 遮挡层样式
    fn cover_style(&self) -> CoverStyle {
        match self.policy {
            TransitionPolicy::Blackout { .. } => CoverStyle::Black,
            _ => CoverStyle::Panel,
        }
    }

    /// 完整执行出页的 `on_exit`（每次过渡恰好一次）
    fn do_exit(&self, slots: &mut [PageSlot], journal: &mut Journal) {
        let Some(i) = self.from else {
            return;
        };
        let Some(slot) = slots.get_mut(i) else {
            return;
        };
        if let Some(page) = slot.page.as_mut() {
            page.on_exit();
            journal.record(FlowEvent::PageExited { page: i });
        }
        slot.lifecycle = Lifecycle::Inactive;
    }

    /// 完整执行入页的 `on_enter`，置不透明度 0，转发触发标记
    /// （每次过渡恰好一次）
    fn do_enter(&self, slots: &mut [PageSlot], out: &mut Vec<Command>, journal: &mut Journal) {
        let Some(slot) = slots.get_mut(self.to) else {
            return;
        };
        slot.lifecycle = Lifecycle::Entering;
        if let Some(page) = slot.page.as_mut() {
            page.on_enter();
            journal.record(FlowEvent::PageEntered { page: self.to });
        }
        set_opacity(slots, self.to, 0.0, out);
        if let Some(page) = slots[self.to].page.as_mut() {
            page.receive_trigger(self.trigger);
        }
    }

    /// 全遮挡之下换页：退出旧页、进入新页并直接对齐到终点不透明度
    fn swap_behind_cover(
        &self,
        slots: &mut [PageSlot],
        out: &mut Vec<Command>,
        journal: &mut Journal,
    ) {
        self.do_exit(slots, journal);
        if let Some(i) = self.from {
            set_opacity(slots, i, 0.0, out);
        }
        self.do_enter(slots, out, journal);
        set_opacity(slots, self.to, 1.0, out);
    }
}

/// 写入槽位不透明度并通知 Presenter
fn set_opacity(slots: &mut [PageSlot], index: usize, value: f64, out: &mut Vec<Command>) {
    if let Some(slot) = slots.get_mut(index) {
        slot.opacity = value;
        out.push(Command::PageOpacity {
            page: index,
            opacity: value,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::{IntroPage, Page, QnaPage};

    fn intro_slot(active: bool) -> PageSlot {
        let mut slot = PageSlot::new(Page::Intro(IntroPage::new(
            String::new(),
            String::new(),
            None,
        )));
        if active {
            slot.lifecycle = Lifecycle::Active;
            slot.opacity = 1.0;
        }
        slot
    }

    fn two_slots() -> Vec<PageSlot> {
        vec![intro_slot(true), intro_slot(false)]
    }

    /// 推进过渡直到完成，返回消耗的 tick 数
    fn run_to_end(
        run: &mut TransitionRun,
        slots: &mut [PageSlot],
        out: &mut Vec<Command>,
        journal: &mut Journal,
        dt: f64,
    ) -> usize {
        let mut ticks = 0;
        while !run.tick(dt, slots, out, journal) {
            ticks += 1;
            assert!(ticks < 1000, "过渡未收敛");
        }
        ticks + 1
    }

    fn journal_order(journal: &Journal) -> Vec<&'static str> {
        journal
            .entries()
            .iter()
            .filter_map(|e| match e.event {
                FlowEvent::PageExited { .. } => Some("exit"),
                FlowEvent::PageEntered { .. } => Some("enter"),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_sequential_exit_before_enter() {
        let mut slots = two_slots();
        let mut out = Vec::new();
        let mut journal = Journal::new();

        let mut run = TransitionRun::new(
            TransitionPolicy::sequential_default(),
            Some(0),
            1,
            0,
            &mut slots,
            &mut out,
            &mut journal,
        );
        run_to_end(&mut run, &mut slots, &mut out, &mut journal, 0.25);

        // on_exit 先于 on_enter，各恰好一次
        assert_eq!(journal_order(&journal), vec!["exit", "enter"]);
        // 终点不透明度精确：入页 1，出页 0
        assert_eq!(slots[1].opacity, 1.0);
        assert_eq!(slots[0].opacity, 0.0);
        assert_eq!(slots[0].lifecycle, Lifecycle::Inactive);
    }

    #[test]
    fn test_sequential_gap_delays_enter() {
        let mut slots = two_slots();
        let mut out = Vec::new();
        let mut journal = Journal::new();

        let mut run = TransitionRun::new(
            TransitionPolicy::Sequential {
                duration: 0.2,
                gap: 0.4,
            },
            Some(0),
            1,
            0,
            &mut slots,
            &mut out,
            &mut journal,
        );

        // 0.2 秒淡出完成
        run.tick(0.2, &mut slots, &mut out, &mut journal);
        assert_eq!(journal_order(&journal), vec!["exit"]);

        // 间歇未结束：仍未进入
        run.tick(0.2, &mut slots, &mut out, &mut journal);
        assert_eq!(journal_order(&journal), vec!["exit"]);

        run.tick(0.2, &mut slots, &mut out, &mut journal);
        assert_eq!(journal_order(&journal), vec!["exit", "enter"]);
    }

    #[test]
    fn test_overlap_enter_first_exit_last() {
        let mut slots = two_slots();
        let mut out = Vec::new();
        let mut journal = Journal::new();

        let mut run = TransitionRun::new(
            TransitionPolicy::Overlap { duration: 0.5 },
            Some(0),
            1,
            0,
            &mut slots,
            &mut out,
            &mut journal,
        );
        // on_enter 在淡化开始前已执行
        assert_eq!(journal_order(&journal), vec!["enter"]);

        // 淡化中途：两页同时可见，出页尚未 on_exit
        run.tick(0.25, &mut slots, &mut out, &mut journal);
        assert!((slots[1].opacity - 0.5).abs() < 1e-12);
        assert!((slots[0].opacity - 0.5).abs() < 1e-12);
        assert_eq!(journal_order(&journal), vec!["enter"]);

        let done = run.tick(0.25, &mut slots, &mut out, &mut journal);
        assert!(done);
        assert_eq!(journal_order(&journal), vec!["enter", "exit"]);
        assert_eq!(slots[1].opacity, 1.0);
        assert_eq!(slots[0].opacity, 0.0);
    }

    #[test]
    fn test_cover_swaps_behind_full_cover() {
        let mut slots = two_slots();
        let mut out = Vec::new();
        let mut journal = Journal::new();

        let mut run = TransitionRun::new(
            TransitionPolicy::Cover { duration: 0.5 },
            Some(0),
            1,
            0,
            &mut slots,
            &mut out,
            &mut journal,
        );

        // 遮挡层淡入期间不发生换页
        run.tick(0.25, &mut slots, &mut out, &mut journal);
        assert!(journal_order(&journal).is_empty());
        assert!(out.iter().any(|c| matches!(
            c,
            Command::CoverOpacity {
                style: CoverStyle::Panel,
                ..
            }
        )));

        // 遮挡层全遮后：退出、进入、入页直接对齐到 1
        run.tick(0.25, &mut slots, &mut out, &mut journal);
        assert_eq!(journal_order(&journal), vec!["exit", "enter"]);
        assert_eq!(slots[1].opacity, 1.0);
        assert_eq!(slots[0].opacity, 0.0);

        // 遮挡层淡出后过渡完成
        let done = run.tick(0.5, &mut slots, &mut out, &mut journal);
        assert!(done);
        let last_cover = out
            .iter()
            .rev()
            .find_map(|c| match c {
                Command::CoverOpacity { opacity, .. } => Some(*opacity),
                _ => None,
            })
            .unwrap();
        assert_eq!(last_cover, 0.0);
    }

    #[test]
    fn test_blackout_holds_before_swap() {
        let mut slots = two_slots();
        let mut out = Vec::new();
        let mut journal = Journal::new();

        let mut run = TransitionRun::new(
            TransitionPolicy::Blackout {
                duration: 0.2,
                hold: 0.4,
            },
            Some(0),
            1,
            0,
            &mut slots,
            &mut out,
            &mut journal,
        );

        // 遮挡层淡入完成，进入保持段
        run.tick(0.2, &mut slots, &mut out, &mut journal);
        assert!(journal_order(&journal).is_empty());
        assert!(out.iter().any(|c| matches!(
            c,
            Command::CoverOpacity {
                style: CoverStyle::Black,
                ..
            }
        )));

        // 保持未结束：不换页
        run.tick(0.2, &mut slots, &mut out, &mut journal);
        assert!(journal_order(&journal).is_empty());

        // 保持结束：全黑之下换页
        run.tick(0.2, &mut slots, &mut out, &mut journal);
        assert_eq!(journal_order(&journal), vec!["exit", "enter"]);

        let done = run.tick(0.2, &mut slots, &mut out, &mut journal);
        assert!(done);
    }

    #[test]
    fn test_reveal_freezes_current_until_covered() {
        let mut slots = two_slots();
        let mut out = Vec::new();
        let mut journal = Journal::new();

        let mut run = TransitionRun::new(
            TransitionPolicy::Reveal { duration: 0.5 },
            Some(0),
            1,
            0,
            &mut slots,
            &mut out,
            &mut journal,
        );
        // 旧页逻辑立即停止、新页立即进入
        assert_eq!(journal_order(&journal), vec!["exit", "enter"]);

        // 淡入中途：旧页画面定格（不透明度保持 1）
        run.tick(0.25, &mut slots, &mut out, &mut journal);
        assert_eq!(slots[0].opacity, 1.0);
        assert!((slots[1].opacity - 0.5).abs() < 1e-12);

        let done = run.tick(0.25, &mut slots, &mut out, &mut journal);
        assert!(done);
        assert_eq!(slots[0].opacity, 0.0);
        assert_eq!(slots[1].opacity, 1.0);
    }

    #[test]
    fn test_entry_transition_without_from() {
        let mut slots = vec![intro_slot(false)];
        let mut out = Vec::new();
        let mut journal = Journal::new();

        let mut run = TransitionRun::new(
            TransitionPolicy::sequential_default(),
            None,
            0,
            0,
            &mut slots,
            &mut out,
            &mut journal,
        );
        // 无出页：直接进入淡入段
        assert_eq!(journal_order(&journal), vec!["enter"]);

        run_to_end(&mut run, &mut slots, &mut out, &mut journal, 0.25);
        assert_eq!(slots[0].opacity, 1.0);
    }

    #[test]
    fn test_null_from_page_skipped() {
        let mut slots = two_slots();
        slots[0].page = None;
        let mut out = Vec::new();
        let mut journal = Journal::new();

        let mut run = TransitionRun::new(
            TransitionPolicy::sequential_default(),
            Some(0),
            1,
            0,
            &mut slots,
            &mut out,
            &mut journal,
        );
        // 空槽位视为已退出，直接进入淡入段
        assert!(journal
            .entries()
            .iter()
            .any(|e| matches!(e.event, FlowEvent::NullPageSkipped { page: 0 })));
        assert_eq!(journal_order(&journal), vec!["enter"]);

        run_to_end(&mut run, &mut slots, &mut out, &mut journal, 0.25);
        assert_eq!(slots[1].opacity, 1.0);
    }

    #[test]
    fn test_trigger_forwarded_once_after_enter() {
        let mut slots = vec![
            intro_slot(true),
            PageSlot::new(Page::Qna(QnaPage::new(
                vec![],
                vec!["问题？".to_string()],
            ))),
        ];
        let mut out = Vec::new();
        let mut journal = Journal::new();

        let mut run = TransitionRun::new(
            TransitionPolicy::Reveal { duration: 0.2 },
            Some(0),
            1,
            2,
            &mut slots,
            &mut out,
            &mut journal,
        );
        run_to_end(&mut run, &mut slots, &mut out, &mut journal, 0.1);

        match slots[1].page.as_ref().unwrap() {
            Page::Qna(page) => assert_eq!(page.entered_by(), 2),
            _ => panic!("页面类型不符"),
        }
    }

    #[test]
    fn test_zero_duration_still_ordered() {
        let mut slots = two_slots();
        let mut out = Vec::new();
        let mut journal = Journal::new();

        let mut run = TransitionRun::new(
            TransitionPolicy::Sequential {
                duration: 0.0,
                gap: 0.0,
            },
            Some(0),
            1,
            0,
            &mut slots,
            &mut out,
            &mut journal,
        );
        run_to_end(&mut run, &mut slots, &mut out, &mut journal, 0.0);

        assert_eq!(journal_order(&journal), vec!["exit", "enter"]);
        assert_eq!(slots[0].opacity, 0.0);
        assert_eq!(slots[1].opacity, 1.0);
    }

    #[test]
    fn test_policy_serde_defaults() {
        let policy: TransitionPolicy = serde_json::from_str(r#"{ "name": "overlap" }"#).unwrap();
        assert_eq!(policy, TransitionPolicy::Overlap { duration: 0.5 });

        let policy: TransitionPolicy =
            serde_json::from_str(r#"{ "name": "blackout", "hold": 1.0 }"#).unwrap();
        assert_eq!(
            policy,
            TransitionPolicy::Blackout {
                duration: 0.5,
                hold: 1.0
            }
        );
        assert_eq!(policy.name(), "blackout");
    }
}
