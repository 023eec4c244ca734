//! # Check 模块
//!
//! 双人确认页：两位参与者都按键确认后才完成。

use serde::{Deserialize, Serialize};

use crate::command::Command;
use crate::config::PageConfig;
use crate::input::{FlowInput, TriggerInfo};
use crate::journal::FlowEvent;
use crate::page::{PageContract, PageTick};

/// 双人确认页
///
/// 参与者编号 1 和 2 各需确认一次；重复确认被忽略并记日志。
/// 补齐第二个确认的参与者成为完成触发标记。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckPage {
    /// 提示文本
    prompt: String,
    /// 两位参与者的确认状态
    confirmed: [bool; 2],
}

impl CheckPage {
    /// 创建确认页
    pub fn new(prompt: String) -> Self {
        Self {
            prompt,
            confirmed: [false, false],
        }
    }

    /// 提示文本
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// 某参与者是否已确认
    pub fn is_confirmed(&self, participant: i32) -> bool {
        match participant {
            1 => self.confirmed[0],
            2 => self.confirmed[1],
            _ => false,
        }
    }
}

impl PageContract for CheckPage {
    fn setup_data(&mut self, data: &PageConfig) -> bool {
        match data {
            PageConfig::Check { prompt } => {
                self.prompt = prompt.clone();
                true
            }
            _ => false,
        }
    }

    fn on_enter(&mut self) {
        self.confirmed = [false, false];
    }

    fn on_exit(&mut self) {
        self.confirmed = [false, false];
    }

    fn receive_trigger(&mut self, _trigger: TriggerInfo) {
        // 确认页要求两人都确认，上一页的触发来源不预置任何状态
    }

    fn tick(&mut self, _dt: f64, input: Option<&FlowInput>) -> PageTick {
        let mut out = PageTick::empty();

        match input {
            Some(FlowInput::Trigger { participant }) if (1..=2).contains(participant) => {
                let index = (*participant - 1) as usize;
                if self.confirmed[index] {
                    out.events.push(FlowEvent::DuplicateConfirm {
                        participant: *participant,
                    });
                } else {
                    self.confirmed[index] = true;
                    out.commands.push(Command::ConfirmMark {
                        participant: *participant,
                    });
                    if self.confirmed == [true, true] {
                        out.complete(*participant);
                    }
                }
            }
            Some(FlowInput::Skip) => {
                out.complete(0);
            }
            _ => {}
        }

        out
    }
}
