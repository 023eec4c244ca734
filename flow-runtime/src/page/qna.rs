//! # QnA 模块
//!
//! 问答页：逐题展示配置的问题列表，参与者按键推进。

use serde::{Deserialize, Serialize};

use crate::command::Command;
use crate::config::PageConfig;
use crate::input::{FlowInput, TriggerInfo};
use crate::page::{PageContract, PageTick};

/// 问答页
///
/// 每题通过 [`Command::ShowQuestion`] 交给 Presenter 展示；
/// 任一参与者按键推进到下一题，最后一题的按键者成为
/// 完成触发标记。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QnaPage {
    /// 参与者昵称（Host 展示用）
    nicknames: Vec<String>,
    /// 问题列表
    questions: Vec<String>,
    /// 当前问题索引
    current: usize,
    /// 当前问题是否已发给 Presenter
    presented: bool,
    /// 进入本页的触发来源（上一页完成时的参与者标记）
    entered_by: TriggerInfo,
}

impl QnaPage {
    /// 创建问答页
    pub fn new(nicknames: Vec<String>, questions: Vec<String>) -> Self {
        Self {
            nicknames,
            questions,
            current: 0,
            presented: false,
            entered_by: 0,
        }
    }

    /// 参与者昵称
    pub fn nicknames(&self) -> &[String] {
        &self.nicknames
    }

    /// 当前问题索引
    pub fn current_question(&self) -> usize {
        self.current
    }

    /// 进入本页的触发来源（0 表示未指定）
    ///
    /// Host 可据此决定先展示哪位参与者的昵称。
    pub fn entered_by(&self) -> TriggerInfo {
        self.entered_by
    }
}

impl PageContract for QnaPage {
    fn setup_data(&mut self, data: &PageConfig) -> bool {
        match data {
            PageConfig::Qna {
                nicknames,
                questions,
            } => {
                self.nicknames = nicknames.clone();
                self.questions = questions.clone();
                true
            }
            _ => false,
        }
    }

    fn on_enter(&mut self) {
        self.current = 0;
        self.presented = false;
        self.entered_by = 0;
    }

    fn on_exit(&mut self) {
        self.current = 0;
        self.presented = false;
        self.entered_by = 0;
    }

    fn receive_trigger(&mut self, trigger: TriggerInfo) {
        self.entered_by = trigger;
    }

    fn tick(&mut self, _dt: f64, input: Option<&FlowInput>) -> PageTick {
        let mut out = PageTick::empty();

        // 问题列表为空：无事可问，立即完成
        if self.questions.is_empty() {
            out.complete(0);
            return out;
        }

        if !self.presented {
            out.commands.push(Command::ShowQuestion {
                index: self.current,
                text: self.questions[self.current].clone(),
            });
            self.presented = true;
        }

        match input {
            Some(FlowInput::Trigger { participant }) => {
                if self.current + 1 >= self.questions.len() {
                    out.complete(*participant);
                } else {
                    self.current += 1;
                    self.presented = false;
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::PageSignal;

    fn two_question_page() -> QnaPage {
        let mut page = QnaPage::new(
            vec!["小羽".to_string(), "小星".to_string()],
            vec!["第一个问题？".to_string(), "第二个问题？".to_string()],
        );
        page.on_enter();
        page
    }

    #[test]
    fn test_qna_presents_each_question_once() {
        let mut page = two_question_page();

        let out = page.tick(0.1, None);
        assert!(matches!(
            &out.commands[0],
            Command::ShowQuestion { index: 0, text } if text == "第一个问题？"
        ));

        // 同一题不重复下发
        let out = page.tick(0.1, None);
        assert!(out.commands.is_empty());
    }

    #[test]
    fn test_qna_advances_and_completes_with_last_participant() {
        let mut page = two_question_page();
        page.tick(0.1, None);

        // 参与者 1 回答第一题
        let out = page.tick(0.1, Some(&FlowInput::trigger(1)));
        assert!(out.signal.is_none());
        assert_eq!(page.current_question(), 1);

        // 下一 tick 下发第二题
        let out = page.tick(0.1, None);
        assert!(matches!(
            &out.commands[0],
            Command::ShowQuestion { index: 1, .. }
        ));

        // 参与者 2 回答最后一题，成为完成触发标记
        let out = page.tick(0.1, Some(&FlowInput::trigger(2)));
        assert_eq!(out.signal, Some(PageSignal::Completed { trigger: 2 }));
    }

    #[test]
    fn test_qna_empty_questions_completes_immediately() {
        let mut page = QnaPage::new(vec![], vec![]);
        page.on_enter();

        let out = page.tick(0.1, None);
        assert_eq!(out.signal, Some(PageSignal::Completed { trigger: 0 }));
    }

    #[test]
    fn test_qna_reenter_restarts_from_first_question() {
        let mut page = two_question_page();
        page.tick(0.1, None);
        page.tick(0.1, Some(&FlowInput::trigger(1)));
        page.on_exit();

        page.on_enter();
        assert_eq!(page.current_question(), 0);
        let out = page.tick(0.1, None);
        assert!(matches!(
            &out.commands[0],
            Command::ShowQuestion { index: 0, .. }
        ));
    }
}
