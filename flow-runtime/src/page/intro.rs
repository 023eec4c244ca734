//! # Intro 模块
//!
//! 开场页：展示欢迎文案，等待任一参与者按键或自动前进。

use serde::{Deserialize, Serialize};

use crate::config::PageConfig;
use crate::input::{FlowInput, TriggerInfo};
use crate::page::{PageContract, PageTick};

/// 开场页
///
/// 文案渲染由 Presenter 按配置完成，页面只负责完成判定：
/// 参与者按键以该参与者为触发标记完成；配置了自动前进时，
/// 超时后以标记 0 完成。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntroPage {
    /// 标题文本
    title: String,
    /// 正文文本
    body: String,
    /// 自动前进时长（秒）
    auto_advance: Option<f64>,
    /// 进入以来的累积时长
    elapsed: f64,
}

impl IntroPage {
    /// 创建开场页
    pub fn new(title: String, body: String, auto_advance: Option<f64>) -> Self {
        Self {
            title,
            body,
            auto_advance,
            elapsed: 0.0,
        }
    }

    /// 标题文本
    pub fn title(&self) -> &str {
        &self.title
    }

    /// 正文文本
    pub fn body(&self) -> &str {
        &self.body
    }
}

impl PageContract for IntroPage {
    fn setup_data(&mut self, data: &PageConfig) -> bool {
        match data {
            PageConfig::Intro {
                title,
                body,
                auto_advance,
            } => {
                self.title = title.clone();
                self.body = body.clone();
                self.auto_advance = *auto_advance;
                true
            }
            _ => false,
        }
    }

    fn on_enter(&mut self) {
        self.elapsed = 0.0;
    }

    fn on_exit(&mut self) {
        self.elapsed = 0.0;
    }

    fn receive_trigger(&mut self, _trigger: TriggerInfo) {
        // 开场页是流程起点，触发标记无用途
    }

    fn tick(&mut self, dt: f64, input: Option<&FlowInput>) -> PageTick {
        let mut out = PageTick::empty();

        match input {
            Some(FlowInput::Trigger { participant }) => {
                out.complete(*participant);
                return out;
            }
            Some(FlowInput::Skip) => {
                out.complete(0);
                return out;
            }
            _ => {}
        }

        if let Some(limit) = self.auto_advance {
            self.elapsed += dt;
            if self.elapsed >= limit {
                out.complete(0);
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::PageSignal;

    #[test]
    fn test_intro_completes_on_trigger() {
        let mut page = IntroPage::new("欢迎".to_string(), String::new(), None);
        page.on_enter();

        let out = page.tick(0.1, None);
        assert!(out.signal.is_none());

        let out = page.tick(0.1, Some(&FlowInput::trigger(2)));
        assert_eq!(out.signal, Some(PageSignal::Completed { trigger: 2 }));
    }

    #[test]
    fn test_intro_auto_advance() {
        let mut page = IntroPage::new(String::new(), String::new(), Some(1.0));
        page.on_enter();

        assert!(page.tick(0.6, None).signal.is_none());
        let out = page.tick(0.6, None);
        assert_eq!(out.signal, Some(PageSignal::Completed { trigger: 0 }));
    }

    #[test]
    fn test_intro_reenter_resets_elapsed() {
        let mut page = IntroPage::new(String::new(), String::new(), Some(1.0));
        page.on_enter();
        page.tick(0.9, None);
        page.on_exit();

        // 再次进入后计时从零开始
        page.on_enter();
        assert!(page.tick(0.5, None).signal.is_none());
    }
}
