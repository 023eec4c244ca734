//! # Video 模块
//!
//! 视频播放页：下发播放指令，等待外部结束信号。

use serde::{Deserialize, Serialize};

use crate::command::Command;
use crate::config::PageConfig;
use crate::input::{FlowInput, SignalId, TriggerInfo};
use crate::page::{PageContract, PageTick};

/// 视频播放页
///
/// 播放器是外部协作方：核心在进入后的第一个 tick 下发
/// [`Command::PlayVideo`]，之后等待 Host 以匹配的
/// [`FlowInput::Signal`] 通知播放结束。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoPage {
    /// 视频路径
    path: String,
    /// 播放结束信号标识
    finished_signal: SignalId,
    /// 播放指令是否已下发
    started: bool,
}

impl VideoPage {
    /// 创建视频播放页
    pub fn new(path: String, finished_signal: SignalId) -> Self {
        Self {
            path,
            finished_signal,
            started: false,
        }
    }

    /// 视频路径
    pub fn path(&self) -> &str {
        &self.path
    }
}

impl PageContract for VideoPage {
    fn setup_data(&mut self, data: &PageConfig) -> bool {
        match data {
            PageConfig::Video {
                path,
                finished_signal,
            } => {
                self.path = path.clone();
                self.finished_signal = finished_signal.clone();
                true
            }
            _ => false,
        }
    }

    fn on_enter(&mut self) {
        self.started = false;
    }

    fn on_exit(&mut self) {
        self.started = false;
    }

    fn receive_trigger(&mut self, _trigger: TriggerInfo) {
        // 视频内容与触发来源无关
    }

    fn tick(&mut self, _dt: f64, input: Option<&FlowInput>) -> PageTick {
        let mut out = PageTick::empty();

        if !self.started {
            out.commands.push(Command::PlayVideo {
                path: self.path.clone(),
            });
            self.started = true;
        }

        match input {
            Some(FlowInput::Signal { id }) if *id == self.finished_signal => {
                out.complete(0);
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

    fn entered_page() -> VideoPage {
        let mut page = VideoPage::new("outro.mp4".to_string(), "video_finished".to_string());
        page.on_enter();
        page
    }

    #[test]
    fn test_video_plays_once_then_waits() {
        let mut page = entered_page();

        let out = page.tick(0.1, None);
        assert!(matches!(
            &out.commands[0],
            Command::PlayVideo { path } if path == "outro.mp4"
        ));

        // 播放指令只下发一次
        let out = page.tick(0.1, None);
        assert!(out.commands.is_empty());
        assert!(out.signal.is_none());
    }

    #[test]
    fn test_video_completes_on_matching_signal() {
        let mut page = entered_page();
        page.tick(0.1, None);

        // 不匹配的信号被忽略
        let out = page.tick(0.1, Some(&FlowInput::signal("other")));
        assert!(out.signal.is_none());

        let out = page.tick(0.1, Some(&FlowInput::signal("video_finished")));
        assert_eq!(out.signal, Some(PageSignal::Completed { trigger: 0 }));
    }

    #[test]
    fn test_video_reenter_replays() {
        let mut page = entered_page();
        page.tick(0.1, None);
        page.on_exit();

        page.on_enter();
        let out = page.tick(0.1, None);
        assert!(matches!(&out.commands[0], Command::PlayVideo { .. }));
    }
}
