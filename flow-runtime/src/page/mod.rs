//! # Page 模块
//!
//! 页面生命周期契约与页面类型分发。
//!
//! ## 设计说明
//!
//! - [`PageContract`] 是每种页面都实现的能力接口：数据装配、
//!   进入/退出、完成触发转发、逐帧推进
//! - [`Page`] 用带标签的枚举做分发（由配置选择变体），
//!   不依赖继承层级或类型转换
//! - 页面操作从不 panic、从不返回错误；可恢复状况降级为
//!   日志事件或 no-op
//!
//! ## 模块结构
//!
//! - [`intro`]：开场页
//! - [`qna`]：问答页
//! - [`check`]：双人确认页
//! - [`camera`]：拍摄页
//! - [`video`]：视频播放页
//!
//! 网格探索页的实现在 [`crate::grid`]。

pub mod camera;
pub mod check;
pub mod intro;
pub mod qna;
pub mod video;

use crate::command::Command;
use crate::config::PageConfig;
use crate::grid::GridRevealEngine;
use crate::input::{FlowInput, TriggerInfo};
use crate::journal::FlowEvent;

pub use camera::CameraPage;
pub use check::CheckPage;
pub use intro::IntroPage;
pub use qna::QnaPage;
pub use video::VideoPage;

/// 页面完成信号
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSignal {
    /// 页面完成，携带触发标记
    Completed { trigger: TriggerInfo },
}

/// 页面单次 tick 的结果
#[derive(Debug, Default)]
pub struct PageTick {
    /// 产生的指令
    pub commands: Vec<Command>,
    /// 产生的日志事件
    pub events: Vec<FlowEvent>,
    /// 完成信号（如果页面本帧完成）
    pub signal: Option<PageSignal>,
}

impl PageTick {
    /// 创建空结果
    pub fn empty() -> Self {
        Self::default()
    }

    /// 标记页面完成
    pub fn complete(&mut self, trigger: TriggerInfo) {
        self.signal = Some(PageSignal::Completed { trigger });
    }
}

/// 页面生命周期契约
///
/// # 约定
///
/// - `on_enter` 必须完整重置页面内部状态：退出后再次进入的
///   行为与首次运行不可区分
/// - `on_exit` 必须释放本次进入分配的资源（渐变任务、计时器、
///   遮罩缓冲等）
/// - `receive_trigger` 是过渡策略的转发钩子，每次过渡恰好
///   调用一次
pub trait PageContract {
    /// 装配页面数据
    ///
    /// 数据种类与页面不匹配时返回 false（调用方记日志），
    /// 绝不向外抛错。
    fn setup_data(&mut self, data: &PageConfig) -> bool;

    /// 进入页面（激活并完整重置内部状态）
    fn on_enter(&mut self);

    /// 退出页面（释放本次进入分配的资源）
    fn on_exit(&mut self);

    /// 接收上一页面的完成触发标记
    fn receive_trigger(&mut self, trigger: TriggerInfo);

    /// 推进页面逻辑
    fn tick(&mut self, dt: f64, input: Option<&FlowInput>) -> PageTick;
}

/// 页面
///
/// 由配置选择变体的带标签联合，统一转发 [`PageContract`] 操作。
#[derive(Debug, Clone)]
pub enum Page {
    /// 开场页
    Intro(IntroPage),
    /// 网格探索页
    Grid(GridRevealEngine),
    /// 问答页
    Qna(QnaPage),
    /// 双人确认页
    Check(CheckPage),
    /// 拍摄页
    Camera(CameraPage),
    /// 视频播放页
    Video(VideoPage),
}

impl Page {
    /// 按配置构建页面
    pub fn from_config(config: &PageConfig) -> Self {
        match config {
            PageConfig::Intro {
                title,
                body,
                auto_advance,
            } => Self::Intro(IntroPage::new(title.clone(), body.clone(), *auto_advance)),
            PageConfig::Grid { settings } => Self::Grid(GridRevealEngine::new(settings.clone())),
            PageConfig::Qna {
                nicknames,
                questions,
            } => Self::Qna(QnaPage::new(nicknames.clone(), questions.clone())),
            PageConfig::Check { prompt } => Self::Check(CheckPage::new(prompt.clone())),
            PageConfig::Camera {
                countdown,
                on_failure,
            } => Self::Camera(CameraPage::new(*countdown, *on_failure)),
            PageConfig::Video {
                path,
                finished_signal,
            } => Self::Video(VideoPage::new(path.clone(), finished_signal.clone())),
        }
    }

    /// 页面种类名（用于日志与诊断）
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Intro(_) => "intro",
            Self::Grid(_) => "grid",
            Self::Qna(_) => "qna",
            Self::Check(_) => "check",
            Self::Camera(_) => "camera",
            Self::Video(_) => "video",
        }
    }
}

impl PageContract for Page {
    fn setup_data(&mut self, data: &PageConfig) -> bool {
        match self {
            Self::Intro(page) => page.setup_data(data),
            Self::Grid(page) => page.setup_data(data),
            Self::Qna(page) => page.setup_data(data),
            Self::Check(page) => page.setup_data(data),
            Self::Camera(page) => page.setup_data(data),
            Self::Video(page) => page.setup_data(data),
        }
    }

    fn on_enter(&mut self) {
        match self {
            Self::Intro(page) => page.on_enter(),
            Self::Grid(page) => page.on_enter(),
            Self::Qna(page) => page.on_enter(),
            Self::Check(page) => page.on_enter(),
            Self::Camera(page) => page.on_enter(),
            Self::Video(page) => page.on_enter(),
        }
    }

    fn on_exit(&mut self) {
        match self {
            Self::Intro(page) => page.on_exit(),
            Self::Grid(page) => page.on_exit(),
            Self::Qna(page) => page.on_exit(),
            Self::Check(page) => page.on_exit(),
            Self::Camera(page) => page.on_exit(),
            Self::Video(page) => page.on_exit(),
        }
    }

    fn receive_trigger(&mut self, trigger: TriggerInfo) {
        match self {
            Self::Intro(page) => page.receive_trigger(trigger),
            Self::Grid(page) => page.receive_trigger(trigger),
            Self::Qna(page) => page.receive_trigger(trigger),
            Self::Check(page) => page.receive_trigger(trigger),
            Self::Camera(page) => page.receive_trigger(trigger),
            Self::Video(page) => page.receive_trigger(trigger),
        }
    }

    fn tick(&mut self, dt: f64, input: Option<&FlowInput>) -> PageTick {
        match self {
            Self::Intro(page) => page.tick(dt, input),
            Self::Grid(page) => page.tick(dt, input),
            Self::Qna(page) => page.tick(dt, input),
            Self::Check(page) => page.tick(dt, input),
            Self::Camera(page) => page.tick(dt, input),
            Self::Video(page) => page.tick(dt, input),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GridSettings;

    #[test]
    fn test_page_from_config_kinds() {
        let intro = Page::from_config(&PageConfig::Intro {
            title: "欢迎".to_string(),
            body: String::new(),
            auto_advance: None,
        });
        assert_eq!(intro.kind_name(), "intro");

        let grid = Page::from_config(&PageConfig::Grid {
            settings: GridSettings::default(),
        });
        assert_eq!(grid.kind_name(), "grid");
    }

    #[test]
    fn test_setup_data_mismatch_returns_false() {
        let mut page = Page::from_config(&PageConfig::Check {
            prompt: String::new(),
        });

        let ok = page.setup_data(&PageConfig::Check {
            prompt: "确认".to_string(),
        });
        assert!(ok);

        let mismatch = page.setup_data(&PageConfig::Video {
            path: "a.mp4".to_string(),
            finished_signal: "done".to_string(),
        });
        assert!(!mismatch);
    }

    #[test]
    fn test_page_tick_complete() {
        let mut tick = PageTick::empty();
        assert!(tick.signal.is_none());

        tick.complete(2);
        assert_eq!(tick.signal, Some(PageSignal::Completed { trigger: 2 }));
    }
}
