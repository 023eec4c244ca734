//! # Config 模块
//!
//! 流程配置的数据模型。配置以 JSON 形式由 Host 加载（IO 在
//! Host 层），核心只暴露 [`FlowConfig::from_json`] 解析入口。
//!
//! ## 设计原则
//!
//! - 所有配置可序列化，字段带合理默认值
//! - 页面种类与过渡策略用 tag 标签区分
//! - 加载失败只允许在启动期阻断流程（返回 [`ConfigError`]），
//!   绝不 panic

use serde::{Deserialize, Serialize};

use crate::diagnostic::analyze_config;
use crate::error::ConfigError;
use crate::flow::transition::TransitionPolicy;
use crate::input::SignalId;

/// 轴冲突处理规则
///
/// 双轴同时输入（例如同时按住水平和垂直方向）时的处理方式。
/// 作为可配置策略而非硬编码，便于扩展到非四方向输入设备。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisConflictRule {
    /// 拒绝移动并播放警示闪烁（默认）
    RejectWithWarning,
    /// 丢弃垂直分量，按水平方向移动
    PreferHorizontal,
    /// 丢弃水平分量，按垂直方向移动
    PreferVertical,
}

impl Default for AxisConflictRule {
    fn default() -> Self {
        Self::RejectWithWarning
    }
}

/// 网格页设置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridSettings {
    /// 网格边长（网格为 size × size）
    #[serde(default = "default_grid_size")]
    pub size: usize,

    /// 目标格坐标列表
    ///
    /// 为空时运行期回退为网格中心的单一目标，保证阶段可完成。
    #[serde(default)]
    pub targets: Vec<(usize, usize)>,

    /// 光标初始坐标
    #[serde(default)]
    pub cursor_start: (usize, usize),

    /// 单格渐变时长（秒）
    #[serde(default = "default_fade_duration")]
    pub fade_duration: f64,

    /// 无输入警示阈值（秒）
    #[serde(default = "default_idle_threshold")]
    pub idle_threshold: f64,

    /// 轴冲突处理规则
    #[serde(default)]
    pub axis_conflict: AxisConflictRule,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            size: default_grid_size(),
            targets: Vec::new(),
            cursor_start: (0, 0),
            fade_duration: default_fade_duration(),
            idle_threshold: default_idle_threshold(),
            axis_conflict: AxisConflictRule::default(),
        }
    }
}

/// 拍摄失败处理策略
///
/// 外部拍摄任务失败由拥有它的页面决定后续动作，
/// 流程状态机自身从不重试。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum CaptureFailurePolicy {
    /// 记日志后照常完成页面（默认）
    Proceed,
    /// 最多额外重试 max 次，用尽后照常完成
    Retry { max: u32 },
}

impl Default for CaptureFailurePolicy {
    fn default() -> Self {
        Self::Proceed
    }
}

/// 页面配置
///
/// 每个变体携带该页面种类的全部数据（PageData）。
/// 数据在 setup 时应用一次，之后不可变。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PageConfig {
    /// 开场页
    Intro {
        /// 标题文本
        #[serde(default)]
        title: String,
        /// 正文文本
        #[serde(default)]
        body: String,
        /// 自动前进时长（秒），None 表示只响应按键
        #[serde(default)]
        auto_advance: Option<f64>,
    },

    /// 网格探索页
    Grid {
        /// 网格设置
        #[serde(default)]
        settings: GridSettings,
    },

    /// 问答页
    Qna {
        /// 参与者昵称（用于 Host 展示）
        #[serde(default)]
        nicknames: Vec<String>,
        /// 问题列表
        questions: Vec<String>,
    },

    /// 双人确认页
    Check {
        /// 提示文本
        #[serde(default)]
        prompt: String,
    },

    /// 拍摄页
    Camera {
        /// 倒计时时长（秒）
        #[serde(default = "default_countdown")]
        countdown: f64,
        /// 失败处理策略
        #[serde(default)]
        on_failure: CaptureFailurePolicy,
    },

    /// 视频播放页
    Video {
        /// 视频路径
        path: String,
        /// 播放结束信号标识
        #[serde(default = "default_finished_signal")]
        finished_signal: SignalId,
    },
}

impl PageConfig {
    /// 页面种类名（用于日志与诊断）
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Intro { .. } => "intro",
            Self::Grid { .. } => "grid",
            Self::Qna { .. } => "qna",
            Self::Check { .. } => "check",
            Self::Camera { .. } => "camera",
            Self::Video { .. } => "video",
        }
    }
}

/// 过渡策略注册规则
///
/// 将一个 (from, to) 页面对映射到一个过渡策略。
/// 未注册的页面对回退到默认 Sequential。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyRule {
    /// 来源页面索引，-1 表示入场过渡（流程启动进入第一页）
    pub from: i64,
    /// 目标页面索引
    pub to: usize,
    /// 过渡策略
    pub policy: TransitionPolicy,
}

impl PolicyRule {
    /// 来源页面索引（负数归一化为 None）
    pub fn from_index(&self) -> Option<usize> {
        if self.from < 0 {
            None
        } else {
            Some(self.from as usize)
        }
    }
}

/// 流程配置
///
/// 一次流程实例的全部静态数据：页面列表、过渡策略表、
/// 结束后交给 SceneHost 的目标场景。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowConfig {
    /// 页面列表（顺序即流程顺序）
    pub pages: Vec<PageConfig>,

    /// 过渡策略表
    #[serde(default)]
    pub policies: Vec<PolicyRule>,

    /// 流程结束后的目标场景标识
    pub destination: String,
}

impl FlowConfig {
    /// 从 JSON 文本解析并校验配置
    ///
    /// 解析或校验失败返回 [`ConfigError`]，绝不 panic。
    /// 这是 ConfigLoader 协作方唯一需要的入口：Host 负责读文件，
    /// 核心负责解析与校验。
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: FlowConfig =
            serde_json::from_str(text).map_err(|e| ConfigError::Parse {
                message: e.to_string(),
            })?;

        let report = analyze_config(&config);
        if report.has_errors() {
            let first = report
                .diagnostics
                .iter()
                .find(|d| d.level == crate::diagnostic::DiagnosticLevel::Error)
                .map(|d| d.message.clone())
                .unwrap_or_default();
            return Err(ConfigError::Validation {
                errors: report.error_count(),
                first,
            });
        }

        Ok(config)
    }
}

fn default_grid_size() -> usize {
    10
}

fn default_fade_duration() -> f64 {
    0.5
}

fn default_idle_threshold() -> f64 {
    10.0
}

fn default_countdown() -> f64 {
    3.0
}

fn default_finished_signal() -> SignalId {
    "video_finished".to_string()
}
