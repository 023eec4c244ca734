//! # Journal 模块
//!
//! 运行日志数据模型，记录无人值守运行期间的关键事件。
//!
//! ## 设计原则
//!
//! - 记录流程中的关键事件（页面切换、目标发现、被丢弃的请求等）
//! - 所有可恢复状况的"最多记一笔日志"都落在这里
//! - 所有数据可序列化，Host 可定期导出排查现场问题
//! - 不记录逐帧状态（如渐变进度）

use serde::{Deserialize, Serialize};

use crate::input::TriggerInfo;

/// 过渡请求被丢弃的原因
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DropReason {
    /// 已有过渡进行中（闩锁丢弃，不排队）
    Transitioning,
    /// 目标索引越界
    OutOfBounds,
    /// 流程已结束
    FlowFinished,
}

/// 流程事件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FlowEvent {
    /// 过渡开始
    TransitionStarted {
        /// 来源页面（None 表示入场过渡）
        from: Option<usize>,
        /// 目标页面
        to: usize,
        /// 采用的过渡策略名
        policy: String,
    },

    /// 过渡完成
    TransitionFinished { to: usize },

    /// 页面进入（on_enter 已执行）
    PageEntered { page: usize },

    /// 页面退出（on_exit 已执行）
    PageExited { page: usize },

    /// 页面发出完成信号
    PageCompleted { page: usize, trigger: TriggerInfo },

    /// 过渡请求被丢弃
    RequestDropped { target: usize, reason: DropReason },

    /// (from, to) 未注册过渡策略，回退到默认 Sequential
    PolicyFallback { from: Option<usize>, to: usize },

    /// 页面槽位为空，流程跳过该页
    NullPageSkipped { page: usize },

    /// setup_data 收到的数据类型与页面不匹配（忽略）
    DataMismatch {
        page: usize,
        /// 页面期望的配置种类
        expected: String,
        /// 实际收到的配置种类
        actual: String,
    },

    /// 网格目标被发现
    TargetFound {
        x: usize,
        y: usize,
        /// 已发现数量
        found: usize,
        /// 目标总数
        total: usize,
    },

    /// 网格阶段完成（所有目标已发现）
    StageCompleted { page: usize },

    /// 网格目标列表为空，使用回退目标保证阶段可完成
    FallbackTarget { x: usize, y: usize },

    /// 无输入超时警示已触发
    IdleWarning { page: usize },

    /// 非法移动（双轴同时输入）
    InvalidMove { page: usize, dx: i32, dy: i32 },

    /// 重复确认（该参与者已确认过）
    DuplicateConfirm { participant: i32 },

    /// 外部拍摄任务启动
    CaptureStarted { attempt: u32 },

    /// 外部拍摄任务失败
    CaptureFailed { attempt: u32 },

    /// 流程结束，已向 SceneHost 发出 GoTo
    FlowFinished { destination: String },
}

/// 日志条目
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    /// 记录时间（Unix 秒）
    pub timestamp: u64,
    /// 事件内容
    pub event: FlowEvent,
}

/// 运行日志容器
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Journal {
    /// 条目列表（按时间顺序）
    entries: Vec<JournalEntry>,
    /// 最大条目数（防止长期运行内存无限增长）
    max_entries: usize,
}

impl Journal {
    /// 创建新的运行日志
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            max_entries: 1000, // 默认最多记录 1000 条
        }
    }

    /// 设置最大条目数
    pub fn with_max_entries(mut self, max: usize) -> Self {
        self.max_entries = max;
        self
    }

    /// 记录事件（记录时刻打时间戳）
    pub fn record(&mut self, event: FlowEvent) {
        self.entries.push(JournalEntry {
            timestamp: current_timestamp(),
            event,
        });

        // 超过上限时移除最早的条目
        while self.entries.len() > self.max_entries {
            self.entries.remove(0);
        }
    }

    /// 获取所有条目
    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    /// 获取被丢弃的过渡请求数量
    pub fn dropped_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e.event, FlowEvent::RequestDropped { .. }))
            .count()
    }

    /// 获取最近的 N 条条目
    pub fn recent(&self, count: usize) -> &[JournalEntry] {
        let start = self.entries.len().saturating_sub(count);
        &self.entries[start..]
    }

    /// 清空日志
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// 获取条目总数
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for Journal {
    fn default() -> Self {
        Self::new()
    }
}

/// 获取当前时间戳（Unix 秒）
fn current_timestamp() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
