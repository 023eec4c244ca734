//! # 诊断模块
//!
//! 提供流程配置的静态检查和诊断 API，不依赖 IO 或引擎。
//!
//! ## 设计原则
//!
//! - 纯函数 API，可在无 IO 环境下运行
//! - 诊断分级：Error（阻断启动）、Warn（建议修复）、Info（信息提示）
//! - 复用 config 数据模型，不重复解析逻辑

use std::collections::HashSet;

use crate::config::{FlowConfig, PageConfig};

/// 诊断级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticLevel {
    /// 信息提示
    Info,
    /// 警告（建议修复）
    Warn,
    /// 错误（阻断启动）
    Error,
}

impl std::fmt::Display for DiagnosticLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "INFO"),
            Self::Warn => write!(f, "WARN"),
            Self::Error => write!(f, "ERROR"),
        }
    }
}

/// 诊断条目
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// 诊断级别
    pub level: DiagnosticLevel,
    /// 定位上下文（如 `pages[2]`、`policies[0]`）
    pub context: String,
    /// 诊断消息
    pub message: String,
    /// 诊断详情（可选）
    pub detail: Option<String>,
}

impl Diagnostic {
    /// 创建错误诊断
    pub fn error(context: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: DiagnosticLevel::Error,
            context: context.into(),
            message: message.into(),
            detail: None,
        }
    }

    /// 创建警告诊断
    pub fn warn(context: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: DiagnosticLevel::Warn,
            context: context.into(),
            message: message.into(),
            detail: None,
        }
    }

    /// 创建信息诊断
    pub fn info(context: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: DiagnosticLevel::Info,
            context: context.into(),
            message: message.into(),
            detail: None,
        }
    }

    /// 设置详情
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}: {}", self.level, self.context, self.message)?;
        if let Some(detail) = &self.detail {
            write!(f, "\n  | {}", detail)?;
        }
        Ok(())
    }
}

/// 诊断结果
#[derive(Debug, Clone, Default)]
pub struct DiagnosticResult {
    /// 诊断条目列表
    pub diagnostics: Vec<Diagnostic>,
}

impl DiagnosticResult {
    /// 创建空结果
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加诊断
    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// 合并另一个结果
    pub fn merge(&mut self, other: DiagnosticResult) {
        self.diagnostics.extend(other.diagnostics);
    }

    /// 获取错误数量
    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.level == DiagnosticLevel::Error)
            .count()
    }

    /// 获取警告数量
    pub fn warn_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.level == DiagnosticLevel::Warn)
            .count()
    }

    /// 是否有错误
    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// 按级别过滤
    pub fn filter_by_level(&self, min_level: DiagnosticLevel) -> Vec<&Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.level >= min_level)
            .collect()
    }
}

//=============================================================================
// 配置分析 API
//=============================================================================

/// 分析流程配置，返回诊断结果
///
/// 执行以下检查：
/// - 页面列表为空（Error）
/// - 过渡策略规则引用越界页面（Error）
/// - 重复注册的 (from, to) 策略规则（Warn，后者生效）
/// - 网格尺寸为 0 / 目标或光标坐标越界（Error）
/// - 网格目标列表为空（Warn，运行期回退到中心目标）
/// - 问答页问题列表为空（Warn，页面将立即完成）
/// - 视频路径为空 / 倒计时为负 / 自动前进时长非正（Warn）
/// - 目标场景标识为空（Warn）
pub fn analyze_config(config: &FlowConfig) -> DiagnosticResult {
    let mut result = DiagnosticResult::new();

    if config.pages.is_empty() {
        result.push(Diagnostic::error("pages", "页面列表为空"));
    }

    for (index, page) in config.pages.iter().enumerate() {
        analyze_page(index, page, &mut result);
    }

    analyze_policies(config, &mut result);

    if config.destination.is_empty() {
        result.push(Diagnostic::warn("destination", "目标场景标识为空"));
    }

    result
}

/// 分析单个页面配置
fn analyze_page(index: usize, page: &PageConfig, result: &mut DiagnosticResult) {
    let context = format!("pages[{}]", index);

    match page {
        PageConfig::Grid { settings } => {
            if settings.size == 0 {
                result.push(Diagnostic::error(&context, "网格尺寸为 0"));
                return;
            }

            for (i, &(x, y)) in settings.targets.iter().enumerate() {
                if x >= settings.size || y >= settings.size {
                    result.push(
                        Diagnostic::error(
                            &context,
                            format!("目标坐标 ({}, {}) 超出网格范围", x, y),
                        )
                        .with_detail(format!(
                            "targets[{}] 必须落在 [0, {}) 内",
                            i, settings.size
                        )),
                    );
                }
            }

            let unique: HashSet<_> = settings.targets.iter().collect();
            if unique.len() < settings.targets.len() {
                result.push(Diagnostic::warn(&context, "目标列表存在重复坐标"));
            }

            if settings.targets.is_empty() {
                result.push(
                    Diagnostic::warn(&context, "目标列表为空")
                        .with_detail("运行期将回退为网格中心的单一目标"),
                );
            }

            let (cx, cy) = settings.cursor_start;
            if cx >= settings.size || cy >= settings.size {
                result.push(Diagnostic::error(
                    &context,
                    format!("光标初始坐标 ({}, {}) 超出网格范围", cx, cy),
                ));
            }

            if settings.fade_duration < 0.0 {
                result.push(Diagnostic::warn(&context, "渐变时长为负，视为 0"));
            }
        }

        PageConfig::Qna { questions, .. } => {
            if questions.is_empty() {
                result.push(
                    Diagnostic::warn(&context, "问题列表为空")
                        .with_detail("该页面将在进入后立即完成"),
                );
            }
        }

        PageConfig::Camera { countdown, .. } => {
            if *countdown < 0.0 {
                result.push(Diagnostic::warn(&context, "倒计时时长为负，视为 0"));
            }
        }

        PageConfig::Video { path, .. } => {
            if path.is_empty() {
                result.push(Diagnostic::warn(&context, "视频路径为空"));
            }
        }

        PageConfig::Intro { auto_advance, .. } => {
            if let Some(secs) = auto_advance {
                if *secs <= 0.0 {
                    result.push(Diagnostic::warn(
                        &context,
                        "自动前进时长非正，页面将立即完成",
                    ));
                }
            }
        }

        PageConfig::Check { .. } => {}
    }
}

/// 分析过渡策略表
fn analyze_policies(config: &FlowConfig, result: &mut DiagnosticResult) {
    let page_count = config.pages.len();
    let mut seen: HashSet<(i64, usize)> = HashSet::new();

    for (index, rule) in config.policies.iter().enumerate() {
        let context = format!("policies[{}]", index);

        if rule.from >= page_count as i64 {
            result.push(Diagnostic::error(
                &context,
                format!("来源页面索引 {} 越界（共 {} 页）", rule.from, page_count),
            ));
        }

        if rule.to >= page_count {
            result.push(Diagnostic::error(
                &context,
                format!("目标页面索引 {} 越界（共 {} 页）", rule.to, page_count),
            ));
        }

        if !seen.insert((rule.from, rule.to)) {
            result.push(
                Diagnostic::warn(
                    &context,
                    format!("页面对 ({}, {}) 重复注册策略", rule.from, rule.to),
                )
                .with_detail("后注册的规则生效"),
            );
        }
    }
}
