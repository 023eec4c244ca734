//! # Error 模块
//!
//! 定义 flow-runtime 中使用的错误类型。
//!
//! 只有启动期的配置加载/校验允许阻断流程；运行期的可恢复
//! 状况一律降级为日志化的 no-op，`tick` 不返回错误。

use thiserror::Error;

/// 配置错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// JSON 解析失败
    #[error("配置解析失败: {message}")]
    Parse { message: String },

    /// 配置校验失败
    ///
    /// 完整诊断列表可通过 [`crate::diagnostic::analyze_config`] 获取。
    #[error("配置校验失败（{errors} 个错误）: {first}")]
    Validation { errors: usize, first: String },
}

/// Result 类型别名
pub type FlowResult<T> = Result<T, ConfigError>;
