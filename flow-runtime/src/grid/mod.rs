//! # Grid 模块
//!
//! 网格探索页：雾中网格的逐格软揭示。
//!
//! ## 模块结构
//!
//! - [`mask`]：遮罩缓冲（二维标量场）
//! - [`fade`]：单格渐变任务调度
//! - [`engine`]：光标移动、目标检测、闲置警示与完成序列

pub mod engine;
pub mod fade;
pub mod mask;

pub use engine::{GridPhase, GridRevealEngine};
pub use fade::{FadeJob, FadeSet};
pub use mask::MaskBuffer;
