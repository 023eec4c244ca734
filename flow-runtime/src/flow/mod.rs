//! # Flow 模块
//!
//! 页面流程状态机：页面生命周期、过渡策略选择与完成信号传播。
//!
//! ## 模块结构
//!
//! - [`controller`]：流程控制器
//! - [`transition`]：具名过渡策略与过渡执行状态机

pub mod controller;
pub mod transition;

pub use controller::{FlowController, PageSlot};
pub use transition::{TransitionPolicy, TransitionRun};
