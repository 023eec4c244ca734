//! # Fade 模块
//!
//! 单格渐变任务调度。
//!
//! ## 设计说明
//!
//! - 每个坐标同一时刻至多一个存活的 [`FadeJob`]
//! - 对已在渐变的坐标重新触发时**替换**原任务（不叠加），
//!   起始值取该格当前的插值结果，避免视觉跳变
//! - 任务在进度到达 1.0 时移除，端点值精确写入

use serde::{Deserialize, Serialize};

use crate::grid::mask::MaskBuffer;
use crate::state::Fade;

/// 单格渐变任务
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FadeJob {
    /// 目标格坐标
    pub cell: (usize, usize),
    /// 渐变状态
    fade: Fade,
}

impl FadeJob {
    /// 创建渐变任务
    pub fn new(cell: (usize, usize), from: f64, to: f64, duration: f64) -> Self {
        Self {
            cell,
            fade: Fade::new(from, to, duration),
        }
    }

    /// 推进任务，返回是否已完成
    pub fn advance(&mut self, dt: f64) -> bool {
        self.fade.advance(dt)
    }

    /// 当前插值结果
    pub fn value(&self) -> f64 {
        self.fade.value()
    }

    /// 渐变目标值
    pub fn target(&self) -> f64 {
        self.fade.to
    }

    /// 是否已完成
    pub fn is_done(&self) -> bool {
        self.fade.is_done()
    }
}

/// 渐变任务集合
///
/// 以坐标为键；"并发"的多个任务只是同一 tick 内
/// 依次推进的独立状态记录，不是独立执行上下文。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FadeSet {
    jobs: Vec<FadeJob>,
}

impl FadeSet {
    /// 创建空集合
    pub fn new() -> Self {
        Self::default()
    }

    /// 启动一个渐变任务
    ///
    /// 同坐标已有任务时替换之。
    pub fn start(&mut self, cell: (usize, usize), from: f64, to: f64, duration: f64) {
        self.jobs.retain(|job| job.cell != cell);
        self.jobs.push(FadeJob::new(cell, from, to, duration));
    }

    /// 推进所有任务并写入遮罩缓冲，返回本次完成的任务
    ///
    /// 每个坐标每 tick 至多写入一次。完成的任务在写入
    /// 精确端点值后从集合移除。
    pub fn advance_into(&mut self, dt: f64, mask: &mut MaskBuffer) -> Vec<FadeJob> {
        let mut finished = Vec::new();

        for job in &mut self.jobs {
            job.advance(dt);
            mask.set(job.cell.0, job.cell.1, job.value() as f32);
        }

        let mut i = 0;
        while i < self.jobs.len() {
            if self.jobs[i].is_done() {
                finished.push(self.jobs.remove(i));
            } else {
                i += 1;
            }
        }

        finished
    }

    /// 某坐标是否正在渐变
    pub fn is_fading(&self, cell: (usize, usize)) -> bool {
        self.jobs.iter().any(|job| job.cell == cell)
    }

    /// 存活任务数
    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// 清空所有任务
    pub fn clear(&mut self) {
        self.jobs.clear();
    }
}
