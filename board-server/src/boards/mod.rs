//! 看板领域模块 - 排序引擎与层级一致性
//!
//! # 模块结构
//!
//! - [`reorder`] - 拖拽结果到持久化操作的纯规划器
//! - [`watcher`] - 看板订阅扇出 (列表 feed + 每列任务 feed 对账)
//! - [`manager`] - 拖拽执行、级联删除、每列写串行化

pub mod manager;
pub mod reorder;
pub mod watcher;

pub use manager::{BoardManager, CascadeStats, DragOutcome, ManagerError, ManagerResult};
pub use reorder::{DragError, DragLocation, DragPlan, DragResult, plan_drag};
pub use watcher::BoardWatcher;
