//! 实时同步模块
//!
//! # 架构
//!
//! ```text
//! StoreGateway ──▶ notify() ──▶ ChangeHub (broadcast) ──▶ Feed tasks
//!                                                            │
//!                                                   re-fetch + callback
//!                                                            ▼
//!                                                    订阅者 (镜像/界面)
//! ```
//!
//! 每次成功写入后网关发出变更通知；订阅该范围的 feed 重新查询完整有序
//! 集合并回调订阅者。订阅回调是唯一可信的数据来源，本地计算的状态从不
//! 作为最终结果。

pub mod feed;
pub mod hub;

pub use feed::{FeedCallback, FeedGuard};
pub use hub::{ChangeEvent, ChangeHub, EntityKind, ROOT_SCOPE};
