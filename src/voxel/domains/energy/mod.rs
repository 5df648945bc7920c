//! 能量领域模块
//!
//! 提供焦耳能量模拟功能：
//! - 容器（容量与单次输入/输出速率上限）
//! - 导线传导（相邻导线之间向均衡推进）
//! - 终端（伏打电堆产能、热机、拉杆）
//!
//! ## 传导规则
//!
//! 每根导线每 tick 按固定方向顺序扫描六个邻居，仅当自身存储量严格大于
//! 邻居导线时推送：
//!
//! amount = min(STEP_CAP, (own + taker) / 2 - taker)
//!
//! 先让邻居 give 得到实际接收量，再从自身 take 同样的量，
//! 所以传导本身从不改变网络总量。
//!
//! 导线按宿主顺序依次更新，属于异步松弛：多个 tick 后趋于均衡，
//! 单个 tick 不保证完全均衡。

pub mod api;
pub mod capability;
pub mod conduit;
pub mod container;
pub mod heat;
pub mod pile;
pub mod systems;

pub use api::{EnergyApi, TransferReport};
pub use capability::{CapabilityResolver, EnergyConsumer, EnergyHolder, EnergyProducer, HeatHolder};
pub use conduit::{ConduitNode, ConnectionKind};
pub use container::EnergyContainer;
pub use heat::HeatMachine;
pub use pile::{Lever, VoltaicPile};
pub use systems::{EnergyPlugin, EnergyStats, TickCounter};
