//! 能量方块世界模块
//!
//! 这个模块包含了能量模拟的核心系统，包括：
//!
//! - **constants**: 常量定义（导线容量、传导上限、默认参数）
//! - **config**: 运行时配置（命令行与环境变量）
//! - **direction**: 六方向与固定扫描顺序
//! - **flags**: 能量能力标志位
//! - **record**: 扁平键值记录（存档与同步）
//! - **change**: 方块变更日志
//! - **world**: 能量方块世界（方块存储、能力查询、邻居通知）
//! - **domains**: 领域系统（编辑命令、能量传导）
//! - **plugin**: Bevy插件

pub mod change;
pub mod config;
pub mod constants;
pub mod direction;
pub mod domains;
pub mod flags;
pub mod plugin;
pub mod record;
pub mod world;

// 重新导出常用类型，方便外部使用
pub use config::EnergyConfig;
pub use constants::{CONDUCTION_STEP_CAP, CONDUIT_CAPACITY, CONDUIT_TRANSFER_RATE, TICK_RATE_HZ};
pub use direction::Direction;
pub use domains::command::{BlockEdit, BlockEdits};
pub use domains::energy::{
    CapabilityResolver, ConduitNode, ConnectionKind, EnergyApi, EnergyContainer, HeatMachine,
    Lever, VoltaicPile,
};
pub use domains::SimulationSet;
pub use flags::Capabilities;
pub use plugin::VoltaicsPlugin;
pub use record::{Record, RecordValue};
pub use world::{BlockEntity, EnergyWorld};
