//! 能量模拟常量定义

/// 低压导线容量（单位：焦耳）
pub const CONDUIT_CAPACITY: i64 = 250;

/// 低压导线单次输入/输出速率（单位：焦耳）
pub const CONDUIT_TRANSFER_RATE: i64 = 50;

/// 导线每 tick 向单个邻居推送的上限，与导线自身速率一致
pub const CONDUCTION_STEP_CAP: i64 = 50;

/// 默认容器容量
pub const DEFAULT_CAPACITY: i64 = 5000;

/// 默认容器输入/输出速率
pub const DEFAULT_TRANSFER_RATE: i64 = 50;

/// 热机默认温度
pub const DEFAULT_TEMPERATURE: i64 = 70;

/// 热机默认熔点
pub const DEFAULT_MELTING_POINT: i64 = 1200;

/// 每次 give_heat / take_heat 移动的热量（固定单位，尚未按温差计算）
pub const HEAT_TRANSFER_UNIT: i64 = 1;

/// 伏打电堆默认容量
pub const PILE_CAPACITY: i64 = 1000;

/// 伏打电堆每 tick 产能
pub const PILE_GENERATION: i64 = 20;

/// 模拟频率（tick/秒）
pub const TICK_RATE_HZ: f64 = 20.0;

/// 网络统计日志间隔（tick）
pub const SUMMARY_INTERVAL: u64 = 100;
