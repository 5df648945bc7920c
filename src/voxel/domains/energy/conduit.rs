//! 低压导线
//!
//! 导线只负责在邻居之间转运能量，自身带一个小缓冲

use serde::{Deserialize, Serialize};

use super::container::EnergyContainer;
use crate::voxel::constants::{CONDUIT_CAPACITY, CONDUIT_TRANSFER_RATE};
use crate::voxel::direction::Direction;
use crate::voxel::record::Record;

pub const KEY_CONTAINER: &str = "joule-container";

/// 导线对某个邻居的连接分类
///
/// 仅供邻接查询与渲染参考，不参与传导判定
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ConnectionKind {
    #[default]
    None,
    /// 另一根导线
    Conduit,
    /// 暴露能量能力的其他方块
    Terminal,
    /// 可交互开关（拉杆）
    Switch,
}

impl ConnectionKind {
    /// 持久化序号
    pub fn ordinal(self) -> i64 {
        match self {
            ConnectionKind::None => 0,
            ConnectionKind::Conduit => 1,
            ConnectionKind::Terminal => 2,
            ConnectionKind::Switch => 3,
        }
    }

    /// 从序号还原，未知值视为 None
    pub fn from_ordinal(value: i64) -> Self {
        match value {
            1 => ConnectionKind::Conduit,
            2 => ConnectionKind::Terminal,
            3 => ConnectionKind::Switch,
            _ => ConnectionKind::None,
        }
    }
}

/// 导线节点
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConduitNode {
    pub container: EnergyContainer,
    /// 按 `Direction::index()` 排列
    pub connections: [ConnectionKind; 6],
}

impl Default for ConduitNode {
    fn default() -> Self {
        Self {
            container: EnergyContainer::default()
                .with_capacity(CONDUIT_CAPACITY)
                .with_transfer_rate(CONDUIT_TRANSFER_RATE),
            connections: [ConnectionKind::None; 6],
        }
    }
}

impl ConduitNode {
    pub fn new() -> Self {
        Self::default()
    }

    /// 带初始存储量的导线
    pub fn with_stored(stored: i64) -> Self {
        let mut node = Self::default();
        node.container = EnergyContainer::with_stored(
            stored,
            CONDUIT_CAPACITY,
            CONDUIT_TRANSFER_RATE,
            CONDUIT_TRANSFER_RATE,
        );
        node
    }

    pub fn connection(&self, dir: Direction) -> ConnectionKind {
        self.connections[dir.index()]
    }

    /// 设置某方向的分类，返回是否发生变化
    pub fn set_connection(&mut self, dir: Direction, kind: ConnectionKind) -> bool {
        let slot = &mut self.connections[dir.index()];
        let changed = *slot != kind;
        *slot = kind;
        changed
    }

    /// 有连接的方向数
    pub fn connection_count(&self) -> usize {
        self.connections
            .iter()
            .filter(|&&c| c != ConnectionKind::None)
            .count()
    }

    pub fn to_record(&self) -> Record {
        let mut record = Record::new();
        for dir in Direction::ALL {
            record.set_int(dir.key(), self.connection(dir).ordinal());
        }
        record.set_record(KEY_CONTAINER, self.container.to_record());
        record
    }

    /// 读取记录
    ///
    /// 缺失的方向视为 None；容器子记录就地读取，缺失时保留当前容器
    pub fn load_record(&mut self, record: &Record) {
        for dir in Direction::ALL {
            let kind = record
                .get_int(dir.key())
                .map(ConnectionKind::from_ordinal)
                .unwrap_or_default();
            self.set_connection(dir, kind);
        }

        if let Some(sub) = record.get_record(KEY_CONTAINER) {
            self.container.load_record(sub);
        }
    }

    pub fn from_record(record: &Record) -> Self {
        let mut node = Self::default();
        node.load_record(record);
        node
    }
}
