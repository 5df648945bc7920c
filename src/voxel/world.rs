//! 能量方块世界
//!
//! 宿主侧的方块存储：按网格坐标保存方块实体，实现能力查询，
//! 并在放置/移除时通知相邻导线重新分类

use bevy::prelude::*;
use std::collections::{HashMap, HashSet};

use crate::voxel::change::BlockChange;
use crate::voxel::direction::Direction;
use crate::voxel::domains::energy::api::EnergyApi;
use crate::voxel::domains::energy::capability::{
    CapabilityResolver, EnergyConsumer, EnergyHolder, EnergyProducer, HeatHolder,
};
use crate::voxel::domains::energy::conduit::ConduitNode;
use crate::voxel::domains::energy::heat::HeatMachine;
use crate::voxel::domains::energy::pile::{Lever, VoltaicPile};
use crate::voxel::flags::Capabilities;
use crate::voxel::record::Record;

/// 网格中的方块实体
#[derive(Debug, Clone, PartialEq)]
pub enum BlockEntity {
    Conduit(ConduitNode),
    VoltaicPile(VoltaicPile),
    Lever(Lever),
    HeatMachine(HeatMachine),
}

impl BlockEntity {
    pub fn name(&self) -> &'static str {
        match self {
            BlockEntity::Conduit(_) => "low_voltage_conduit",
            BlockEntity::VoltaicPile(_) => "voltaic_pile",
            BlockEntity::Lever(_) => "lever",
            BlockEntity::HeatMachine(_) => "heat_machine",
        }
    }

    /// 暴露的能量角色（各面相同）
    pub fn capabilities(&self) -> Capabilities {
        match self {
            BlockEntity::Conduit(_) => Capabilities::STORAGE,
            BlockEntity::VoltaicPile(_) => Capabilities::HOLDER | Capabilities::PRODUCER,
            BlockEntity::Lever(_) => Capabilities::NONE,
            BlockEntity::HeatMachine(_) => Capabilities::STORAGE | Capabilities::HEAT,
        }
    }

    pub fn holder(&self) -> Option<&dyn EnergyHolder> {
        match self {
            BlockEntity::Conduit(node) => Some(&node.container),
            BlockEntity::VoltaicPile(pile) => Some(&pile.container),
            BlockEntity::HeatMachine(machine) => Some(&machine.container),
            BlockEntity::Lever(_) => None,
        }
    }

    pub fn consumer_mut(&mut self) -> Option<&mut dyn EnergyConsumer> {
        match self {
            BlockEntity::Conduit(node) => Some(&mut node.container),
            BlockEntity::HeatMachine(machine) => Some(&mut machine.container),
            BlockEntity::VoltaicPile(_) | BlockEntity::Lever(_) => None,
        }
    }

    pub fn producer_mut(&mut self) -> Option<&mut dyn EnergyProducer> {
        match self {
            BlockEntity::Conduit(node) => Some(&mut node.container),
            BlockEntity::VoltaicPile(pile) => Some(&mut pile.container),
            BlockEntity::HeatMachine(machine) => Some(&mut machine.container),
            BlockEntity::Lever(_) => None,
        }
    }

    pub fn heat_mut(&mut self) -> Option<&mut dyn HeatHolder> {
        match self {
            BlockEntity::HeatMachine(machine) => Some(machine),
            _ => None,
        }
    }

    /// 当前存储量，没有容器时为 0
    pub fn stored(&self) -> i64 {
        self.holder().map_or(0, |h| h.stored_power())
    }

    pub fn to_record(&self) -> Record {
        match self {
            BlockEntity::Conduit(node) => node.to_record(),
            BlockEntity::VoltaicPile(pile) => pile.to_record(),
            BlockEntity::Lever(lever) => lever.to_record(),
            BlockEntity::HeatMachine(machine) => machine.to_record(),
        }
    }

    pub fn load_record(&mut self, record: &Record) {
        match self {
            BlockEntity::Conduit(node) => node.load_record(record),
            BlockEntity::VoltaicPile(pile) => pile.load_record(record),
            BlockEntity::Lever(lever) => lever.load_record(record),
            BlockEntity::HeatMachine(machine) => machine.load_record(record),
        }
    }
}

/// 能量世界 - 管理所有能量方块
#[derive(Resource, Default)]
pub struct EnergyWorld {
    /// 网格坐标 -> 方块实体
    pub blocks: HashMap<IVec3, BlockEntity>,
    /// 变更日志（用于全量同步）
    pub changes: Vec<BlockChange>,
}

impl EnergyWorld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, pos: IVec3) -> Option<&BlockEntity> {
        self.blocks.get(&pos)
    }

    pub fn get_mut(&mut self, pos: IVec3) -> Option<&mut BlockEntity> {
        self.blocks.get_mut(&pos)
    }

    pub fn conduit(&self, pos: IVec3) -> Option<&ConduitNode> {
        match self.blocks.get(&pos) {
            Some(BlockEntity::Conduit(node)) => Some(node),
            _ => None,
        }
    }

    pub fn conduit_mut(&mut self, pos: IVec3) -> Option<&mut ConduitNode> {
        match self.blocks.get_mut(&pos) {
            Some(BlockEntity::Conduit(node)) => Some(node),
            _ => None,
        }
    }

    /// 放置方块，返回被替换的旧方块
    ///
    /// 放置后刷新自身（若为导线）与六个邻居导线的分类
    pub fn place(&mut self, pos: IVec3, block: BlockEntity) -> Option<BlockEntity> {
        debug!("Placing {} at {:?}", block.name(), pos);
        let old = self.blocks.insert(pos, block);
        self.changes.push(BlockChange::Placed { pos });
        self.notify_neighbors(pos);
        old
    }

    /// 移除方块，并通知六个邻居导线
    pub fn remove(&mut self, pos: IVec3) -> Option<BlockEntity> {
        let old = self.blocks.remove(&pos)?;
        debug!("Removed {} at {:?}", old.name(), pos);
        self.changes.push(BlockChange::Removed { pos });
        self.notify_neighbors(pos);
        Some(old)
    }

    /// 切换拉杆，返回新状态
    pub fn toggle(&mut self, pos: IVec3) -> Option<bool> {
        let Some(BlockEntity::Lever(lever)) = self.blocks.get_mut(&pos) else {
            return None;
        };
        let on = lever.toggle();
        self.changes.push(BlockChange::State { pos });
        Some(on)
    }

    /// 邻居通知：刷新 pos 及其六个邻居中所有导线的分类
    fn notify_neighbors(&mut self, pos: IVec3) {
        EnergyApi::refresh_connections(self, pos);
        for dir in Direction::ALL {
            EnergyApi::refresh_connections(self, dir.step(pos));
        }
    }

    /// 所有导线位置，按 (y, z, x) 排序以保证确定性的更新顺序
    pub fn conduit_positions(&self) -> Vec<IVec3> {
        self.sorted_positions(|block| matches!(block, BlockEntity::Conduit(_)))
    }

    pub fn pile_positions(&self) -> Vec<IVec3> {
        self.sorted_positions(|block| matches!(block, BlockEntity::VoltaicPile(_)))
    }

    fn sorted_positions(&self, filter: impl Fn(&BlockEntity) -> bool) -> Vec<IVec3> {
        let mut positions: Vec<IVec3> = self
            .blocks
            .iter()
            .filter(|(_, block)| filter(block))
            .map(|(&pos, _)| pos)
            .collect();
        positions.sort_by_key(|p| (p.y, p.z, p.x));
        positions
    }

    /// 全部方块存储量之和
    pub fn total_stored(&self) -> i64 {
        self.blocks.values().map(BlockEntity::stored).sum()
    }

    /// 方块的全量快照（存档与新观察者同步）
    pub fn snapshot(&self, pos: IVec3) -> Option<Record> {
        self.blocks.get(&pos).map(BlockEntity::to_record)
    }

    /// 用快照覆盖方块状态，方块不存在时返回 false
    pub fn apply_snapshot(&mut self, pos: IVec3, record: &Record) -> bool {
        let Some(block) = self.blocks.get_mut(&pos) else {
            return false;
        };
        block.load_record(record);
        self.changes.push(BlockChange::State { pos });
        true
    }

    /// 本轮变更涉及且仍存在的方块的快照，每个位置只出现一次
    pub fn replication_payloads(&self) -> Vec<(IVec3, Record)> {
        let mut seen = HashSet::new();
        self.changes
            .iter()
            .filter(|change| change.needs_snapshot())
            .map(BlockChange::pos)
            .filter(|pos| seen.insert(*pos))
            .filter_map(|pos| self.snapshot(pos).map(|record| (pos, record)))
            .collect()
    }

    /// 清空变更日志
    pub fn clear_changes(&mut self) {
        self.changes.clear();
    }
}

impl CapabilityResolver for EnergyWorld {
    fn capabilities(&self, pos: IVec3, _side: Direction) -> Capabilities {
        self.blocks
            .get(&pos)
            .map_or(Capabilities::NONE, BlockEntity::capabilities)
    }

    fn is_conductor(&self, pos: IVec3) -> bool {
        matches!(self.blocks.get(&pos), Some(BlockEntity::Conduit(_)))
    }

    fn is_switch(&self, pos: IVec3) -> bool {
        matches!(self.blocks.get(&pos), Some(BlockEntity::Lever(_)))
    }

    fn holder(&self, pos: IVec3, _side: Direction) -> Option<&dyn EnergyHolder> {
        self.blocks.get(&pos).and_then(BlockEntity::holder)
    }

    fn consumer_mut(&mut self, pos: IVec3, _side: Direction) -> Option<&mut dyn EnergyConsumer> {
        self.blocks.get_mut(&pos).and_then(BlockEntity::consumer_mut)
    }

    fn producer_mut(&mut self, pos: IVec3, _side: Direction) -> Option<&mut dyn EnergyProducer> {
        self.blocks.get_mut(&pos).and_then(BlockEntity::producer_mut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voxel::domains::energy::conduit::ConnectionKind;

    #[test]
    fn test_place_classifies_both_sides() {
        let mut world = EnergyWorld::new();
        let a = IVec3::ZERO;
        let b = IVec3::X;

        world.place(a, BlockEntity::Conduit(ConduitNode::new()));
        world.place(b, BlockEntity::Conduit(ConduitNode::new()));

        assert_eq!(
            world.conduit(a).map(|n| n.connection(Direction::East)),
            Some(ConnectionKind::Conduit)
        );
        assert_eq!(
            world.conduit(b).map(|n| n.connection(Direction::West)),
            Some(ConnectionKind::Conduit)
        );
    }

    #[test]
    fn test_terminal_switch_and_removal() {
        let mut world = EnergyWorld::new();
        let center = IVec3::new(0, 5, 0);
        world.place(center, BlockEntity::Conduit(ConduitNode::new()));
        world.place(
            Direction::Up.step(center),
            BlockEntity::HeatMachine(HeatMachine::default()),
        );
        world.place(
            Direction::North.step(center),
            BlockEntity::Lever(Lever::default()),
        );
        world.place(
            Direction::South.step(center),
            BlockEntity::VoltaicPile(VoltaicPile::default()),
        );

        let node = world.conduit(center).cloned().unwrap_or_default();
        assert_eq!(node.connection(Direction::Up), ConnectionKind::Terminal);
        assert_eq!(node.connection(Direction::North), ConnectionKind::Switch);
        assert_eq!(node.connection(Direction::South), ConnectionKind::Terminal);
        assert_eq!(node.connection(Direction::Down), ConnectionKind::None);

        assert!(world.remove(Direction::Up.step(center)).is_some());
        assert_eq!(
            world.conduit(center).map(|n| n.connection(Direction::Up)),
            Some(ConnectionKind::None)
        );
    }

    #[test]
    fn test_remove_missing_block() {
        let mut world = EnergyWorld::new();
        assert!(world.remove(IVec3::ONE).is_none());
        assert!(world.changes.is_empty());
    }

    #[test]
    fn test_capabilities_by_kind() {
        let mut world = EnergyWorld::new();
        world.place(IVec3::ZERO, BlockEntity::Lever(Lever::default()));
        world.place(IVec3::X, BlockEntity::VoltaicPile(VoltaicPile::default()));

        assert_eq!(
            world.capabilities(IVec3::ZERO, Direction::Up),
            Capabilities::NONE
        );
        assert!(world.is_switch(IVec3::ZERO));
        assert!(world.holder(IVec3::X, Direction::Up).is_some());
        assert!(world.consumer_mut(IVec3::X, Direction::Up).is_none());
        assert!(world.producer_mut(IVec3::X, Direction::Up).is_some());
        assert_eq!(
            world.capabilities(IVec3::Y, Direction::Up),
            Capabilities::NONE
        );
    }

    #[test]
    fn test_heat_role_only_on_heat_machine() {
        let mut world = EnergyWorld::new();
        world.place(IVec3::ZERO, BlockEntity::HeatMachine(HeatMachine::default()));
        world.place(IVec3::X, BlockEntity::Conduit(ConduitNode::new()));

        assert!(world
            .capabilities(IVec3::ZERO, Direction::East)
            .contains(Capabilities::HEAT));
        let heated = world
            .get_mut(IVec3::ZERO)
            .and_then(BlockEntity::heat_mut)
            .map(|heat| {
                heat.give_heat(10, false);
                heat.temperature()
            });
        assert_eq!(heated, Some(71));
        assert!(world.get_mut(IVec3::X).and_then(BlockEntity::heat_mut).is_none());
    }

    #[test]
    fn test_conduit_positions_sorted() {
        let mut world = EnergyWorld::new();
        for pos in [IVec3::new(3, 1, 0), IVec3::new(0, 0, 2), IVec3::new(1, 0, 0)] {
            world.place(pos, BlockEntity::Conduit(ConduitNode::new()));
        }
        assert_eq!(
            world.conduit_positions(),
            vec![IVec3::new(1, 0, 0), IVec3::new(0, 0, 2), IVec3::new(3, 1, 0)]
        );
    }

    #[test]
    fn test_snapshot_and_replication() {
        let mut world = EnergyWorld::new();
        world.place(IVec3::ZERO, BlockEntity::Conduit(ConduitNode::with_stored(90)));
        world.place(IVec3::X, BlockEntity::Conduit(ConduitNode::new()));
        world.remove(IVec3::X);

        let payloads = world.replication_payloads();
        assert_eq!(payloads.len(), 1);
        assert_eq!(payloads[0].0, IVec3::ZERO);

        let record = world.snapshot(IVec3::ZERO).unwrap_or_default();
        let mut other = EnergyWorld::new();
        other.place(IVec3::ZERO, BlockEntity::Conduit(ConduitNode::new()));
        assert!(other.apply_snapshot(IVec3::ZERO, &record));
        assert_eq!(other.total_stored(), 90);
        assert!(!other.apply_snapshot(IVec3::Y, &record));

        world.clear_changes();
        assert!(world.replication_payloads().is_empty());
    }

    #[test]
    fn test_toggle_lever() {
        let mut world = EnergyWorld::new();
        world.place(IVec3::ZERO, BlockEntity::Lever(Lever::default()));
        assert_eq!(world.toggle(IVec3::ZERO), Some(true));
        assert_eq!(world.toggle(IVec3::ZERO), Some(false));
        assert_eq!(world.toggle(IVec3::X), None);
    }
}
