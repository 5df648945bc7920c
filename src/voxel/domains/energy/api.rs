//! 能量领域 API
//!
//! 传导规则与邻居分类。只通过 `CapabilityResolver` 访问方块，
//! 因此既能跑在 `EnergyWorld` 上，也能跑在测试夹具上

use bevy::prelude::*;

use super::capability::CapabilityResolver;
use super::conduit::ConnectionKind;
use crate::voxel::change::BlockChange;
use crate::voxel::direction::Direction;
use crate::voxel::world::EnergyWorld;

/// 单次传导的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TransferReport {
    /// 发生转移的方向数
    pub transfers: u32,
    /// 转移总量
    pub moved: i64,
}

impl TransferReport {
    fn record(&mut self, moved: i64) {
        if moved > 0 {
            self.transfers += 1;
            self.moved += moved;
        }
    }

    pub fn merge(&mut self, other: TransferReport) {
        self.transfers += other.transfers;
        self.moved += other.moved;
    }
}

/// 能量领域 API
pub struct EnergyApi;

impl EnergyApi {
    /// 均衡转移量
    ///
    /// 仅当 `own > taker` 时转移：`target = (own + taker) / 2`，
    /// `desired = target - taker`，结果不超过 `step_cap`。
    /// 对非负输入 `desired == (own - taker) / 2`，这样写避免加法溢出
    pub fn equalizing_transfer(own: i64, taker: i64, step_cap: i64) -> Option<i64> {
        if own <= taker {
            return None;
        }
        let desired = own.saturating_sub(taker) / 2;
        let amount = desired.min(step_cap);
        (amount > 0).then_some(amount)
    }

    /// 导线每 tick 的传导步骤
    ///
    /// 按固定方向顺序扫描六个邻居，只与导线邻居均衡。
    /// 先 give 给邻居得到实际接收量，再从自身 take 同样的量，
    /// 因此网络总量不变
    pub fn conduct<R: CapabilityResolver>(
        resolver: &mut R,
        pos: IVec3,
        step_cap: i64,
    ) -> TransferReport {
        let mut report = TransferReport::default();

        for dir in Direction::ALL {
            let neighbor = dir.step(pos);
            let side = dir.opposite();
            if !resolver.is_conductor(neighbor) {
                continue;
            }
            let Some(taker_stored) = resolver.stored_at(neighbor, side) else {
                continue;
            };
            let Some(own_stored) = resolver.stored_at(pos, dir) else {
                return report;
            };
            let Some(amount) = Self::equalizing_transfer(own_stored, taker_stored, step_cap) else {
                continue;
            };

            // 自身输出速率低于上限时先收窄报价，保证扣除量等于接收量
            let offer = match resolver.producer_mut(pos, dir) {
                Some(producer) => producer.take_power(amount, true),
                None => return report,
            };
            let accepted = match resolver.consumer_mut(neighbor, side) {
                Some(consumer) => consumer.give_power(offer, false),
                None => continue,
            };
            let removed = match resolver.producer_mut(pos, dir) {
                Some(producer) => producer.take_power(accepted, false),
                None => 0,
            };
            report.record(removed);
        }

        report
    }

    /// 生产者向相邻导线推送能量，同样是先 give 后 take
    pub fn emit<R: CapabilityResolver>(resolver: &mut R, pos: IVec3) -> TransferReport {
        let mut report = TransferReport::default();

        for dir in Direction::ALL {
            let neighbor = dir.step(pos);
            let side = dir.opposite();
            if !resolver.is_conductor(neighbor) {
                continue;
            }
            let offer = match resolver.producer_mut(pos, dir) {
                Some(producer) => producer.take_power(i64::MAX, true),
                None => return report,
            };
            if offer <= 0 {
                break;
            }
            let accepted = match resolver.consumer_mut(neighbor, side) {
                Some(consumer) => consumer.give_power(offer, false),
                None => continue,
            };
            let removed = match resolver.producer_mut(pos, dir) {
                Some(producer) => producer.take_power(accepted, false),
                None => 0,
            };
            report.record(removed);
        }

        report
    }

    /// 对 pos 在 dir 方向的邻居进行分类
    pub fn classify<R: CapabilityResolver>(
        resolver: &R,
        pos: IVec3,
        dir: Direction,
    ) -> ConnectionKind {
        let neighbor = dir.step(pos);
        let side = dir.opposite();

        if resolver.is_conductor(neighbor) {
            ConnectionKind::Conduit
        } else if resolver.is_switch(neighbor) {
            ConnectionKind::Switch
        } else if resolver.capabilities(neighbor, side).has_energy_role() {
            ConnectionKind::Terminal
        } else {
            ConnectionKind::None
        }
    }

    /// 重新计算 pos 处导线的六个分类；pos 不是导线时什么都不做。
    /// 返回分类是否变化
    pub fn refresh_connections(world: &mut EnergyWorld, pos: IVec3) -> bool {
        if !world.is_conductor(pos) {
            return false;
        }

        let kinds = Direction::ALL.map(|dir| Self::classify(&*world, pos, dir));

        let Some(node) = world.conduit_mut(pos) else {
            return false;
        };
        let mut changed = false;
        for (dir, kind) in Direction::ALL.into_iter().zip(kinds) {
            changed |= node.set_connection(dir, kind);
        }

        if changed {
            world.changes.push(BlockChange::Connections { pos });
        }
        changed
    }
}
