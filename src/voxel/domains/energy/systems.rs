//! 能量传导系统
//!
//! 在 FieldUpdate 阶段执行：电堆产能并推送，随后每根导线执行一次传导

use bevy::prelude::*;

use super::api::{EnergyApi, TransferReport};
use crate::voxel::config::EnergyConfig;
use crate::voxel::constants::SUMMARY_INTERVAL;
use crate::voxel::domains::SimulationSet;
use crate::voxel::world::{BlockEntity, EnergyWorld};

/// 已执行的模拟 tick 数
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TickCounter(pub u64);

/// 本 tick 的网络统计
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct EnergyStats {
    /// 电堆本 tick 产能
    pub generated: i64,
    /// 电堆推送量
    pub emitted: TransferReport,
    /// 导线间转移量
    pub conducted: TransferReport,
}

/// 电堆系统
///
/// 先产能再向相邻导线推送，这是网络总量唯一的增加来源
pub fn pile_generation_system(mut world: ResMut<EnergyWorld>, mut stats: ResMut<EnergyStats>) {
    stats.generated = 0;
    stats.emitted = TransferReport::default();

    for pos in world.pile_positions() {
        if let Some(BlockEntity::VoltaicPile(pile)) = world.get_mut(pos) {
            stats.generated += pile.generate();
        }
        let report = EnergyApi::emit(&mut *world, pos);
        stats.emitted.merge(report);
    }
}

/// 传导系统
///
/// 按 (y, z, x) 顺序依次更新每根导线。后更新的导线能看到
/// 本 tick 已被更新过的邻居状态
pub fn conduction_system(
    mut world: ResMut<EnergyWorld>,
    config: Res<EnergyConfig>,
    mut stats: ResMut<EnergyStats>,
) {
    stats.conducted = TransferReport::default();

    for pos in world.conduit_positions() {
        let report = EnergyApi::conduct(&mut *world, pos, config.step_cap);
        stats.conducted.merge(report);
    }
}

/// 统计日志系统
pub fn energy_summary_system(
    world: Res<EnergyWorld>,
    stats: Res<EnergyStats>,
    mut tick: ResMut<TickCounter>,
) {
    tick.0 += 1;
    if !tick.0.is_multiple_of(SUMMARY_INTERVAL) {
        return;
    }

    info!(
        "Energy tick {}: blocks={} conduits={} stored={}J generated={}J conducted={}J over {} links",
        tick.0,
        world.blocks.len(),
        world.conduit_positions().len(),
        world.total_stored(),
        stats.generated,
        stats.conducted.moved,
        stats.conducted.transfers
    );
}

/// 能量插件
pub struct EnergyPlugin;

impl Plugin for EnergyPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TickCounter>()
            .init_resource::<EnergyStats>()
            .add_systems(
                FixedUpdate,
                (pile_generation_system, conduction_system)
                    .chain()
                    .in_set(SimulationSet::FieldUpdate),
            )
            .add_systems(
                FixedUpdate,
                energy_summary_system.in_set(SimulationSet::Post),
            );
    }
}
