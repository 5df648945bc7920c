/// 领域模块系统
///
/// 每个领域（Domain）代表一条物理/属性线：
/// - energy: 焦耳能量（储存、传导）与热量
/// - command: 方块编辑命令

use bevy::prelude::*;

pub mod command;
pub mod energy;

/// 模拟系统执行顺序
///
/// 所有领域系统必须注册到指定的 SystemSet 中，禁止跨阶段写入
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    /// 1. 外部输入（放置、移除、交互）
    ///
    /// 在这个阶段，排队的方块编辑被提交，并触发邻居通知
    ExternalActions,

    /// 2. 场更新（产能、传导）
    ///
    /// 在这个阶段，电堆产能，导线向邻居均衡能量
    FieldUpdate,

    /// 3. 后处理（统计、清理变更日志）
    Post,
}

/// 领域系统插件
///
/// 配置所有领域相关的系统执行顺序
pub struct DomainPlugin;

impl Plugin for DomainPlugin {
    fn build(&self, app: &mut App) {
        app
            // 配置系统集顺序
            .configure_sets(
                FixedUpdate,
                (
                    SimulationSet::ExternalActions,
                    SimulationSet::FieldUpdate,
                    SimulationSet::Post,
                )
                    .chain(),
            )
            .init_resource::<command::BlockEdits>()
            // 添加提交系统
            .add_systems(
                FixedUpdate,
                command::commit_edits_system.in_set(SimulationSet::ExternalActions),
            )
            // 清理变更日志（同步负载应在此之前取走）
            .add_systems(
                FixedUpdate,
                cleanup_changes_system
                    .in_set(SimulationSet::Post)
                    .after(energy::systems::energy_summary_system),
            )
            .add_plugins(energy::EnergyPlugin);
    }
}

/// 清理变更日志系统
///
/// Post 阶段最后执行；读取 `replication_payloads` 的系统需排在它之前
pub fn cleanup_changes_system(mut world: ResMut<crate::voxel::EnergyWorld>) {
    if !world.changes.is_empty() {
        debug!("Clearing {} block changes", world.changes.len());
        world.clear_changes();
    }
}
