//! 能量系统插件

use bevy::prelude::*;

use crate::voxel::config::EnergyConfig;
use crate::voxel::domains::DomainPlugin;
use crate::voxel::world::EnergyWorld;

/// 能量系统插件 - 负责注册能量世界资源和领域系统
///
/// 只注册 FixedUpdate 中的系统，tick 由宿主驱动
pub struct VoltaicsPlugin;

impl Plugin for VoltaicsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<EnergyWorld>()
            .init_resource::<EnergyConfig>()
            // 注册领域系统（编辑提交、产能、传导）
            .add_plugins(DomainPlugin);
    }
}
