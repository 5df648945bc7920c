//! 能量能力接口
//!
//! 任意方块都可能暴露持有者/生产者/消费者角色中的若干个。
//! 跨节点修改只能走这里的 give/take 调用，不直接改字段

use bevy::prelude::*;

use crate::voxel::direction::Direction;
use crate::voxel::flags::Capabilities;

/// 可报告存储量
pub trait EnergyHolder {
    fn stored_power(&self) -> i64;
    fn capacity(&self) -> i64;
}

/// 可被注入能量
pub trait EnergyConsumer {
    /// 返回实际接收量，`simulate` 为 true 时不修改状态
    fn give_power(&mut self, amount: i64, simulate: bool) -> i64;
}

/// 可被抽取能量
pub trait EnergyProducer {
    /// 返回实际移除量，`simulate` 为 true 时不修改状态
    fn take_power(&mut self, amount: i64, simulate: bool) -> i64;
}

/// 热量角色
pub trait HeatHolder {
    fn temperature(&self) -> i64;
    fn melting_point(&self) -> i64;
    fn give_heat(&mut self, amount: i64, simulate: bool) -> i64;
    fn take_heat(&mut self, amount: i64, simulate: bool) -> i64;
}

/// 能力查询
///
/// 由宿主实现（见 `EnergyWorld`），模拟核心只通过它访问邻居。
/// `side` 是被查询方块上朝向调用者的那一面
pub trait CapabilityResolver {
    /// pos 处方块在 side 面暴露的全部角色
    fn capabilities(&self, pos: IVec3, side: Direction) -> Capabilities;

    /// pos 处是否为导线
    fn is_conductor(&self, pos: IVec3) -> bool;

    /// pos 处是否为可交互开关
    fn is_switch(&self, pos: IVec3) -> bool;

    fn holder(&self, pos: IVec3, side: Direction) -> Option<&dyn EnergyHolder>;

    fn consumer_mut(&mut self, pos: IVec3, side: Direction) -> Option<&mut dyn EnergyConsumer>;

    fn producer_mut(&mut self, pos: IVec3, side: Direction) -> Option<&mut dyn EnergyProducer>;

    /// 读取存储量的便捷方法
    fn stored_at(&self, pos: IVec3, side: Direction) -> Option<i64> {
        self.holder(pos, side).map(|h| h.stored_power())
    }
}
