/// 能量能力标志位
///
/// 使用 bitflags 描述方块对外暴露的能量角色，能力查询一次返回全部角色
use bitflags::bitflags;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Capabilities: u8 {
        const NONE = 0;

        /// 可查询存储量
        const HOLDER = 1 << 0;
        /// 可被抽取能量（take）
        const PRODUCER = 1 << 1;
        /// 可被注入能量（give）
        const CONSUMER = 1 << 2;
        /// 可交换热量
        const HEAT = 1 << 3;

        /// 导线与热机：持有、输出、输入
        const STORAGE = Self::HOLDER.bits() | Self::PRODUCER.bits() | Self::CONSUMER.bits();
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::NONE
    }
}

impl Capabilities {
    /// 是否暴露任一能量角色（热量不计）
    pub fn has_energy_role(self) -> bool {
        self.intersects(Self::STORAGE)
    }
}
