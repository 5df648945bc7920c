/// 方块变更记录
///
/// 用于全量同步：记录本 tick 内需要向客户端重发快照的方块
use bevy::prelude::*;

/// 单个方块的变更操作
#[derive(Clone, Debug, PartialEq)]
pub enum BlockChange {
    /// 放置方块
    Placed { pos: IVec3 },

    /// 移除方块
    Removed { pos: IVec3 },

    /// 导线邻居分类变化
    Connections { pos: IVec3 },

    /// 外部状态变化（拉杆切换、快照覆盖）
    State { pos: IVec3 },
}

impl BlockChange {
    /// 获取影响的方块位置
    pub fn pos(&self) -> IVec3 {
        match self {
            BlockChange::Placed { pos } => *pos,
            BlockChange::Removed { pos } => *pos,
            BlockChange::Connections { pos } => *pos,
            BlockChange::State { pos } => *pos,
        }
    }

    /// 是否需要下发方块快照（移除只需通知宿主删除）
    pub fn needs_snapshot(&self) -> bool {
        !matches!(self, BlockChange::Removed { .. })
    }
}
