/// 方块编辑命令
///
/// 宿主的世界编辑（放置、移除、交互）统一排队，
/// 在 ExternalActions 阶段提交，提交时触发邻居通知
use bevy::prelude::*;

use crate::voxel::world::{BlockEntity, EnergyWorld};

/// 单条编辑命令
#[derive(Clone, Debug)]
pub enum BlockEdit {
    /// 放置方块（替换原有方块）
    Place { pos: IVec3, block: BlockEntity },

    /// 移除方块
    Remove { pos: IVec3 },

    /// 切换拉杆
    Toggle { pos: IVec3 },
}

impl BlockEdit {
    /// 获取命令影响的方块位置
    pub fn pos(&self) -> IVec3 {
        match self {
            BlockEdit::Place { pos, .. } => *pos,
            BlockEdit::Remove { pos } => *pos,
            BlockEdit::Toggle { pos } => *pos,
        }
    }
}

/// 编辑队列
#[derive(Resource, Default)]
pub struct BlockEdits {
    pub edits: Vec<BlockEdit>,
}

impl BlockEdits {
    pub fn push(&mut self, edit: BlockEdit) {
        self.edits.push(edit);
    }

    pub fn place(&mut self, pos: IVec3, block: BlockEntity) {
        self.push(BlockEdit::Place { pos, block });
    }

    pub fn remove(&mut self, pos: IVec3) {
        self.push(BlockEdit::Remove { pos });
    }
}

/// 提交系统
///
/// 按提交顺序执行，同一位置的多条命令依次生效
pub fn commit_edits_system(mut world: ResMut<EnergyWorld>, mut edits: ResMut<BlockEdits>) {
    let edits = std::mem::take(&mut edits.edits);
    if edits.is_empty() {
        return;
    }

    for edit in edits {
        apply_edit(&mut world, edit);
    }
}

/// 在世界上执行单条命令
pub fn apply_edit(world: &mut EnergyWorld, edit: BlockEdit) {
    match edit {
        BlockEdit::Place { pos, block } => {
            world.place(pos, block);
        }
        BlockEdit::Remove { pos } => {
            if world.remove(pos).is_none() {
                debug!("Remove ignored, no block at {:?}", pos);
            }
        }
        BlockEdit::Toggle { pos } => match world.toggle(pos) {
            Some(on) => debug!("Lever at {:?} is now {}", pos, if on { "on" } else { "off" }),
            None => debug!("Toggle ignored, no lever at {:?}", pos),
        },
    }
}
