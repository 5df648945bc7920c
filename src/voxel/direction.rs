//! 六方向定义
//!
//! 固定的枚举顺序决定了导线扫描邻居的顺序：下、上、北、南、西、东

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// 网格方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Direction {
    Down,
    Up,
    #[default]
    North,
    South,
    West,
    East,
}

impl Direction {
    /// 所有方向，按扫描顺序排列
    pub const ALL: [Direction; 6] = [
        Direction::Down,
        Direction::Up,
        Direction::North,
        Direction::South,
        Direction::West,
        Direction::East,
    ];

    /// 水平方向（伏打电堆朝向）
    pub const HORIZONTAL: [Direction; 4] = [
        Direction::South,
        Direction::West,
        Direction::North,
        Direction::East,
    ];

    /// 单位偏移（北为 -Z，东为 +X）
    pub fn offset(self) -> IVec3 {
        match self {
            Direction::Down => IVec3::NEG_Y,
            Direction::Up => IVec3::Y,
            Direction::North => IVec3::NEG_Z,
            Direction::South => IVec3::Z,
            Direction::West => IVec3::NEG_X,
            Direction::East => IVec3::X,
        }
    }

    /// 相反方向
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Down => Direction::Up,
            Direction::Up => Direction::Down,
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
            Direction::East => Direction::West,
        }
    }

    /// 从 pos 沿该方向走一格
    pub fn step(self, pos: IVec3) -> IVec3 {
        pos + self.offset()
    }

    /// 在 ALL 中的序号
    pub fn index(self) -> usize {
        match self {
            Direction::Down => 0,
            Direction::Up => 1,
            Direction::North => 2,
            Direction::South => 3,
            Direction::West => 4,
            Direction::East => 5,
        }
    }

    /// 记录中使用的键名
    pub fn key(self) -> &'static str {
        match self {
            Direction::Down => "down",
            Direction::Up => "up",
            Direction::North => "north",
            Direction::South => "south",
            Direction::West => "west",
            Direction::East => "east",
        }
    }

    /// 水平方向序号（用于持久化朝向），垂直方向返回 None
    pub fn horizontal_index(self) -> Option<i64> {
        Self::HORIZONTAL
            .iter()
            .position(|&d| d == self)
            .map(|i| i as i64)
    }

    /// 从水平序号还原，越界时取模
    pub fn from_horizontal_index(index: i64) -> Direction {
        Self::HORIZONTAL[index.rem_euclid(4) as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_offsets_cancel() {
        for dir in Direction::ALL {
            assert_eq!(dir.offset() + dir.opposite().offset(), IVec3::ZERO);
            assert_eq!(dir.opposite().opposite(), dir);
        }
    }

    #[test]
    fn test_index_matches_order() {
        for (i, dir) in Direction::ALL.iter().enumerate() {
            assert_eq!(dir.index(), i);
        }
    }

    #[test]
    fn test_horizontal_index() {
        assert_eq!(Direction::Up.horizontal_index(), None);
        assert_eq!(Direction::North.horizontal_index(), Some(2));
        assert_eq!(Direction::from_horizontal_index(2), Direction::North);
        assert_eq!(Direction::from_horizontal_index(-1), Direction::East);
    }
}
