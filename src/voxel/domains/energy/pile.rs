//! 终端方块：伏打电堆与拉杆

use super::conduit::KEY_CONTAINER;
use super::container::EnergyContainer;
use crate::voxel::constants::{PILE_CAPACITY, PILE_GENERATION};
use crate::voxel::direction::Direction;
use crate::voxel::record::Record;

pub const KEY_GENERATION: &str = "generation";
pub const KEY_FACING: &str = "facing";
pub const KEY_ON: &str = "on";

/// 伏打电堆
///
/// 每 tick 向自身容器产能，再推给相邻导线。输入速率即产能上限
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoltaicPile {
    pub container: EnergyContainer,
    /// 每 tick 产能
    pub generation: i64,
    /// 水平朝向（放置者朝向的反方向）
    pub facing: Direction,
}

impl Default for VoltaicPile {
    fn default() -> Self {
        Self::new(Direction::North)
    }
}

impl VoltaicPile {
    pub fn new(facing: Direction) -> Self {
        // 垂直朝向不合法，退回北
        let facing = if facing.horizontal_index().is_some() {
            facing
        } else {
            Direction::North
        };
        Self {
            container: EnergyContainer::default()
                .with_capacity(PILE_CAPACITY)
                .with_transfer_rate(PILE_GENERATION),
            generation: PILE_GENERATION,
            facing,
        }
    }

    /// 产能，返回实际入账量
    pub fn generate(&mut self) -> i64 {
        self.container.give(self.generation, false)
    }

    pub fn to_record(&self) -> Record {
        let mut record = Record::new();
        record.set_record(KEY_CONTAINER, self.container.to_record());
        record.set_int(KEY_GENERATION, self.generation);
        // new() 保证朝向为水平方向
        record.set_int(KEY_FACING, self.facing.horizontal_index().unwrap_or(2));
        record
    }

    pub fn load_record(&mut self, record: &Record) {
        if let Some(sub) = record.get_record(KEY_CONTAINER) {
            self.container.load_record(sub);
        }
        if let Some(generation) = record.get_int(KEY_GENERATION) {
            self.generation = generation.max(0);
        }
        if let Some(facing) = record.get_int(KEY_FACING) {
            self.facing = Direction::from_horizontal_index(facing);
        }
    }

    pub fn from_record(record: &Record) -> Self {
        let mut pile = Self::default();
        pile.load_record(record);
        pile
    }
}

/// 拉杆，导线将其归类为 Switch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Lever {
    pub on: bool,
}

impl Lever {
    pub fn toggle(&mut self) -> bool {
        self.on = !self.on;
        self.on
    }

    pub fn to_record(&self) -> Record {
        let mut record = Record::new();
        record.set_int(KEY_ON, i64::from(self.on));
        record
    }

    pub fn load_record(&mut self, record: &Record) {
        if let Some(on) = record.get_int(KEY_ON) {
            self.on = on != 0;
        }
    }
}
