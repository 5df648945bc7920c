//! 焦耳容器
//!
//! 带容量上限与单次输入/输出速率上限的能量储槽，是网络运算的最小单元。
//! 所有边界都通过截断实现，任何输入都不会报错

use serde::{Deserialize, Serialize};

use super::capability::{EnergyConsumer, EnergyHolder, EnergyProducer};
use crate::voxel::constants::{DEFAULT_CAPACITY, DEFAULT_TRANSFER_RATE};
use crate::voxel::record::Record;

pub const KEY_STORED: &str = "stored-power";
pub const KEY_CAPACITY: &str = "capacity";
pub const KEY_INPUT_RATE: &str = "input-rate";
pub const KEY_OUTPUT_RATE: &str = "output-rate";

/// 焦耳容器
///
/// 不变式：`0 <= stored <= capacity`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnergyContainer {
    /// 当前存储量
    stored: i64,
    /// 最大存储量
    capacity: i64,
    /// 单次最多接收
    input_rate: i64,
    /// 单次最多输出
    output_rate: i64,
}

impl Default for EnergyContainer {
    /// 容量 5000，速率 50/50，空
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY, DEFAULT_TRANSFER_RATE, DEFAULT_TRANSFER_RATE)
    }
}

impl EnergyContainer {
    /// 创建空容器
    pub fn new(capacity: i64, input_rate: i64, output_rate: i64) -> Self {
        Self::with_stored(0, capacity, input_rate, output_rate)
    }

    /// 创建带初始存储量的容器，初始值会被截断到 `[0, capacity]`
    pub fn with_stored(stored: i64, capacity: i64, input_rate: i64, output_rate: i64) -> Self {
        let capacity = capacity.max(0);
        Self {
            stored: stored.clamp(0, capacity),
            capacity,
            input_rate: input_rate.max(0),
            output_rate: output_rate.max(0),
        }
    }

    /// 从记录创建：先取默认值，再用记录中存在的键覆盖
    pub fn from_record(record: &Record) -> Self {
        let mut container = Self::default();
        container.load_record(record);
        container
    }

    pub fn stored(&self) -> i64 {
        self.stored
    }

    pub fn capacity(&self) -> i64 {
        self.capacity
    }

    pub fn input_rate(&self) -> i64 {
        self.input_rate
    }

    pub fn output_rate(&self) -> i64 {
        self.output_rate
    }

    /// 剩余空间
    pub fn free_space(&self) -> i64 {
        self.capacity - self.stored
    }

    /// 注入能量，返回实际接收量
    ///
    /// `accepted = min(capacity - stored, input_rate, amount)`，
    /// `simulate` 为 true 时只计算不修改
    pub fn give(&mut self, amount: i64, simulate: bool) -> i64 {
        let accepted = self.free_space().min(self.input_rate).min(amount).max(0);
        if !simulate {
            self.stored += accepted;
        }
        accepted
    }

    /// 抽取能量，返回实际移除量
    ///
    /// `removed = min(stored, output_rate, amount)`
    pub fn take(&mut self, amount: i64, simulate: bool) -> i64 {
        let removed = self.stored.min(self.output_rate).min(amount).max(0);
        if !simulate {
            self.stored -= removed;
        }
        removed
    }

    /// 设置容量，存储量超出时截断
    pub fn set_capacity(&mut self, capacity: i64) {
        self.capacity = capacity.max(0);
        if self.stored > self.capacity {
            self.stored = self.capacity;
        }
    }

    pub fn set_input_rate(&mut self, rate: i64) {
        self.input_rate = rate.max(0);
    }

    pub fn set_output_rate(&mut self, rate: i64) {
        self.output_rate = rate.max(0);
    }

    /// 同时设置输入与输出速率
    pub fn set_transfer_rate(&mut self, rate: i64) {
        self.set_input_rate(rate);
        self.set_output_rate(rate);
    }

    pub fn with_capacity(mut self, capacity: i64) -> Self {
        self.set_capacity(capacity);
        self
    }

    pub fn with_transfer_rate(mut self, rate: i64) -> Self {
        self.set_transfer_rate(rate);
        self
    }

    /// 写出记录，四个键全部写入
    pub fn to_record(&self) -> Record {
        let mut record = Record::new();
        record.set_int(KEY_STORED, self.stored);
        record.set_int(KEY_CAPACITY, self.capacity);
        record.set_int(KEY_INPUT_RATE, self.input_rate);
        record.set_int(KEY_OUTPUT_RATE, self.output_rate);
        record
    }

    /// 读取记录
    ///
    /// - `stored-power` 缺失视为 0
    /// - 容量与速率缺失时保留当前值
    /// - 读取后存储量截断到 `[0, capacity]`
    pub fn load_record(&mut self, record: &Record) {
        self.stored = record.get_int(KEY_STORED).unwrap_or(0);

        if let Some(capacity) = record.get_int(KEY_CAPACITY) {
            self.capacity = capacity.max(0);
        }
        if let Some(rate) = record.get_int(KEY_INPUT_RATE) {
            self.input_rate = rate.max(0);
        }
        if let Some(rate) = record.get_int(KEY_OUTPUT_RATE) {
            self.output_rate = rate.max(0);
        }

        self.stored = self.stored.clamp(0, self.capacity);
    }
}

impl EnergyHolder for EnergyContainer {
    fn stored_power(&self) -> i64 {
        self.stored
    }

    fn capacity(&self) -> i64 {
        self.capacity
    }
}

impl EnergyConsumer for EnergyContainer {
    fn give_power(&mut self, amount: i64, simulate: bool) -> i64 {
        self.give(amount, simulate)
    }
}

impl EnergyProducer for EnergyContainer {
    fn take_power(&mut self, amount: i64, simulate: bool) -> i64 {
        self.take(amount, simulate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_bounds(container: &EnergyContainer) {
        assert!(container.stored() >= 0);
        assert!(container.stored() <= container.capacity());
    }

    #[test]
    fn test_default_bounds() {
        let container = EnergyContainer::default();
        assert_eq!(container.stored(), 0);
        assert_eq!(container.capacity(), 5000);
        assert_eq!(container.input_rate(), 50);
        assert_eq!(container.output_rate(), 50);
    }

    #[test]
    fn test_give_limited_by_rate_and_space() {
        let mut container = EnergyContainer::with_stored(230, 250, 50, 50);

        // 剩余空间 20 < 速率 50
        assert_eq!(container.give(100, false), 20);
        assert_eq!(container.stored(), 250);

        // 已满
        assert_eq!(container.give(100, false), 0);
        assert_bounds(&container);

        let mut empty = EnergyContainer::new(250, 50, 50);
        assert_eq!(empty.give(100, false), 50);
        assert_eq!(empty.give(10, false), 10);
        assert_eq!(empty.stored(), 60);
    }

    #[test]
    fn test_take_limited_by_rate_and_stored() {
        let mut container = EnergyContainer::with_stored(30, 250, 50, 50);
        assert_eq!(container.take(100, false), 30);
        assert_eq!(container.stored(), 0);
        assert_eq!(container.take(100, false), 0);

        let mut full = EnergyContainer::with_stored(250, 250, 50, 50);
        assert_eq!(full.take(100, false), 50);
        assert_eq!(full.stored(), 200);
    }

    #[test]
    fn test_simulate_does_not_mutate() {
        let mut container = EnergyContainer::with_stored(100, 250, 50, 40);

        let simulated = container.give(70, true);
        assert_eq!(container.stored(), 100);
        let real = container.give(70, false);
        assert_eq!(simulated, real);
        assert_eq!(container.stored(), 150);

        let simulated = container.take(70, true);
        assert_eq!(container.stored(), 150);
        let real = container.take(70, false);
        assert_eq!(simulated, real);
        assert_eq!(container.stored(), 110);
    }

    #[test]
    fn test_negative_amounts_move_nothing() {
        let mut container = EnergyContainer::with_stored(100, 250, 50, 50);
        assert_eq!(container.give(-20, false), 0);
        assert_eq!(container.take(-20, false), 0);
        assert_eq!(container.stored(), 100);
    }

    #[test]
    fn test_bounds_hold_across_mixed_calls() {
        let mut container = EnergyContainer::new(120, 35, 25);
        for amount in [0, 1, 7, 50, 200, i64::MAX, -5] {
            container.give(amount, false);
            assert_bounds(&container);
            container.take(amount / 2, false);
            assert_bounds(&container);
        }
    }

    #[test]
    fn test_set_capacity_clamps_stored() {
        let mut container = EnergyContainer::with_stored(80, 100, 50, 50);
        container.set_capacity(50);
        assert_eq!(container.capacity(), 50);
        assert_eq!(container.stored(), 50);

        // 扩容不影响存储量
        container.set_capacity(500);
        assert_eq!(container.stored(), 50);
    }

    #[test]
    fn test_rate_setters() {
        let mut container = EnergyContainer::with_stored(80, 100, 50, 50);
        container.set_input_rate(10);
        assert_eq!(container.input_rate(), 10);
        assert_eq!(container.output_rate(), 50);

        container.set_transfer_rate(5);
        assert_eq!(container.input_rate(), 5);
        assert_eq!(container.output_rate(), 5);
        assert_eq!(container.stored(), 80);
        assert_eq!(container.capacity(), 100);
    }

    #[test]
    fn test_with_stored_clamps() {
        let container = EnergyContainer::with_stored(9999, 100, 50, 50);
        assert_eq!(container.stored(), 100);
        let container = EnergyContainer::with_stored(-3, 100, 50, 50);
        assert_eq!(container.stored(), 0);
    }

    #[test]
    fn test_record_round_trip() {
        let container = EnergyContainer::with_stored(120, 250, 30, 40);
        let restored = EnergyContainer::from_record(&container.to_record());
        assert_eq!(restored, container);
    }

    #[test]
    fn test_load_without_bounds_clamps_to_current_capacity() {
        let mut container = EnergyContainer::new(100, 50, 50);
        let mut record = Record::new();
        record.set_int(KEY_STORED, 9999);

        container.load_record(&record);
        assert_eq!(container.capacity(), 100);
        assert_eq!(container.stored(), 100);
        assert_eq!(container.input_rate(), 50);
    }

    #[test]
    fn test_load_missing_stored_reads_zero() {
        let mut container = EnergyContainer::with_stored(60, 100, 50, 50);
        let mut record = Record::new();
        record.set_int(KEY_CAPACITY, 80);

        container.load_record(&record);
        assert_eq!(container.stored(), 0);
        assert_eq!(container.capacity(), 80);
    }

    #[test]
    fn test_load_negative_stored_clamps_to_zero() {
        let mut record = Record::new();
        record.set_int(KEY_STORED, -40);
        let container = EnergyContainer::from_record(&record);
        assert_eq!(container.stored(), 0);
    }

    #[test]
    fn test_with_capacity_clamps_stored_when_shrinking() {
        let container = EnergyContainer::with_stored(80, 100, 50, 50).with_capacity(50);
        assert_eq!(container.capacity(), 50);
        assert_eq!(container.stored(), 50);

        let grown = container.with_capacity(400);
        assert_eq!(grown.capacity(), 400);
        assert_eq!(grown.stored(), 50);
    }

    #[test]
    fn test_with_transfer_rate_sets_both_rates() {
        let container = EnergyContainer::default().with_transfer_rate(7);
        assert_eq!(container.input_rate(), 7);
        assert_eq!(container.output_rate(), 7);
        assert_eq!(container.capacity(), 5000);

        let clamped = container.with_transfer_rate(-3);
        assert_eq!(clamped.input_rate(), 0);
        assert_eq!(clamped.output_rate(), 0);
    }
}
