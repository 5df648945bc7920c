//! 热机
//!
//! 与焦耳容器相同的储能逻辑，外加温度与熔点。
//! 热量交换目前是占位实现：每次调用固定移动 `HEAT_TRANSFER_UNIT`

use super::capability::HeatHolder;
use super::container::EnergyContainer;
use crate::voxel::constants::{
    DEFAULT_CAPACITY, DEFAULT_MELTING_POINT, DEFAULT_TEMPERATURE, DEFAULT_TRANSFER_RATE,
    HEAT_TRANSFER_UNIT,
};
use crate::voxel::record::Record;

pub const KEY_TEMPERATURE: &str = "heat-temperature";
pub const KEY_MELTING_POINT: &str = "heat-melting-point";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeatMachine {
    pub container: EnergyContainer,
    temperature: i64,
    melting_point: i64,
}

impl Default for HeatMachine {
    fn default() -> Self {
        Self::new(
            EnergyContainer::new(DEFAULT_CAPACITY, DEFAULT_TRANSFER_RATE, DEFAULT_TRANSFER_RATE),
            DEFAULT_TEMPERATURE,
            DEFAULT_MELTING_POINT,
        )
    }
}

impl HeatMachine {
    pub fn new(container: EnergyContainer, temperature: i64, melting_point: i64) -> Self {
        Self {
            container,
            temperature,
            melting_point,
        }
    }

    /// 容器键与热量键写在同一层
    pub fn to_record(&self) -> Record {
        let mut record = self.container.to_record();
        record.set_int(KEY_TEMPERATURE, self.temperature);
        record.set_int(KEY_MELTING_POINT, self.melting_point);
        record
    }

    pub fn load_record(&mut self, record: &Record) {
        self.container.load_record(record);
        if let Some(temperature) = record.get_int(KEY_TEMPERATURE) {
            self.temperature = temperature;
        }
        if let Some(melting_point) = record.get_int(KEY_MELTING_POINT) {
            self.melting_point = melting_point;
        }
    }

    pub fn from_record(record: &Record) -> Self {
        let mut machine = Self::default();
        machine.load_record(record);
        machine
    }
}

impl HeatHolder for HeatMachine {
    fn temperature(&self) -> i64 {
        self.temperature
    }

    fn melting_point(&self) -> i64 {
        self.melting_point
    }

    // TODO: 按温差与速率计算热流，替换固定单位
    fn give_heat(&mut self, _amount: i64, simulate: bool) -> i64 {
        if !simulate {
            self.temperature = self.temperature.saturating_add(HEAT_TRANSFER_UNIT);
        }
        HEAT_TRANSFER_UNIT
    }

    fn take_heat(&mut self, _amount: i64, simulate: bool) -> i64 {
        if !simulate {
            self.temperature = self.temperature.saturating_sub(HEAT_TRANSFER_UNIT);
        }
        HEAT_TRANSFER_UNIT
    }
}
