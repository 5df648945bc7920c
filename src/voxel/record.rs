//! 扁平键值记录
//!
//! 存档与全量同步共用的记录格式。宿主负责外层封装，这里只提供读写：
//! 读取时"存在就用，不存在就保留当前值"，永不失败

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 记录中的值
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordValue {
    Int(i64),
    Record(Record),
}

/// 扁平键值记录，可嵌套子记录
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    entries: BTreeMap<String, RecordValue>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn set_int(&mut self, key: &str, value: i64) {
        self.entries.insert(key.to_string(), RecordValue::Int(value));
    }

    /// 读取整数，键不存在或类型不符时返回 None
    pub fn get_int(&self, key: &str) -> Option<i64> {
        match self.entries.get(key) {
            Some(RecordValue::Int(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn set_record(&mut self, key: &str, record: Record) {
        self.entries
            .insert(key.to_string(), RecordValue::Record(record));
    }

    pub fn get_record(&self, key: &str) -> Option<&Record> {
        match self.entries.get(key) {
            Some(RecordValue::Record(r)) => Some(r),
            _ => None,
        }
    }

    /// 编码为同步用的字节负载
    pub fn to_bytes(&self) -> Vec<u8> {
        // BTreeMap<String, _> 的序列化不会失败
        serde_json::to_vec(self).unwrap_or_default()
    }

    /// 从字节负载解码，失败时记录警告并返回空记录
    pub fn from_bytes(bytes: &[u8]) -> Record {
        match serde_json::from_slice(bytes) {
            Ok(record) => record,
            Err(e) => {
                warn!(
                    "Record: failed to decode {} bytes, falling back to empty record: {}",
                    bytes.len(),
                    e
                );
                Record::default()
            }
        }
    }
}
