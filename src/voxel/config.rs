//! 运行时配置

use bevy::prelude::*;

use crate::voxel::constants::CONDUCTION_STEP_CAP;

/// 默认运行 tick 数（无头驱动）
pub const DEFAULT_TICKS: u64 = 200;

/// 能量模拟配置
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnergyConfig {
    /// 导线每 tick 向单个邻居推送的上限
    pub step_cap: i64,
    /// 无头驱动运行的 tick 数
    pub ticks: u64,
}

impl Default for EnergyConfig {
    fn default() -> Self {
        Self {
            step_cap: CONDUCTION_STEP_CAP,
            ticks: DEFAULT_TICKS,
        }
    }
}

impl EnergyConfig {
    /// 依次读取命令行参数与环境变量，命令行优先
    ///
    /// - `--ticks <n>` / `-t <n>` 或 `VOLTAICS_TICKS`
    /// - `--step-cap <n>` 或 `VOLTAICS_STEP_CAP`
    ///
    /// 无法解析的值忽略并保留默认值
    pub fn from_sources(args: &[String], env: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(ticks) = flag_value(args, &["--ticks", "-t"])
            .or_else(|| env("VOLTAICS_TICKS"))
            .and_then(|s| parse_or_warn::<u64>("ticks", &s))
        {
            config.ticks = ticks;
        }

        if let Some(cap) = flag_value(args, &["--step-cap"])
            .or_else(|| env("VOLTAICS_STEP_CAP"))
            .and_then(|s| parse_or_warn::<i64>("step cap", &s))
        {
            config.step_cap = cap.max(0);
        }

        config
    }
}

fn flag_value(args: &[String], names: &[&str]) -> Option<String> {
    args.windows(2)
        .find(|pair| names.contains(&pair[0].as_str()))
        .map(|pair| pair[1].clone())
}

fn parse_or_warn<T: std::str::FromStr>(what: &str, value: &str) -> Option<T> {
    match value.parse::<T>() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!("Ignoring invalid {} value: {}", what, value);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_defaults() {
        let config = EnergyConfig::from_sources(&[], |_| None);
        assert_eq!(config, EnergyConfig::default());
        assert_eq!(config.step_cap, 50);
    }

    #[test]
    fn test_args_override_env() {
        let config = EnergyConfig::from_sources(
            &args(&["voltaics", "-t", "40", "--step-cap", "25"]),
            |key| (key == "VOLTAICS_TICKS").then(|| "999".to_string()),
        );
        assert_eq!(config.ticks, 40);
        assert_eq!(config.step_cap, 25);
    }

    #[test]
    fn test_env_and_invalid_values() {
        let config = EnergyConfig::from_sources(&args(&["voltaics", "--ticks", "many"]), |key| {
            (key == "VOLTAICS_STEP_CAP").then(|| "10".to_string())
        });
        assert_eq!(config.ticks, DEFAULT_TICKS);
        assert_eq!(config.step_cap, 10);
    }
}
