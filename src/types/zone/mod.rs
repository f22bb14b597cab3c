//! 时区值类型
//!
//! 统一表示命名时区（IANA 数据库）和固定 UTC 偏移两种形式

use chrono::FixedOffset;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// 时区值
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZoneSpec {
    /// 命名时区，如 "Asia/Shanghai"
    Named(Tz),
    /// 固定 UTC 偏移（秒，东为正）
    Fixed(i32),
}

impl ZoneSpec {
    /// 按名称查找命名时区
    pub fn by_name(name: &str) -> Option<Self> {
        name.parse::<Tz>().ok().map(ZoneSpec::Named)
    }

    /// 按 UTC 偏移小时数构造固定偏移时区
    ///
    /// 偏移超出 ±14 小时视为无效
    pub fn by_utc_offset_hours(hours: f64) -> Option<Self> {
        if !hours.is_finite() || hours.abs() > 14.0 {
            return None;
        }
        Some(ZoneSpec::Fixed((hours * 3600.0) as i32))
    }

    /// 按 UTC 偏移秒数构造固定偏移时区
    pub fn by_utc_offset_seconds(seconds: i64) -> Option<Self> {
        if seconds.abs() > 14 * 3600 {
            return None;
        }
        Some(ZoneSpec::Fixed(seconds as i32))
    }

    /// 转换为 chrono 的固定偏移
    ///
    /// 命名时区返回 None（其偏移依赖具体时刻，需结合时间点计算）
    pub fn fixed_offset(&self) -> Option<FixedOffset> {
        match self {
            ZoneSpec::Named(_) => None,
            ZoneSpec::Fixed(secs) => FixedOffset::east_opt(*secs),
        }
    }
}

impl std::fmt::Display for ZoneSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ZoneSpec::Named(tz) => write!(f, "{}", tz.name()),
            ZoneSpec::Fixed(secs) => {
                let sign = if *secs < 0 { '-' } else { '+' };
                let abs = secs.abs();
                write!(f, "{}{:02}:{:02}", sign, abs / 3600, (abs % 3600) / 60)
            }
        }
    }
}
