//! 内置类型转换规则
//!
//! 覆盖基础类型、时间类型和领域类型的转换。每条规则都是对封闭的
//! `DataValue` 形状集合的显式匹配，失败路径一律收敛为 `Uncastable`，
//! 永不向调用方抛出错误

use bigdecimal::{BigDecimal, ToPrimitive};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Offset, TimeZone, Utc};
use std::str::FromStr;
use uuid::Uuid;

use super::{CastContext, CastOutcome, TypecasterRegistry};
use crate::types::{DataValue, ZoneSpec};

/// 注册全部内置转换函数
pub fn register_builtins(registry: &TypecasterRegistry) {
    registry.register("Object", cast_object);
    registry.register("String", cast_string);
    registry.register("Array", cast_array);
    registry.register("Hash", cast_hash);
    registry.register("Date", cast_date);
    registry.register("DateTime", cast_datetime);
    registry.register("Time", cast_time);
    registry.register("TimeZone", cast_timezone);
    registry.register("BigDecimal", cast_bigdecimal);
    registry.register("Float", cast_float);
    registry.register("Integer", cast_integer);
    registry.register("Boolean", cast_boolean);
    registry.register("Uuid", cast_uuid);
}

/// 布尔值线上表示映射表
///
/// 严格查表，不做真值判断：`2`、空字符串、空值等表外输入一律无匹配
pub fn boolean_mapping(value: &DataValue) -> Option<bool> {
    match value {
        DataValue::Bool(b) => Some(*b),
        DataValue::Int(1) | DataValue::UInt(1) => Some(true),
        DataValue::Int(0) | DataValue::UInt(0) => Some(false),
        DataValue::String(s) => match s.as_str() {
            "1" | "t" | "T" | "true" | "TRUE" | "y" | "yes" => Some(true),
            "0" | "f" | "F" | "false" | "FALSE" | "n" | "no" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

fn cast_object(value: &DataValue, ctx: &CastContext<'_>) -> CastOutcome {
    // 仅当值的形状与属性声明的形状一致时原样通过
    match ctx.declared {
        Some(declared) if !value.is_null() && value.kind() == declared => {
            CastOutcome::Cast(value.clone())
        }
        _ => CastOutcome::Uncastable,
    }
}

fn cast_string(value: &DataValue, _ctx: &CastContext<'_>) -> CastOutcome {
    // 全域转换：空值渲染为空串，永不失败
    match value {
        DataValue::Null => CastOutcome::Cast(DataValue::String(String::new())),
        DataValue::String(s) => CastOutcome::Cast(DataValue::String(s.clone())),
        other => CastOutcome::Cast(DataValue::String(other.to_string())),
    }
}

fn cast_array(value: &DataValue, _ctx: &CastContext<'_>) -> CastOutcome {
    match value {
        DataValue::Array(arr) => CastOutcome::Cast(DataValue::Array(arr.clone())),
        DataValue::String(s) => {
            let mut pieces: Vec<String> = if s.is_empty() {
                Vec::new()
            } else {
                s.split(',').map(|piece| piece.trim().to_string()).collect()
            };
            // 尾部空段丢弃，中间空段保留
            while pieces.last().is_some_and(|piece| piece.is_empty()) {
                pieces.pop();
            }
            CastOutcome::Cast(DataValue::Array(
                pieces.into_iter().map(DataValue::String).collect(),
            ))
        }
        _ => CastOutcome::Uncastable,
    }
}

fn cast_hash(value: &DataValue, _ctx: &CastContext<'_>) -> CastOutcome {
    match value {
        DataValue::Object(obj) => CastOutcome::Cast(DataValue::Object(obj.clone())),
        _ => CastOutcome::Uncastable,
    }
}

fn cast_date(value: &DataValue, _ctx: &CastContext<'_>) -> CastOutcome {
    match value {
        DataValue::Date(d) => CastOutcome::Cast(DataValue::Date(*d)),
        DataValue::DateTime(dt) => CastOutcome::Cast(DataValue::Date(dt.date_naive())),
        DataValue::String(s) => match parse_date(s) {
            Some(d) => CastOutcome::Cast(DataValue::Date(d)),
            None => CastOutcome::Uncastable,
        },
        _ => CastOutcome::Uncastable,
    }
}

fn cast_datetime(value: &DataValue, _ctx: &CastContext<'_>) -> CastOutcome {
    match value {
        DataValue::DateTime(dt) => CastOutcome::Cast(DataValue::DateTime(*dt)),
        DataValue::Date(d) => match midnight_utc(*d) {
            Some(dt) => CastOutcome::Cast(DataValue::DateTime(dt)),
            None => CastOutcome::Uncastable,
        },
        DataValue::String(s) => match parse_datetime(s) {
            Some(dt) => CastOutcome::Cast(DataValue::DateTime(dt)),
            None => CastOutcome::Uncastable,
        },
        _ => CastOutcome::Uncastable,
    }
}

fn cast_time(value: &DataValue, ctx: &CastContext<'_>) -> CastOutcome {
    match value {
        // 配置了默认时区时，字符串按该时区解析
        DataValue::String(s) => {
            let parsed = match &ctx.config.default_time_zone {
                Some(zone) => parse_datetime_in_zone(s, zone),
                None => parse_datetime(s),
            };
            match parsed {
                Some(dt) => CastOutcome::Cast(DataValue::DateTime(dt)),
                None => CastOutcome::Uncastable,
            }
        }
        DataValue::DateTime(dt) => CastOutcome::Cast(DataValue::DateTime(*dt)),
        DataValue::Date(d) => match midnight_utc(*d) {
            Some(dt) => CastOutcome::Cast(DataValue::DateTime(dt)),
            None => CastOutcome::Uncastable,
        },
        DataValue::Int(ts) => match Utc.timestamp_opt(*ts, 0).single() {
            Some(dt) => CastOutcome::Cast(DataValue::DateTime(dt.fixed_offset())),
            None => CastOutcome::Uncastable,
        },
        DataValue::UInt(ts) if *ts <= i64::MAX as u64 => {
            match Utc.timestamp_opt(*ts as i64, 0).single() {
                Some(dt) => CastOutcome::Cast(DataValue::DateTime(dt.fixed_offset())),
                None => CastOutcome::Uncastable,
            }
        }
        _ => CastOutcome::Uncastable,
    }
}

fn cast_timezone(value: &DataValue, _ctx: &CastContext<'_>) -> CastOutcome {
    let zone = match value {
        DataValue::TimeZone(z) => Some(*z),
        // 字符串先尝试数字解析（按 UTC 小时偏移），失败再按名称查找
        DataValue::String(s) => match s.trim().parse::<f64>() {
            Ok(hours) => ZoneSpec::by_utc_offset_hours(hours),
            Err(_) => ZoneSpec::by_name(s),
        },
        DataValue::Int(n) => numeric_zone(*n as f64),
        DataValue::UInt(n) => numeric_zone(*n as f64),
        DataValue::Float(n) => numeric_zone(*n),
        DataValue::Duration(secs) => numeric_zone(*secs as f64),
        _ => None,
    };
    match zone {
        Some(z) => CastOutcome::Cast(DataValue::TimeZone(z)),
        None => CastOutcome::Uncastable,
    }
}

fn cast_bigdecimal(value: &DataValue, _ctx: &CastContext<'_>) -> CastOutcome {
    if value.is_null() {
        return CastOutcome::Uncastable;
    }
    if let DataValue::Decimal(d) = value {
        return CastOutcome::Cast(DataValue::Decimal(d.clone()));
    }
    // 先按浮点解析，再经十进制字符串重新解析为任意精度
    match float_of(value).and_then(|f| BigDecimal::from_str(&f.to_string()).ok()) {
        Some(d) => CastOutcome::Cast(DataValue::Decimal(d)),
        None => CastOutcome::Uncastable,
    }
}

fn cast_float(value: &DataValue, _ctx: &CastContext<'_>) -> CastOutcome {
    match float_of(value) {
        Some(f) => CastOutcome::Cast(DataValue::Float(f)),
        None => CastOutcome::Uncastable,
    }
}

fn cast_integer(value: &DataValue, _ctx: &CastContext<'_>) -> CastOutcome {
    // 按浮点解析后向零截断
    match float_of(value) {
        Some(f) if f.is_finite() => CastOutcome::Cast(DataValue::Int(f.trunc() as i64)),
        _ => CastOutcome::Uncastable,
    }
}

fn cast_boolean(value: &DataValue, _ctx: &CastContext<'_>) -> CastOutcome {
    match boolean_mapping(value) {
        Some(b) => CastOutcome::Cast(DataValue::Bool(b)),
        None => CastOutcome::Uncastable,
    }
}

fn cast_uuid(value: &DataValue, _ctx: &CastContext<'_>) -> CastOutcome {
    let uuid = match value {
        DataValue::Uuid(u) => Some(*u),
        DataValue::Bytes(b) => Uuid::from_slice(b).ok(),
        DataValue::String(s) => Uuid::parse_str(s).ok(),
        DataValue::Int(i) if *i >= 0 => Some(Uuid::from_u128(*i as u128)),
        DataValue::UInt(u) => Some(Uuid::from_u128(*u as u128)),
        _ => None,
    };
    match uuid {
        Some(u) => CastOutcome::Cast(DataValue::Uuid(u)),
        None => CastOutcome::Uncastable,
    }
}

/// 统一的浮点解析规则
///
/// 字符串要求解析为有限数，已有的数值类型原样取值
fn float_of(value: &DataValue) -> Option<f64> {
    match value {
        DataValue::Float(f) => Some(*f),
        DataValue::Int(i) => Some(*i as f64),
        DataValue::UInt(u) => Some(*u as f64),
        DataValue::Decimal(d) => d.to_f64(),
        DataValue::String(s) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite()),
        _ => None,
    }
}

/// 数字形式的时区：绝对值不超过 13 按小时理解，否则按秒
fn numeric_zone(n: f64) -> Option<ZoneSpec> {
    if !n.is_finite() {
        return None;
    }
    if n.abs() <= 13.0 {
        ZoneSpec::by_utc_offset_hours(n)
    } else {
        ZoneSpec::by_utc_offset_seconds(n as i64)
    }
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|n| n.date())
}

fn parse_datetime(s: &str) -> Option<DateTime<FixedOffset>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt);
    }
    if let Some(n) = parse_naive(s) {
        // 无时区信息的输入按 UTC 理解
        return Some(Utc.from_utc_datetime(&n).fixed_offset());
    }
    None
}

/// 按指定时区解析字符串时间
///
/// 带显式偏移的输入先取其时刻再换算到目标时区；
/// 无偏移的输入按目标时区的本地时间理解
fn parse_datetime_in_zone(s: &str, zone: &ZoneSpec) -> Option<DateTime<FixedOffset>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(instant_in_zone(dt, zone));
    }
    let naive = parse_naive(s)?;
    match zone {
        ZoneSpec::Named(tz) => tz
            .from_local_datetime(&naive)
            .earliest()
            .map(|dt| dt.with_timezone(&dt.offset().fix())),
        ZoneSpec::Fixed(_) => zone
            .fixed_offset()
            .and_then(|off| off.from_local_datetime(&naive).single()),
    }
}

fn instant_in_zone(dt: DateTime<FixedOffset>, zone: &ZoneSpec) -> DateTime<FixedOffset> {
    match zone {
        ZoneSpec::Named(tz) => {
            let zoned = dt.with_timezone(tz);
            zoned.with_timezone(&zoned.offset().fix())
        }
        ZoneSpec::Fixed(_) => match zone.fixed_offset() {
            Some(off) => dt.with_timezone(&off),
            None => dt,
        },
    }
}

fn parse_naive(s: &str) -> Option<NaiveDateTime> {
    if let Ok(n) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Some(n);
    }
    if let Ok(n) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Some(n);
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

fn midnight_utc(d: NaiveDate) -> Option<DateTime<FixedOffset>> {
    d.and_hms_opt(0, 0, 0)
        .map(|n| Utc.from_utc_datetime(&n).fixed_offset())
}
