use bigdecimal::BigDecimal;
use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use crate::types::zone::ZoneSpec;

/// 通用数据值类型 - 原始输入与转换结果的统一表示
///
/// 类型转换不做开放式反射，所有分派都基于这个封闭的变体集合
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub enum DataValue {
    /// 空值
    Null,
    /// 布尔值
    Bool(bool),
    /// 整数
    Int(i64),
    /// 无符号整数
    UInt(u64),
    /// 浮点数
    Float(f64),
    /// 字符串
    String(String),
    /// 字节数组
    Bytes(Vec<u8>),
    /// 日期
    Date(NaiveDate),
    /// 日期时间
    DateTime(DateTime<FixedOffset>),
    /// 时区
    TimeZone(ZoneSpec),
    /// 任意精度十进制数
    Decimal(BigDecimal),
    /// 时长（秒）
    Duration(i64),
    /// UUID
    Uuid(Uuid),
    /// JSON 对象
    Json(serde_json::Value),
    /// 数组
    Array(Vec<DataValue>),
    /// 对象/文档
    Object(HashMap<String, DataValue>),
}

/// 数据值形状标识
///
/// 用于 `Object` 类型转换的声明形状匹配
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueKind {
    Null,
    Bool,
    Int,
    UInt,
    Float,
    String,
    Bytes,
    Date,
    DateTime,
    TimeZone,
    Decimal,
    Duration,
    Uuid,
    Json,
    Array,
    Object,
}

impl std::fmt::Display for DataValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataValue::Null => write!(f, "null"),
            DataValue::Bool(b) => write!(f, "{}", b),
            DataValue::Int(i) => write!(f, "{}", i),
            DataValue::UInt(u) => write!(f, "{}", u),
            DataValue::Float(fl) => write!(f, "{}", fl),
            DataValue::String(s) => write!(f, "{}", s),
            DataValue::Bytes(bytes) => write!(f, "[{} bytes]", bytes.len()),
            DataValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            DataValue::DateTime(dt) => write!(f, "{}", dt.to_rfc3339()),
            DataValue::TimeZone(z) => write!(f, "{}", z),
            DataValue::Decimal(d) => write!(f, "{}", d),
            DataValue::Duration(secs) => write!(f, "{}s", secs),
            DataValue::Uuid(uuid) => write!(f, "{}", uuid),
            DataValue::Json(json) => write!(f, "{}", json),
            DataValue::Array(arr) => {
                let json_str = serde_json::to_string(arr).unwrap_or_default();
                write!(f, "{}", json_str)
            }
            DataValue::Object(obj) => {
                let json_str = serde_json::to_string(obj).unwrap_or_default();
                write!(f, "{}", json_str)
            }
        }
    }
}

impl std::fmt::Debug for DataValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Debug 和 Display 保持一致，显示实际值而不是类型构造函数
        write!(f, "{}", self)
    }
}

impl DataValue {
    /// 获取数据类型名称
    pub fn type_name(&self) -> &'static str {
        match self {
            DataValue::Null => "null",
            DataValue::Bool(_) => "boolean",
            DataValue::Int(_) => "integer",
            DataValue::UInt(_) => "unsigned_integer",
            DataValue::Float(_) => "float",
            DataValue::String(_) => "string",
            DataValue::Bytes(_) => "bytes",
            DataValue::Date(_) => "date",
            DataValue::DateTime(_) => "datetime",
            DataValue::TimeZone(_) => "timezone",
            DataValue::Decimal(_) => "decimal",
            DataValue::Duration(_) => "duration",
            DataValue::Uuid(_) => "uuid",
            DataValue::Json(_) => "json",
            DataValue::Array(_) => "array",
            DataValue::Object(_) => "object",
        }
    }

    /// 获取数据值形状
    pub fn kind(&self) -> ValueKind {
        match self {
            DataValue::Null => ValueKind::Null,
            DataValue::Bool(_) => ValueKind::Bool,
            DataValue::Int(_) => ValueKind::Int,
            DataValue::UInt(_) => ValueKind::UInt,
            DataValue::Float(_) => ValueKind::Float,
            DataValue::String(_) => ValueKind::String,
            DataValue::Bytes(_) => ValueKind::Bytes,
            DataValue::Date(_) => ValueKind::Date,
            DataValue::DateTime(_) => ValueKind::DateTime,
            DataValue::TimeZone(_) => ValueKind::TimeZone,
            DataValue::Decimal(_) => ValueKind::Decimal,
            DataValue::Duration(_) => ValueKind::Duration,
            DataValue::Uuid(_) => ValueKind::Uuid,
            DataValue::Json(_) => ValueKind::Json,
            DataValue::Array(_) => ValueKind::Array,
            DataValue::Object(_) => ValueKind::Object,
        }
    }

    /// 判断是否为空值
    pub fn is_null(&self) -> bool {
        matches!(self, DataValue::Null)
    }

    /// 转换为 JSON 值
    pub fn to_json_value(&self) -> serde_json::Value {
        match self {
            DataValue::Null => serde_json::Value::Null,
            DataValue::Bool(b) => serde_json::Value::Bool(*b),
            DataValue::Int(i) => serde_json::Value::Number(serde_json::Number::from(*i)),
            DataValue::UInt(u) => serde_json::Value::Number(serde_json::Number::from(*u)),
            DataValue::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            DataValue::String(s) => serde_json::Value::String(s.clone()),
            DataValue::Bytes(b) => serde_json::Value::Array(
                b.iter()
                    .map(|byte| serde_json::Value::Number(serde_json::Number::from(*byte)))
                    .collect(),
            ),
            DataValue::Date(d) => serde_json::Value::String(d.format("%Y-%m-%d").to_string()),
            DataValue::DateTime(dt) => serde_json::Value::String(dt.to_rfc3339()),
            DataValue::TimeZone(z) => serde_json::Value::String(z.to_string()),
            DataValue::Decimal(d) => serde_json::Value::String(d.to_string()),
            DataValue::Duration(secs) => {
                serde_json::Value::Number(serde_json::Number::from(*secs))
            }
            DataValue::Uuid(u) => serde_json::Value::String(u.to_string()),
            DataValue::Json(j) => j.clone(),
            DataValue::Array(arr) => {
                serde_json::Value::Array(arr.iter().map(|v| v.to_json_value()).collect())
            }
            DataValue::Object(obj) => serde_json::Value::Object(
                obj.iter()
                    .map(|(k, v)| (k.clone(), v.to_json_value()))
                    .collect(),
            ),
        }
    }

    /// 从普通 JSON 值构造数据值
    ///
    /// 数字按是否带小数和符号落到 Int/UInt/Float，嵌套结构递归转换
    pub fn from_json(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => DataValue::Null,
            serde_json::Value::Bool(b) => DataValue::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    DataValue::Int(i)
                } else if let Some(u) = n.as_u64() {
                    DataValue::UInt(u)
                } else {
                    DataValue::Float(n.as_f64().unwrap_or(0.0))
                }
            }
            serde_json::Value::String(s) => DataValue::String(s),
            serde_json::Value::Array(arr) => {
                DataValue::Array(arr.into_iter().map(DataValue::from_json).collect())
            }
            serde_json::Value::Object(obj) => DataValue::Object(
                obj.into_iter()
                    .map(|(k, v)| (k, DataValue::from_json(v)))
                    .collect(),
            ),
        }
    }

    /// 转换为 JSON 字符串
    pub fn to_json_string(&self) -> Result<String, crate::error::ActiveDataError> {
        serde_json::to_string(self).map_err(|e| {
            crate::quick_error!(serialization, format!("DataValue 转换为 JSON 失败: {}", e))
        })
    }

    /// 从 JSON 字符串解析
    pub fn from_json_string(json: &str) -> Result<Self, crate::error::ActiveDataError> {
        serde_json::from_str(json).map_err(|e| {
            crate::quick_error!(serialization, format!("JSON 解析为 DataValue 失败: {}", e))
        })
    }

    /// 期望 Object 类型，如果不是则返回错误
    pub fn expect_object(
        self,
    ) -> Result<HashMap<String, DataValue>, crate::error::ActiveDataError> {
        match self {
            DataValue::Object(map) => Ok(map),
            other => Err(crate::quick_error!(
                validation,
                "data_type",
                format!("期望 Object 类型，但收到: {}", other.type_name())
            )),
        }
    }
}

impl From<bool> for DataValue {
    fn from(value: bool) -> Self {
        DataValue::Bool(value)
    }
}

impl From<i32> for DataValue {
    fn from(value: i32) -> Self {
        DataValue::Int(value as i64)
    }
}

impl From<i64> for DataValue {
    fn from(value: i64) -> Self {
        DataValue::Int(value)
    }
}

impl From<u64> for DataValue {
    fn from(value: u64) -> Self {
        DataValue::UInt(value)
    }
}

impl From<f64> for DataValue {
    fn from(value: f64) -> Self {
        DataValue::Float(value)
    }
}

impl From<&str> for DataValue {
    fn from(value: &str) -> Self {
        DataValue::String(value.to_string())
    }
}

impl From<String> for DataValue {
    fn from(value: String) -> Self {
        DataValue::String(value)
    }
}

impl From<NaiveDate> for DataValue {
    fn from(value: NaiveDate) -> Self {
        DataValue::Date(value)
    }
}

impl From<DateTime<FixedOffset>> for DataValue {
    fn from(value: DateTime<FixedOffset>) -> Self {
        DataValue::DateTime(value)
    }
}

impl From<Uuid> for DataValue {
    fn from(value: Uuid) -> Self {
        DataValue::Uuid(value)
    }
}

impl From<ZoneSpec> for DataValue {
    fn from(value: ZoneSpec) -> Self {
        DataValue::TimeZone(value)
    }
}

impl From<serde_json::Value> for DataValue {
    fn from(value: serde_json::Value) -> Self {
        DataValue::Json(value)
    }
}

impl<T> From<Option<T>> for DataValue
where
    T: Into<DataValue>,
{
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => v.into(),
            None => DataValue::Null,
        }
    }
}
