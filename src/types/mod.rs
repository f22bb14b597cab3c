//! 核心数据类型模块
//!
//! 提供跨层统一的数据值表示和时区值类型

pub mod data_value;
pub mod zone;

pub use data_value::{DataValue, ValueKind};
pub use zone::ZoneSpec;
