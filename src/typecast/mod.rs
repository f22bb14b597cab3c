//! 类型转换模块
//!
//! 提供类型转换注册表和转换引擎：按声明的类型名查找转换函数，
//! 把弱类型的原始输入收敛为强类型的属性值。
//! 转换失败不是异常路径，统一以 [`CastOutcome::Uncastable`] 表示

mod builtin;
mod engine;
mod registry;

pub use builtin::{boolean_mapping, register_builtins};
pub use engine::TypecastEngine;
pub use registry::TypecasterRegistry;

use std::sync::Arc;

use crate::config::ActiveDataConfig;
use crate::types::{DataValue, ValueKind};

/// 类型转换结果
///
/// 区分"成功转换"和"输入不可转换"两种情况，不携带错误：
/// 属性赋值必须对任意输入都能完成，坏数据留给上层验证去报告
#[derive(Debug, Clone, PartialEq)]
pub enum CastOutcome {
    /// 转换成功，携带转换后的值
    Cast(DataValue),
    /// 输入不可转换
    Uncastable,
}

impl CastOutcome {
    /// 收敛为数据值，不可转换时为空值
    pub fn into_value(self) -> DataValue {
        match self {
            CastOutcome::Cast(value) => value,
            CastOutcome::Uncastable => DataValue::Null,
        }
    }

    /// 转换为 Option
    pub fn into_option(self) -> Option<DataValue> {
        match self {
            CastOutcome::Cast(value) => Some(value),
            CastOutcome::Uncastable => None,
        }
    }

    /// 判断是否不可转换
    pub fn is_uncastable(&self) -> bool {
        matches!(self, CastOutcome::Uncastable)
    }
}

/// 类型转换上下文
///
/// 携带转换函数需要的环境信息：进程级配置（默认时区）
/// 和属性声明的值形状（`Object` 转换按形状匹配）
pub struct CastContext<'a> {
    /// 进程级配置
    pub config: &'a ActiveDataConfig,
    /// 属性声明的值形状
    pub declared: Option<ValueKind>,
}

/// 类型转换函数
///
/// 对同一输入和同一环境（默认时区）必须返回同一结果，且永不 panic
pub type Typecaster = Arc<dyn Fn(&DataValue, &CastContext<'_>) -> CastOutcome + Send + Sync>;
