//! 错误类型定义模块
//!
//! 注意：类型转换失败不是错误，统一以 `CastOutcome::Uncastable` 表示；
//! 本模块只覆盖声明错误（如未注册的持久化后端）和序列化失败等场景

use thiserror::Error;

/// rat_activedata 统一错误类型
#[derive(Error, Debug)]
pub enum ActiveDataError {
    /// 配置错误
    #[error("配置错误: {message}")]
    ConfigError {
        /// 错误描述
        message: String,
    },

    /// 持久化后端未注册（声明错误，立即报出）
    #[error("持久化后端 '{backend_key}' 未注册")]
    AdapterNotFound {
        /// 后端标识
        backend_key: String,
    },

    /// 序列化/反序列化失败
    #[error("序列化失败: {message}")]
    SerializationError {
        /// 错误描述
        message: String,
    },

    /// 模型数据错误
    #[error("模型数据错误: {field} - {message}")]
    ValidationError {
        /// 出错字段
        field: String,
        /// 错误描述
        message: String,
    },
}

/// 统一结果类型别名
pub type ActiveDataResult<T> = Result<T, ActiveDataError>;

impl From<serde_json::Error> for ActiveDataError {
    fn from(e: serde_json::Error) -> Self {
        ActiveDataError::SerializationError {
            message: e.to_string(),
        }
    }
}

/// 快速构造错误的便捷宏
///
/// # 示例
/// ```ignore
/// return Err(crate::quick_error!(config, "缺少必要配置项"));
/// ```
#[macro_export]
macro_rules! quick_error {
    (config, $msg:expr) => {
        $crate::error::ActiveDataError::ConfigError {
            message: $msg.to_string(),
        }
    };
    (adapter_not_found, $key:expr) => {
        $crate::error::ActiveDataError::AdapterNotFound {
            backend_key: $key.to_string(),
        }
    };
    (serialization, $msg:expr) => {
        $crate::error::ActiveDataError::SerializationError {
            message: $msg.to_string(),
        }
    };
    (validation, $field:expr, $msg:expr) => {
        $crate::error::ActiveDataError::ValidationError {
            field: $field.to_string(),
            message: $msg.to_string(),
        }
    };
}
