//! 类型转换引擎
//!
//! 按声明的类型名解析转换函数并应用到原始值上。
//! 未注册的类型按原样放行，由外层模型声明层决定如何处理

use rat_logger::debug;
use std::sync::Arc;

use super::{CastContext, CastOutcome, TypecasterRegistry};
use crate::config::ActiveDataConfig;
use crate::types::{DataValue, ValueKind};

/// 类型转换引擎
///
/// 持有注册表和环境配置的共享引用，本身无状态，可随处克隆
#[derive(Clone)]
pub struct TypecastEngine {
    registry: Arc<TypecasterRegistry>,
    config: Arc<ActiveDataConfig>,
}

impl TypecastEngine {
    /// 创建转换引擎
    pub fn new(registry: Arc<TypecasterRegistry>, config: Arc<ActiveDataConfig>) -> Self {
        Self { registry, config }
    }

    /// 使用内置转换规则和默认配置创建引擎
    pub fn with_builtins() -> Self {
        Self::new(
            Arc::new(TypecasterRegistry::with_builtins()),
            Arc::new(ActiveDataConfig::default()),
        )
    }

    /// 获取注册表
    pub fn registry(&self) -> &TypecasterRegistry {
        &self.registry
    }

    /// 获取环境配置
    pub fn config(&self) -> &ActiveDataConfig {
        &self.config
    }

    /// 转换原始值
    ///
    /// 所有失败路径收敛为 `Uncastable`，永不返回错误
    pub fn cast(&self, type_key: &str, value: &DataValue) -> CastOutcome {
        self.cast_with_declared(type_key, value, None)
    }

    /// 转换原始值，携带属性声明的值形状（`Object` 转换需要）
    pub fn cast_with_declared(
        &self,
        type_key: &str,
        value: &DataValue,
        declared: Option<ValueKind>,
    ) -> CastOutcome {
        match self.registry.lookup(type_key) {
            Some(caster) => {
                let ctx = CastContext {
                    config: &self.config,
                    declared,
                };
                caster(value, &ctx)
            }
            None => {
                // 未注册类型：原样放行
                debug!("类型 '{}' 未注册转换函数，原样放行", type_key);
                CastOutcome::Cast(value.clone())
            }
        }
    }

    /// 转换原始值，不可转换时收敛为空值
    ///
    /// 模型赋值层使用的入口：属性赋值对任意输入都必须完成
    pub fn cast_or_null(&self, type_key: &str, value: &DataValue) -> DataValue {
        self.cast(type_key, value).into_value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unregistered_type_passes_through() {
        let engine = TypecastEngine::new(
            Arc::new(TypecasterRegistry::new()),
            Arc::new(ActiveDataConfig::default()),
        );
        let value = DataValue::String("anything".to_string());
        assert_eq!(
            engine.cast("Unknown", &value),
            CastOutcome::Cast(value.clone())
        );
    }

    #[test]
    fn test_cast_or_null_collapses_failure() {
        let engine = TypecastEngine::with_builtins();
        assert_eq!(
            engine.cast_or_null("Integer", &DataValue::String("abc".to_string())),
            DataValue::Null
        );
        assert_eq!(
            engine.cast_or_null("Integer", &DataValue::String("7".to_string())),
            DataValue::Int(7)
        );
    }
}
