//! 类型转换注册表
//!
//! 类型名到转换函数的映射。注册在启动期完成，之后只读；
//! 同名重复注册直接覆盖，不保留历史

use dashmap::DashMap;
use rat_logger::debug;
use std::sync::Arc;

use super::{register_builtins, CastContext, CastOutcome, Typecaster};
use crate::types::DataValue;

/// 类型转换注册表
///
/// 显式对象，由调用方在启动期构建并注入，不是全局单例
pub struct TypecasterRegistry {
    casters: DashMap<String, Typecaster>,
}

impl TypecasterRegistry {
    /// 创建空注册表
    pub fn new() -> Self {
        Self {
            casters: DashMap::new(),
        }
    }

    /// 创建并注册全部内置转换函数
    pub fn with_builtins() -> Self {
        let registry = Self::new();
        register_builtins(&registry);
        registry
    }

    /// 注册转换函数
    ///
    /// 类型名不做格式校验，任意字符串（含命名空间限定名）均可；
    /// 同名注册静默覆盖
    pub fn register<F>(&self, type_key: &str, caster: F)
    where
        F: Fn(&DataValue, &CastContext<'_>) -> CastOutcome + Send + Sync + 'static,
    {
        if self.casters.contains_key(type_key) {
            debug!("类型 '{}' 的转换函数被覆盖", type_key);
        }
        self.casters
            .insert(type_key.to_string(), Arc::new(caster));
    }

    /// 查找转换函数
    pub fn lookup(&self, type_key: &str) -> Option<Typecaster> {
        self.casters.get(type_key).map(|entry| entry.value().clone())
    }

    /// 判断类型是否已注册
    pub fn has(&self, type_key: &str) -> bool {
        self.casters.contains_key(type_key)
    }

    /// 已注册的类型数量
    pub fn len(&self) -> usize {
        self.casters.len()
    }

    /// 注册表是否为空
    pub fn is_empty(&self) -> bool {
        self.casters.is_empty()
    }
}

impl Default for TypecasterRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_lookup() {
        let registry = TypecasterRegistry::new();
        assert!(registry.lookup("Custom").is_none());

        registry.register("Custom", |_, _| CastOutcome::Cast(DataValue::Int(1)));
        assert!(registry.has("Custom"));
        assert!(registry.lookup("Custom").is_some());
    }

    #[test]
    fn test_overwrite_keeps_second_registration() {
        let registry = TypecasterRegistry::new();
        registry.register("Custom", |_, _| CastOutcome::Cast(DataValue::Int(1)));
        registry.register("Custom", |_, _| CastOutcome::Cast(DataValue::Int(2)));

        let caster = registry.lookup("Custom").unwrap();
        let config = crate::config::ActiveDataConfig::default();
        let ctx = CastContext {
            config: &config,
            declared: None,
        };
        assert_eq!(
            caster(&DataValue::Null, &ctx),
            CastOutcome::Cast(DataValue::Int(2))
        );
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_namespaced_keys_accepted() {
        let registry = TypecasterRegistry::new();
        registry.register("app::billing::Money", |_, _| CastOutcome::Uncastable);
        assert!(registry.has("app::billing::Money"));
    }
}
