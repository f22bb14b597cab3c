//! 持久化适配器注册表
//!
//! 后端标识到适配器工厂的映射。未注册的后端标识是声明错误，
//! 解析时立即报出，不做静默降级

use dashmap::DashMap;
use rat_logger::debug;
use std::sync::Arc;

use super::adapter::{AdapterFactory, PersistenceAdapter, ScopePredicate};
use crate::error::ActiveDataResult;

/// 持久化适配器注册表
///
/// 显式对象，启动期由调用方注册各后端工厂后只读使用
pub struct AdapterRegistry {
    factories: DashMap<String, AdapterFactory>,
}

impl AdapterRegistry {
    /// 创建空注册表
    pub fn new() -> Self {
        Self {
            factories: DashMap::new(),
        }
    }

    /// 注册后端适配器工厂
    ///
    /// 同名注册静默覆盖
    pub fn register<F>(&self, backend_key: &str, factory: F)
    where
        F: Fn(&str, &str, Option<ScopePredicate>) -> Arc<dyn PersistenceAdapter>
            + Send
            + Sync
            + 'static,
    {
        if self.factories.contains_key(backend_key) {
            debug!("后端 '{}' 的适配器工厂被覆盖", backend_key);
        }
        self.factories
            .insert(backend_key.to_string(), Arc::new(factory));
    }

    /// 判断后端是否已注册
    pub fn has(&self, backend_key: &str) -> bool {
        self.factories.contains_key(backend_key)
    }

    /// 解析适配器
    ///
    /// 每次调用都通过工厂新建实例；未注册的后端标识立即返回配置错误
    pub fn adapter_for(
        &self,
        backend_key: &str,
        data_source: &str,
        primary_key: &str,
        scope_predicate: Option<ScopePredicate>,
    ) -> ActiveDataResult<Arc<dyn PersistenceAdapter>> {
        let factory = self
            .factories
            .get(backend_key)
            .ok_or_else(|| crate::quick_error!(adapter_not_found, backend_key))?;
        Ok(factory(data_source, primary_key, scope_predicate))
    }
}

impl Default for AdapterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ActiveDataError;
    use crate::model::ModelInstance;
    use crate::types::DataValue;
    use std::any::Any;
    use std::collections::HashMap;

    struct NullScope;

    impl super::super::adapter::QueryScope for NullScope {
        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    struct NullRecord;

    impl super::super::adapter::RecordHandle for NullRecord {
        fn as_any(&self) -> &dyn Any {
            self
        }
        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
        fn attributes(&self) -> HashMap<String, DataValue> {
            HashMap::new()
        }
        fn is_persisted(&self) -> bool {
            false
        }
    }

    struct NullAdapter;

    impl PersistenceAdapter for NullAdapter {
        fn scope(
            &self,
            _owner: &dyn ModelInstance,
            _source: &DataValue,
        ) -> Box<dyn super::super::adapter::QueryScope> {
            Box::new(NullScope)
        }
        fn build(
            &self,
            _attributes: HashMap<String, DataValue>,
        ) -> Box<dyn super::super::adapter::RecordHandle> {
            Box::new(NullRecord)
        }
        fn persist(
            &self,
            _record: &mut dyn super::super::adapter::RecordHandle,
            _options: &super::super::adapter::PersistOptions,
        ) -> bool {
            true
        }
    }

    #[test]
    fn test_unregistered_backend_is_config_error() {
        let registry = AdapterRegistry::new();
        let result = registry.adapter_for("missing", "records", "id", None);
        assert!(matches!(
            result,
            Err(ActiveDataError::AdapterNotFound { ref backend_key }) if backend_key == "missing"
        ));
    }

    #[test]
    fn test_register_and_resolve() {
        let registry = AdapterRegistry::new();
        registry.register("memory", |_, _, _| Arc::new(NullAdapter));
        assert!(registry.has("memory"));
        assert!(registry.adapter_for("memory", "records", "id", None).is_ok());
    }
}
