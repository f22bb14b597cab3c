//! 关联模块
//!
//! 模型侧的关联句柄：表示"这个属性指向外部后端拥有的零/一/多条记录"。
//! 关联不拥有目标记录，只是一个惰性的、可重复解析的后端状态窗口

pub mod adapter;
mod registry;

pub use adapter::{
    AdapterFactory, PersistOptions, PersistenceAdapter, QueryScope, RecordHandle,
    ScopePredicate,
};
pub use registry::AdapterRegistry;

use rat_logger::debug;
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::ActiveDataResult;
use crate::model::{ModelInstance, Reflection};
use crate::typecast::TypecastEngine;
use crate::types::DataValue;

/// 关联基础契约
///
/// 关联实例由单个宿主模型独占，不会比宿主活得更长
pub trait Association {
    /// 宿主模型实例
    fn owner(&self) -> &dyn ModelInstance;

    /// 关联反射
    fn reflection(&self) -> &Reflection;

    /// 读取宿主引用属性的当前值
    ///
    /// 交给适配器之前先按反射声明的类型转换
    fn read_source(&self) -> DataValue;
}

/// 任意后端引用关联
///
/// 每次调用都重新解析适配器，从不缓存实例：后端标识可能依赖宿主的
/// 多态判别属性，缓存会让第二次调用观察不到属性变化
pub struct ReferencesAny<'o> {
    owner: &'o dyn ModelInstance,
    reflection: Arc<Reflection>,
    registry: Arc<AdapterRegistry>,
    engine: TypecastEngine,
}

impl<'o> ReferencesAny<'o> {
    /// 创建关联实例
    pub fn new(
        owner: &'o dyn ModelInstance,
        reflection: Arc<Reflection>,
        registry: Arc<AdapterRegistry>,
        engine: TypecastEngine,
    ) -> Self {
        Self {
            owner,
            reflection,
            registry,
            engine,
        }
    }

    /// 解析适配器（每次调用重新解析）
    fn adapter(&self) -> ActiveDataResult<Arc<dyn PersistenceAdapter>> {
        let backend_key = self.reflection.resolve_backend_key(self.owner)?;
        debug!(
            "关联 '{}' 解析到后端 '{}'",
            self.reflection.name, backend_key
        );
        self.registry.adapter_for(
            &backend_key,
            &self.reflection.data_source,
            &self.reflection.primary_key,
            self.reflection.scope_predicate.clone(),
        )
    }

    /// 获取受宿主键值约束的惰性查询句柄
    ///
    /// `source_override` 允许调用方用尚未写回宿主的值构造范围；
    /// 返回的句柄未执行查询，可由后端继续收窄
    pub fn scope(
        &self,
        source_override: Option<&DataValue>,
    ) -> ActiveDataResult<Box<dyn QueryScope>> {
        let adapter = self.adapter()?;
        let source = match source_override {
            Some(value) => value.clone(),
            None => self.read_source(),
        };
        Ok(adapter.scope(self.owner, &source))
    }

    /// 构造（但不保存）一条目标记录模板
    pub fn build_object(
        &self,
        attributes: HashMap<String, DataValue>,
    ) -> ActiveDataResult<Box<dyn RecordHandle>> {
        Ok(self.adapter()?.build(attributes))
    }

    /// 尝试通过后端保存记录
    ///
    /// 只转发后端的成功标志，不解释失败原因
    pub fn persist_object(
        &self,
        record: &mut dyn RecordHandle,
        options: &PersistOptions,
    ) -> ActiveDataResult<bool> {
        Ok(self.adapter()?.persist(record, options))
    }
}

impl Association for ReferencesAny<'_> {
    fn owner(&self) -> &dyn ModelInstance {
        self.owner
    }

    fn reflection(&self) -> &Reflection {
        &self.reflection
    }

    fn read_source(&self) -> DataValue {
        let attribute = self.reflection.resolved_source_attribute();
        let raw = self.owner.attribute(&attribute);
        self.engine
            .cast_or_null(&self.reflection.source_type, &raw)
    }
}
