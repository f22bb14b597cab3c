//! 关联反射
//!
//! 关联声明时创建一次的静态元数据，之后不可变。
//! 反射只描述"指向哪个后端、用哪个键、什么基数"，
//! 不持有任何适配器实例（适配器在每次调用时重新解析）

use serde::{Deserialize, Serialize};

use crate::association::adapter::ScopePredicate;
use crate::error::ActiveDataResult;
use crate::model::ModelInstance;
use crate::types::DataValue;

/// 关联基数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cardinality {
    /// 指向零或一条记录
    One,
    /// 指向多条记录
    Many,
}

/// 后端标识来源
///
/// 多态关联的后端标识存在宿主的判别属性里，每次解析时实时读取
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BackendKey {
    /// 声明时固定的后端标识
    Static(String),
    /// 从宿主属性实时读取后端标识
    OwnerAttribute(String),
}

/// 关联反射 - 一条关联声明的静态元数据
#[derive(Clone)]
pub struct Reflection {
    /// 关联名称
    pub name: String,
    /// 后端标识来源
    pub backend_key: BackendKey,
    /// 后端侧数据源（表/集合名）
    pub data_source: String,
    /// 连接键属性名
    pub primary_key: String,
    /// 宿主引用属性的声明类型（交给适配器前先经此类型转换）
    pub source_type: String,
    /// 宿主侧存放引用值的属性名，缺省为 `{name}_{primary_key}`
    pub source_attribute: Option<String>,
    /// 可选的范围谓词，由后端求值
    pub scope_predicate: Option<ScopePredicate>,
    /// 关联基数
    pub cardinality: Cardinality,
}

impl Reflection {
    /// 创建反射
    ///
    /// 连接键缺省为 `id`，引用类型缺省为 `String`，基数缺省为一对一
    pub fn new(name: &str, backend_key: BackendKey, data_source: &str) -> Self {
        Self {
            name: name.to_string(),
            backend_key,
            data_source: data_source.to_string(),
            primary_key: "id".to_string(),
            source_type: "String".to_string(),
            source_attribute: None,
            scope_predicate: None,
            cardinality: Cardinality::One,
        }
    }

    /// 设置连接键属性名
    pub fn primary_key(mut self, key: &str) -> Self {
        self.primary_key = key.to_string();
        self
    }

    /// 设置宿主引用属性的声明类型
    pub fn source_type(mut self, type_key: &str) -> Self {
        self.source_type = type_key.to_string();
        self
    }

    /// 设置宿主侧存放引用值的属性名
    pub fn source_attribute(mut self, attribute: &str) -> Self {
        self.source_attribute = Some(attribute.to_string());
        self
    }

    /// 设置范围谓词
    pub fn scope_predicate(mut self, predicate: ScopePredicate) -> Self {
        self.scope_predicate = Some(predicate);
        self
    }

    /// 设置关联基数
    pub fn cardinality(mut self, cardinality: Cardinality) -> Self {
        self.cardinality = cardinality;
        self
    }

    /// 宿主侧引用属性名
    pub fn resolved_source_attribute(&self) -> String {
        match &self.source_attribute {
            Some(attribute) => attribute.clone(),
            None => format!("{}_{}", self.name, self.primary_key),
        }
    }

    /// 解析后端标识
    ///
    /// 多态来源每次都从宿主属性实时读取；判别属性为空视为声明错误
    pub fn resolve_backend_key(&self, owner: &dyn ModelInstance) -> ActiveDataResult<String> {
        match &self.backend_key {
            BackendKey::Static(key) => Ok(key.clone()),
            BackendKey::OwnerAttribute(attribute) => match owner.attribute(attribute) {
                DataValue::String(key) => Ok(key),
                DataValue::Null => Err(crate::quick_error!(
                    config,
                    format!(
                        "关联 '{}' 的后端判别属性 '{}' 为空",
                        self.name, attribute
                    )
                )),
                other => Ok(other.to_string()),
            },
        }
    }
}

impl std::fmt::Debug for Reflection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reflection")
            .field("name", &self.name)
            .field("backend_key", &self.backend_key)
            .field("data_source", &self.data_source)
            .field("primary_key", &self.primary_key)
            .field("source_type", &self.source_type)
            .field("source_attribute", &self.source_attribute)
            .field(
                "scope_predicate",
                &self.scope_predicate.as_ref().map(|_| "<fn>"),
            )
            .field("cardinality", &self.cardinality)
            .finish()
    }
}
