//! rat_activedata - 轻量级数据建模层
//!
//! 位于宿主应用模型对象之上：把弱类型的原始输入按声明类型收敛为
//! 强类型属性值，并让内存中的轻量模型通过可插拔的持久化适配器
//! 引用和操作外部存储拥有的记录，而不耦合具体存储的 API
//!
//! 两个注册表（类型转换、持久化适配器）都是显式对象，
//! 由调用方在启动期构建并注入，注册完成后只读使用

// 导出所有公共模块
pub mod association;
pub mod config;
pub mod error;
pub mod model;
pub mod typecast;
pub mod types;

// 重新导出常用类型和函数
pub use association::{
    AdapterFactory, AdapterRegistry, Association, PersistOptions, PersistenceAdapter,
    QueryScope, RecordHandle, ReferencesAny, ScopePredicate,
};
pub use config::{ActiveDataConfig, ActiveDataConfigBuilder};
pub use error::{ActiveDataError, ActiveDataResult};
pub use model::{BackendKey, Cardinality, ModelInstance, Reflection};
pub use typecast::{
    boolean_mapping, CastContext, CastOutcome, TypecastEngine, Typecaster,
    TypecasterRegistry,
};
pub use types::{DataValue, ValueKind, ZoneSpec};

/// 库版本信息
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// 库名称
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// 获取库信息
pub fn get_info() -> String {
    format!("{} v{}", NAME, VERSION)
}
