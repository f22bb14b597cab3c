//! 持久化适配器契约
//!
//! 外部存储后端实现这组能力接口（`scope`/`build`/`persist`），
//! 关联层通过它操作后端记录而不耦合任何具体存储 API。
//! 所有 I/O、阻塞与超时语义都在适配器一侧，本层只做同步委托

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use crate::model::ModelInstance;
use crate::types::DataValue;

/// 持久化选项（透传给后端，本层不解释）
pub type PersistOptions = HashMap<String, DataValue>;

/// 惰性查询句柄
///
/// 后端自定义的可查询对象，表示"从宿主出发可达的目标记录集合"。
/// 创建时不执行查询；本层对其内容完全不透明，
/// 后端和测试代码通过 `as_any` 找回具体类型
pub trait QueryScope {
    /// 向下转型入口
    fn as_any(&self) -> &dyn Any;
}

/// 后端记录句柄
///
/// `build` 返回的未保存记录模板。保存结果（含后端校验失败）
/// 通过记录自身状态暴露，本层从不解释
pub trait RecordHandle {
    /// 向下转型入口
    fn as_any(&self) -> &dyn Any;

    /// 可变向下转型入口
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// 记录的属性映射
    fn attributes(&self) -> HashMap<String, DataValue>;

    /// 记录是否已持久化
    fn is_persisted(&self) -> bool;
}

/// 持久化适配器能力契约
///
/// 由具体存储后端实现；每个实例绑定一个数据源、连接键和可选的范围谓词
/// （由注册表中的工厂在构造时注入）
pub trait PersistenceAdapter: Send + Sync {
    /// 产出受宿主键值约束的惰性查询句柄
    ///
    /// 保证不立即执行查询；`source` 为宿主引用属性的当前值或调用方覆盖值
    fn scope(&self, owner: &dyn ModelInstance, source: &DataValue) -> Box<dyn QueryScope>;

    /// 按属性映射构造（但不保存）一条后端形状的记录
    fn build(&self, attributes: HashMap<String, DataValue>) -> Box<dyn RecordHandle>;

    /// 尝试通过后端保存记录，返回是否成功
    ///
    /// 后端校验失败不作为错误上抛，通过返回值和记录自身状态体现
    fn persist(&self, record: &mut dyn RecordHandle, options: &PersistOptions) -> bool;
}

/// 范围谓词
///
/// 对查询句柄做进一步收窄的过滤函数，由后端求值，本层只负责传递
pub type ScopePredicate =
    Arc<dyn Fn(Box<dyn QueryScope>) -> Box<dyn QueryScope> + Send + Sync>;

/// 适配器工厂
///
/// 给定数据源、连接键和可选范围谓词，构造一个适配器实例
pub type AdapterFactory = Arc<
    dyn Fn(&str, &str, Option<ScopePredicate>) -> Arc<dyn PersistenceAdapter> + Send + Sync,
>;
