//! 模型实例接口
//!
//! 关联只需要对宿主模型的最小访问能力：按名称读取属性的实时值。
//! 脏跟踪、回调等完整的模型生命周期属于外层宿主框架

use crate::types::DataValue;

/// 模型实例特征
///
/// 宿主应用的模型对象实现这个特征后即可挂载关联。
/// `attribute` 必须返回属性的当前实时值（不做缓存），
/// 关联的适配器解析依赖这一点
pub trait ModelInstance {
    /// 按名称读取属性值，属性不存在时返回空值
    fn attribute(&self, name: &str) -> DataValue;

    /// 模型名称（日志和错误信息用）
    fn model_name(&self) -> &str {
        "anonymous"
    }
}
