//! 模型侧定义模块
//!
//! 提供模型实例的最小访问接口和关联的静态元数据（反射）

mod reflection;
mod traits;

pub use reflection::{BackendKey, Cardinality, Reflection};
pub use traits::ModelInstance;
