//! # 配置管理模块
//!
//! 提供进程级环境配置，支持构建器模式和链式配置。
//! 配置在启动期构建一次，之后只读；`Time` 类型转换会读取这里的默认时区

use serde::{Deserialize, Serialize};

use crate::types::ZoneSpec;

/// 环境配置
///
/// 类型转换引擎只读取、从不修改这里的内容
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActiveDataConfig {
    /// 默认时区（影响 `Time` 类型对字符串输入的解析）
    pub default_time_zone: Option<ZoneSpec>,
    /// 模型主键属性名
    pub primary_attribute: String,
}

impl Default for ActiveDataConfig {
    fn default() -> Self {
        Self {
            default_time_zone: None,
            primary_attribute: "id".to_string(),
        }
    }
}

impl ActiveDataConfig {
    /// 创建配置构建器
    pub fn builder() -> ActiveDataConfigBuilder {
        ActiveDataConfigBuilder::new()
    }
}

/// 环境配置构建器
///
/// 提供链式配置接口，支持流畅的 API 调用
#[derive(Debug)]
pub struct ActiveDataConfigBuilder {
    default_time_zone: Option<ZoneSpec>,
    primary_attribute: Option<String>,
}

impl ActiveDataConfigBuilder {
    /// 创建新的构建器
    pub fn new() -> Self {
        Self {
            default_time_zone: None,
            primary_attribute: None,
        }
    }

    /// 设置默认时区
    pub fn default_time_zone(mut self, zone: ZoneSpec) -> Self {
        self.default_time_zone = Some(zone);
        self
    }

    /// 按名称设置默认时区
    ///
    /// 未知时区名返回 None 等价于不设置
    pub fn default_time_zone_name(mut self, name: &str) -> Self {
        self.default_time_zone = ZoneSpec::by_name(name);
        self
    }

    /// 设置模型主键属性名
    pub fn primary_attribute(mut self, name: &str) -> Self {
        self.primary_attribute = Some(name.to_string());
        self
    }

    /// 构建配置
    pub fn build(self) -> ActiveDataConfig {
        ActiveDataConfig {
            default_time_zone: self.default_time_zone,
            primary_attribute: self
                .primary_attribute
                .unwrap_or_else(|| "id".to_string()),
        }
    }
}

impl Default for ActiveDataConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
