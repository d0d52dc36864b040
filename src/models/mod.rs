// ============================================================================
// ResxTool - 数据模型模块
// ============================================================================
//
// 文件: src/models/mod.rs
// 职责: 配置、语言表与 resx 文档模型导出
//
// ============================================================================

pub mod config;
pub mod locale;
pub mod resx;
