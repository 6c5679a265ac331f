//! Ports - 端口定义
//!
//! 应用层与基础设施层之间的抽象边界

mod repositories;

pub use repositories::*;
