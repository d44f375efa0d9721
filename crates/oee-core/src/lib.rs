//! # OEE Core
//!
//! 核心資料模型與類型定義

pub mod config;
pub mod machine;
pub mod record;

// Re-export 主要類型
pub use config::CostConfig;
pub use machine::MachineSpec;
pub use record::{ShiftRecord, StoppageRecord, StoppageType};

/// OEE 錯誤類型
#[derive(Debug, thiserror::Error)]
pub enum OeeError {
    #[error("找不到機台規格: {0}")]
    MachineNotFound(String),

    #[error("無效的記錄: {0}")]
    InvalidRecord(String),
}

pub type Result<T> = std::result::Result<T, OeeError>;
