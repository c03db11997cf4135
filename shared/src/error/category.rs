//! Error domain, taken from the code's leading digit

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// 0xxx, and any range without its own domain
    General,
    /// 1xxx
    Auth,
    /// 2xxx
    Permission,
    /// 4xxx
    Order,
    /// 6xxx
    Product,
    /// 8xxx
    Account,
    /// 9xxx and above, logged at error level
    System,
}

impl ErrorCategory {
    pub fn from_code(code: u16) -> Self {
        match code / 1000 {
            1 => Self::Auth,
            2 => Self::Permission,
            4 => Self::Order,
            6 => Self::Product,
            8 => Self::Account,
            9.. => Self::System,
            _ => Self::General,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Auth => "auth",
            Self::Permission => "permission",
            Self::Order => "order",
            Self::Product => "product",
            Self::Account => "account",
            Self::System => "system",
        }
    }
}

impl ErrorCode {
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}
