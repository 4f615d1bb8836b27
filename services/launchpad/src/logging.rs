//! Standardized emoji logging for control plane operations

/// Emoji prefixes shared by every launchpad log line
pub struct LogEmoji;

impl LogEmoji {
    pub const SUCCESS: &'static str = "✅";
    pub const DEPLOY: &'static str = "🚀";
    pub const CONVERT: &'static str = "🔄";
    pub const MONEY: &'static str = "💰";
    pub const GOVERNANCE: &'static str = "🏛️";
    pub const PAUSE: &'static str = "⏸️";
    pub const RESUME: &'static str = "▶️";
}

#[macro_export]
macro_rules! log_success {
    ($($arg:tt)*) => {
        tracing::info!("{} {}", $crate::logging::LogEmoji::SUCCESS, format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_deploy {
    ($($arg:tt)*) => {
        tracing::info!("{} {}", $crate::logging::LogEmoji::DEPLOY, format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_convert {
    ($($arg:tt)*) => {
        tracing::info!("{} {}", $crate::logging::LogEmoji::CONVERT, format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_commission {
    ($($arg:tt)*) => {
        tracing::info!("{} {}", $crate::logging::LogEmoji::MONEY, format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_governance {
    ($($arg:tt)*) => {
        tracing::info!("{} {}", $crate::logging::LogEmoji::GOVERNANCE, format!($($arg)*))
    };
}
