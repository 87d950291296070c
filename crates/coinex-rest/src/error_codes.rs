//! CoinEx business code mapping with recovery strategies
//!
//! The envelope `code` field is independent of the HTTP status. This module
//! classifies the codes callers are most likely to act on. Nothing here is
//! applied automatically; the client surfaces the error and the caller
//! decides.

use std::time::Duration;

/// Recovery strategy for handling API errors
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RecoveryStrategy {
    /// Exponential backoff before retry
    Backoff {
        initial_ms: u64,
        max_ms: u64,
        multiplier: u32,
    },
    /// Fixed delay retry
    Retry { delay_ms: u64, max_attempts: u32 },
    /// Re-sign with a fresh timestamp and send again
    Resign,
    /// Cannot recover programmatically
    Fatal,
    /// Requires user intervention (e.g., add funds)
    UserAction { message: &'static str },
    /// Manual investigation needed
    #[default]
    Manual,
}

impl RecoveryStrategy {
    /// Default exponential backoff for rate limits
    pub fn rate_limit_backoff() -> Self {
        Self::Backoff {
            initial_ms: 1000,
            max_ms: 60000,
            multiplier: 2,
        }
    }

    /// Default retry for transient service errors
    pub fn service_retry() -> Self {
        Self::Retry {
            delay_ms: 1000,
            max_attempts: 3,
        }
    }

    /// Get the initial delay duration
    pub fn initial_delay(&self) -> Option<Duration> {
        match self {
            Self::Backoff { initial_ms, .. } => Some(Duration::from_millis(*initial_ms)),
            Self::Retry { delay_ms, .. } => Some(Duration::from_millis(*delay_ms)),
            _ => None,
        }
    }

    /// Check if this strategy allows retry
    pub fn allows_retry(&self) -> bool {
        matches!(self, Self::Backoff { .. } | Self::Retry { .. } | Self::Resign)
    }
}

/// Known CoinEx v2 business codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiErrorCode {
    /// 3008: Service busy
    ServiceBusy,
    /// 3109: Insufficient balance
    InsufficientBalance,
    /// 3127: Order amount below the market minimum
    AmountTooSmall,
    /// 3606: Order price too far from the latest price
    PriceDeviationTooLarge,
    /// 3610: Cancellation prohibited during call auction
    CancelProhibited,
    /// 4001: Service unavailable
    ServiceUnavailable,
    /// 4002: Service request timed out
    ServiceTimeout,
    /// 4003: Internal error
    InternalError,
    /// 4004: Parameter error
    InvalidParameter,
    /// 4005: Abnormal access_id
    InvalidAccessId,
    /// 4006: Signature verification failed
    InvalidSignature,
    /// 4007: IP address prohibited
    IpProhibited,
    /// 4008: access_id permission not enabled
    PermissionDenied,
    /// 4010: Expired request
    RequestExpired,
    /// 4011: User prohibited from accessing
    UserProhibited,
    /// 4017: Signature expired
    SignatureExpired,
    /// 4115: User prohibited from trading
    TradingProhibited,
    /// 4117: Trading prohibited in this market
    MarketTradingProhibited,
    /// 4213: Rate limit triggered
    RateLimited,
}

impl ApiErrorCode {
    /// Map a numeric business code
    pub fn from_code(code: i64) -> Option<Self> {
        Some(match code {
            3008 => Self::ServiceBusy,
            3109 => Self::InsufficientBalance,
            3127 => Self::AmountTooSmall,
            3606 => Self::PriceDeviationTooLarge,
            3610 => Self::CancelProhibited,
            4001 => Self::ServiceUnavailable,
            4002 => Self::ServiceTimeout,
            4003 => Self::InternalError,
            4004 => Self::InvalidParameter,
            4005 => Self::InvalidAccessId,
            4006 => Self::InvalidSignature,
            4007 => Self::IpProhibited,
            4008 => Self::PermissionDenied,
            4010 => Self::RequestExpired,
            4011 => Self::UserProhibited,
            4017 => Self::SignatureExpired,
            4115 => Self::TradingProhibited,
            4117 => Self::MarketTradingProhibited,
            4213 => Self::RateLimited,
            _ => return None,
        })
    }

    /// Numeric business code
    pub fn code(&self) -> i64 {
        match self {
            Self::ServiceBusy => 3008,
            Self::InsufficientBalance => 3109,
            Self::AmountTooSmall => 3127,
            Self::PriceDeviationTooLarge => 3606,
            Self::CancelProhibited => 3610,
            Self::ServiceUnavailable => 4001,
            Self::ServiceTimeout => 4002,
            Self::InternalError => 4003,
            Self::InvalidParameter => 4004,
            Self::InvalidAccessId => 4005,
            Self::InvalidSignature => 4006,
            Self::IpProhibited => 4007,
            Self::PermissionDenied => 4008,
            Self::RequestExpired => 4010,
            Self::UserProhibited => 4011,
            Self::SignatureExpired => 4017,
            Self::TradingProhibited => 4115,
            Self::MarketTradingProhibited => 4117,
            Self::RateLimited => 4213,
        }
    }

    /// Get the recommended recovery strategy
    pub fn recovery_strategy(&self) -> RecoveryStrategy {
        match self {
            Self::ServiceBusy
            | Self::ServiceUnavailable
            | Self::ServiceTimeout
            | Self::InternalError => RecoveryStrategy::service_retry(),

            Self::RateLimited => RecoveryStrategy::rate_limit_backoff(),

            // Local clock drift or a slow send; a fresh timestamp usually fixes it.
            Self::RequestExpired | Self::SignatureExpired => RecoveryStrategy::Resign,

            Self::InsufficientBalance => RecoveryStrategy::UserAction {
                message: "Deposit funds or reduce the order amount",
            },
            Self::IpProhibited | Self::PermissionDenied => RecoveryStrategy::UserAction {
                message: "Check the API key's IP whitelist and permissions",
            },
            Self::UserProhibited | Self::TradingProhibited => RecoveryStrategy::UserAction {
                message: "Account is restricted, contact CoinEx support",
            },

            Self::CancelProhibited | Self::MarketTradingProhibited => RecoveryStrategy::Manual,

            Self::AmountTooSmall
            | Self::PriceDeviationTooLarge
            | Self::InvalidParameter
            | Self::InvalidAccessId
            | Self::InvalidSignature => RecoveryStrategy::Fatal,
        }
    }

    /// Human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::ServiceBusy => "Service busy, try again later",
            Self::InsufficientBalance => "Insufficient balance",
            Self::AmountTooSmall => "Order amount below the market minimum",
            Self::PriceDeviationTooLarge => "Order price deviates too far from the latest price",
            Self::CancelProhibited => "Cancellation prohibited during call auction",
            Self::ServiceUnavailable => "Service unavailable",
            Self::ServiceTimeout => "Service request timed out",
            Self::InternalError => "Internal error",
            Self::InvalidParameter => "Parameter error",
            Self::InvalidAccessId => "Abnormal access_id",
            Self::InvalidSignature => "Signature verification failed",
            Self::IpProhibited => "IP address prohibited",
            Self::PermissionDenied => "access_id permission not enabled",
            Self::RequestExpired => "Request expired",
            Self::UserProhibited => "User prohibited from accessing",
            Self::SignatureExpired => "Signature expired",
            Self::TradingProhibited => "User prohibited from trading",
            Self::MarketTradingProhibited => "Trading prohibited in this market",
            Self::RateLimited => "Rate limit triggered",
        }
    }

    /// Check if this is an authentication error
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidAccessId
                | Self::InvalidSignature
                | Self::RequestExpired
                | Self::SignatureExpired
                | Self::PermissionDenied
                | Self::IpProhibited
        )
    }
}

impl std::fmt::Display for ApiErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.description(), self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_mapping_is_reversible() {
        for code in [
            3008, 3109, 3127, 3606, 3610, 4001, 4002, 4003, 4004, 4005, 4006, 4007, 4008, 4010,
            4011, 4017, 4115, 4117, 4213,
        ] {
            let parsed = ApiErrorCode::from_code(code).expect("known code");
            assert_eq!(parsed.code(), code);
        }
    }

    #[test]
    fn test_unknown_code() {
        assert_eq!(ApiErrorCode::from_code(0), None);
        assert_eq!(ApiErrorCode::from_code(24), None);
    }

    #[test]
    fn test_recovery_strategies() {
        assert!(matches!(
            ApiErrorCode::RateLimited.recovery_strategy(),
            RecoveryStrategy::Backoff { .. }
        ));
        assert_eq!(
            ApiErrorCode::SignatureExpired.recovery_strategy(),
            RecoveryStrategy::Resign
        );
        assert_eq!(
            ApiErrorCode::InvalidSignature.recovery_strategy(),
            RecoveryStrategy::Fatal
        );
        assert!(matches!(
            ApiErrorCode::InsufficientBalance.recovery_strategy(),
            RecoveryStrategy::UserAction { .. }
        ));
    }

    #[test]
    fn test_initial_delay() {
        assert_eq!(
            RecoveryStrategy::rate_limit_backoff().initial_delay(),
            Some(Duration::from_secs(1))
        );
        assert_eq!(RecoveryStrategy::Fatal.initial_delay(), None);
    }

    #[test]
    fn test_auth_errors() {
        assert!(ApiErrorCode::InvalidSignature.is_auth_error());
        assert!(!ApiErrorCode::ServiceBusy.is_auth_error());
        assert_eq!(
            ApiErrorCode::InvalidSignature.to_string(),
            "Signature verification failed (4006)"
        );
    }
}
