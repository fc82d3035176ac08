use std::time::Duration;

use crate::config::RetryConfig;

/// Retry-relevant classification of a failed request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Connect or read timed out.
    Timeout,
    /// 429 or 503.
    Throttled,
    /// Connection refused/reset, DNS failure, empty reply.
    Connection,
    /// Other 5xx.
    Http5xx(u16),
    /// 4xx, malformed bodies, job failures: never retried.
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    NoRetry,
    RetryAfter(Duration),
}

/// Exponential backoff with an attempt cap and a delay cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Attempts per tick, including the first.
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(5),
        }
    }
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(cfg: &RetryConfig) -> Self {
        let max_delay = Duration::from_secs(cfg.max_delay_secs);
        // NaN and negatives become zero; infinite or oversized values clamp to the cap.
        let base_delay = if cfg.base_delay_secs.is_nan() || cfg.base_delay_secs <= 0.0 {
            Duration::ZERO
        } else {
            Duration::try_from_secs_f64(cfg.base_delay_secs)
                .unwrap_or(max_delay)
                .min(max_delay)
        };
        Self {
            max_attempts: cfg.max_attempts.max(1),
            base_delay,
            max_delay,
        }
    }
}

impl RetryPolicy {
    /// `attempt` is 1-based: the attempt that just failed.
    pub fn decide(&self, attempt: u32, kind: ErrorKind) -> RetryDecision {
        if attempt >= self.max_attempts {
            return RetryDecision::NoRetry;
        }
        match kind {
            ErrorKind::Other => RetryDecision::NoRetry,
            ErrorKind::Timeout
            | ErrorKind::Connection
            | ErrorKind::Throttled
            | ErrorKind::Http5xx(_) => {
                // base * 2^(attempt-1), exponent clamped so the multiply cannot overflow.
                let factor = 1u32 << attempt.saturating_sub(1).min(8);
                let delay = self.base_delay.saturating_mul(factor).min(self.max_delay);
                RetryDecision::RetryAfter(delay)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn delay(d: RetryDecision) -> Duration {
        match d {
            RetryDecision::RetryAfter(d) => d,
            RetryDecision::NoRetry => panic!("expected retry"),
        }
    }

    #[test]
    fn authoritative_errors_not_retried() {
        let p = RetryPolicy::default();
        assert_eq!(p.decide(1, ErrorKind::Other), RetryDecision::NoRetry);
    }

    #[test]
    fn backoff_doubles_until_capped() {
        let p = RetryPolicy {
            max_attempts: 20,
            base_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(5),
        };
        assert_eq!(delay(p.decide(1, ErrorKind::Connection)), Duration::from_millis(500));
        assert_eq!(delay(p.decide(2, ErrorKind::Connection)), Duration::from_secs(1));
        assert_eq!(delay(p.decide(3, ErrorKind::Http5xx(502))), Duration::from_secs(2));
        assert_eq!(delay(p.decide(12, ErrorKind::Timeout)), Duration::from_secs(5));
    }

    #[test]
    fn stops_at_max_attempts() {
        let p = RetryPolicy::default();
        assert!(matches!(
            p.decide(2, ErrorKind::Throttled),
            RetryDecision::RetryAfter(_)
        ));
        assert_eq!(p.decide(3, ErrorKind::Throttled), RetryDecision::NoRetry);
    }

    #[test]
    fn from_config_clamps_attempts() {
        let cfg = RetryConfig {
            max_attempts: 0,
            base_delay_secs: 0.25,
            max_delay_secs: 4,
        };
        let p = RetryPolicy::from(&cfg);
        assert_eq!(p.max_attempts, 1);
        assert_eq!(p.base_delay, Duration::from_millis(250));
        assert_eq!(p.max_delay, Duration::from_secs(4));
        assert_eq!(p.decide(1, ErrorKind::Timeout), RetryDecision::NoRetry);
    }

    #[test]
    fn from_config_clamps_unrepresentable_base_delay() {
        let mut cfg = RetryConfig {
            max_attempts: 3,
            base_delay_secs: f64::INFINITY,
            max_delay_secs: 8,
        };
        assert_eq!(RetryPolicy::from(&cfg).base_delay, Duration::from_secs(8));
        cfg.base_delay_secs = 1e300;
        assert_eq!(RetryPolicy::from(&cfg).base_delay, Duration::from_secs(8));
        cfg.base_delay_secs = f64::NAN;
        assert_eq!(RetryPolicy::from(&cfg).base_delay, Duration::ZERO);
        cfg.base_delay_secs = -2.0;
        assert_eq!(RetryPolicy::from(&cfg).base_delay, Duration::ZERO);
    }
}
