//! Bounded retrying of single bus transactions and the bit arithmetic used by
//! read-modify-write updates.

use crate::lp5024::LP5024Error;

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::{Error, ErrorKind};

pub const DEFAULT_MAX_ATTEMPTS: u8 = 4;
pub const DEFAULT_ATTEMPT_DELAY_MS: u32 = 10;

/// How often a bus transaction is attempted before giving up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub struct RetryPolicy {
    /// Total attempts including the first one. Zero behaves like one.
    pub max_attempts: u8,
    /// Wait between two consecutive attempts.
    pub attempt_delay_ms: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            attempt_delay_ms: DEFAULT_ATTEMPT_DELAY_MS,
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u8, attempt_delay_ms: u32) -> Self {
        Self {
            max_attempts,
            attempt_delay_ms,
        }
    }
}

/// Whether a failed transaction is worth attempting again.
///
/// A missing acknowledge or a lost arbitration means the device or the bus
/// was busy; anything else points at a broken bus.
pub fn is_transient(kind: ErrorKind) -> bool {
    matches!(kind, ErrorKind::NoAcknowledge(_) | ErrorKind::ArbitrationLoss)
}

/// Run `operation` until it succeeds, fails fatally, or the attempt budget of
/// `policy` is spent. `delay` is only used between attempts.
pub fn with_retry<T, E, D, F>(
    policy: &RetryPolicy,
    delay: &mut D,
    mut operation: F,
) -> Result<T, LP5024Error>
where
    E: Error,
    D: DelayNs,
    F: FnMut() -> Result<T, E>,
{
    let attempts = policy.max_attempts.max(1);
    let mut attempt = 1;

    loop {
        let kind = match operation() {
            Ok(value) => return Ok(value),
            Err(e) => e.kind(),
        };

        if !is_transient(kind) {
            #[cfg(feature = "defmt-03")]
            defmt::warn!("bus transaction failed fatally: {}", kind);
            return Err(LP5024Error::Fatal(kind));
        }

        if attempt >= attempts {
            #[cfg(feature = "defmt-03")]
            defmt::warn!("bus still busy after {} attempts: {}", attempt, kind);
            return Err(LP5024Error::Busy(kind));
        }

        #[cfg(feature = "defmt-03")]
        defmt::debug!("attempt {}/{} busy: {}", attempt, attempts, kind);

        delay.delay_ms(policy.attempt_delay_ms);
        attempt += 1;
    }
}

/// Replace the bits selected by `mask` in `current` with `value`, which is
/// given right-aligned and shifted into the position of the mask.
pub fn merge_bits(current: u8, mask: u8, value: u8) -> u8 {
    let shift = mask.trailing_zeros();
    let shifted = value.checked_shl(shift).unwrap_or(0);

    (current & !mask) | (shifted & mask)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    use embedded_hal::i2c::NoAcknowledgeSource;

    const BUSY: ErrorKind =
        ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address);

    #[test]
    fn merge_bits_test() {
        assert_eq!(merge_bits(0b1111_1111, 0b0000_0100, 0), 0b1111_1011);
        assert_eq!(merge_bits(0b0000_0000, 0b0000_0100, 1), 0b0000_0100);
        assert_eq!(merge_bits(0b1010_0101, 0b0011_0000, 0b10), 0b1010_0101);
        assert_eq!(merge_bits(0b1010_0101, 0b0011_0000, 0b01), 0b1001_0101);
        // Value bits beyond the mask are dropped
        assert_eq!(merge_bits(0b0000_0000, 0b0000_0010, 0b11), 0b0000_0010);
        assert_eq!(merge_bits(0x5a, 0x00, 0xff), 0x5a);
    }

    #[test]
    fn merge_bits_leaves_other_bits_test() {
        for current in 0..=u8::MAX {
            for bit in 0..8 {
                let mask = 1 << bit;
                for value in 0..=1 {
                    let merged = merge_bits(current, mask, value);
                    assert_eq!(merged & !mask, current & !mask);
                    assert_eq!((merged & mask) >> bit, value);
                }
            }
        }
    }

    #[test]
    fn transient_classification_test() {
        assert!(is_transient(BUSY));
        assert!(is_transient(ErrorKind::ArbitrationLoss));
        assert!(!is_transient(ErrorKind::Bus));
        assert!(!is_transient(ErrorKind::Overrun));
        assert!(!is_transient(ErrorKind::Other));
    }

    #[test]
    fn succeeds_after_busy_attempts_test() {
        let mut delay = FakeDelay::new();
        let mut calls = 0;

        let result = with_retry(&RetryPolicy::default(), &mut delay, || {
            calls += 1;
            if calls < 3 {
                Err(FakeI2cError(BUSY))
            } else {
                Ok(calls)
            }
        });

        assert_eq!(result, Ok(3));
        assert_eq!(delay.delays_ms.as_slice(), &[10, 10]);
    }

    #[test]
    fn exhausted_budget_test() {
        let mut delay = FakeDelay::new();
        let mut calls = 0;

        let result: Result<(), _> =
            with_retry(&RetryPolicy::new(4, 7), &mut delay, || {
                calls += 1;
                Err(FakeI2cError(ErrorKind::ArbitrationLoss))
            });

        assert_eq!(result, Err(LP5024Error::Busy(ErrorKind::ArbitrationLoss)));
        assert_eq!(calls, 4);
        assert_eq!(delay.delays_ms.as_slice(), &[7, 7, 7]);
    }

    #[test]
    fn fatal_error_stops_retrying_test() {
        let mut delay = FakeDelay::new();
        let mut calls = 0;

        let result: Result<(), _> =
            with_retry(&RetryPolicy::default(), &mut delay, || {
                calls += 1;
                if calls == 1 {
                    Err(FakeI2cError(BUSY))
                } else {
                    Err(FakeI2cError(ErrorKind::Bus))
                }
            });

        assert_eq!(result, Err(LP5024Error::Fatal(ErrorKind::Bus)));
        assert_eq!(calls, 2);
        assert_eq!(delay.delays_ms.as_slice(), &[10]);
    }

    #[test]
    fn zero_attempts_still_tries_once_test() {
        let mut delay = FakeDelay::new();
        let mut calls = 0;

        let result: Result<(), _> =
            with_retry(&RetryPolicy::new(0, 10), &mut delay, || {
                calls += 1;
                Err(FakeI2cError(BUSY))
            });

        assert_eq!(result, Err(LP5024Error::Busy(BUSY)));
        assert_eq!(calls, 1);
        assert!(delay.delays_ms.is_empty());
    }
}
