//! Order numbering
//!
//! Monotonically increasing order numbers that restart at 1 when the
//! business date changes. The clock is injected so the reset rule can be
//! tested without waiting for midnight.

use std::{
    fmt,
    sync::{Mutex, PoisonError},
};

use jiff::{Zoned, civil::Date};
use tracing::debug;

/// Source of the current business date.
pub trait Clock {
    /// The current civil date in the till's local time zone.
    fn today(&self) -> Date;
}

/// Clock backed by the system time zone.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> Date {
        Zoned::now().date()
    }
}

/// A per-day order number such as `ORD-20260826-0004`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OrderNumber {
    date: Date,
    seq: u32,
}

impl OrderNumber {
    /// The business date the number was issued on.
    #[must_use]
    pub fn date(&self) -> Date {
        self.date
    }

    /// The position within the day, starting at 1.
    #[must_use]
    pub fn seq(&self) -> u32 {
        self.seq
    }
}

impl fmt::Display for OrderNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ORD-{:04}{:02}{:02}-{:04}",
            self.date.year(),
            self.date.month(),
            self.date.day(),
            self.seq
        )
    }
}

#[derive(Debug)]
struct DayState {
    date: Date,
    next: u32,
}

/// Hands out order numbers, restarting the counter each day.
///
/// Safe to share between threads; the counter state lives behind a mutex
/// and a poisoned lock is recovered rather than propagated, since the
/// state is a pair of plain integers that cannot be left half-written.
#[derive(Debug)]
pub struct OrderSequence<C = SystemClock> {
    clock: C,
    state: Mutex<DayState>,
}

impl OrderSequence<SystemClock> {
    /// A sequence driven by the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for OrderSequence<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> OrderSequence<C> {
    /// A sequence driven by the supplied clock.
    pub fn with_clock(clock: C) -> Self {
        let date = clock.today();

        OrderSequence {
            clock,
            state: Mutex::new(DayState { date, next: 1 }),
        }
    }

    /// Issues the next order number.
    ///
    /// Numbers within a day are strictly increasing; the first number
    /// issued after a date change is that day's `0001`.
    pub fn next_number(&self) -> OrderNumber {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let today = self.clock.today();

        if state.date != today {
            debug!(%today, "order sequence rolled over to a new day");

            state.date = today;
            state.next = 1;
        }

        let number = OrderNumber {
            date: state.date,
            seq: state.next,
        };

        state.next = state.next.saturating_add(1);

        number
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use jiff::civil::date;

    use super::*;

    struct FixedClock(Cell<Date>);

    impl FixedClock {
        fn at(value: Date) -> Self {
            FixedClock(Cell::new(value))
        }

        fn advance_to(&self, value: Date) {
            self.0.set(value);
        }
    }

    impl Clock for &FixedClock {
        fn today(&self) -> Date {
            self.0.get()
        }
    }

    #[test]
    fn numbers_increase_within_a_day() {
        let clock = FixedClock::at(date(2026, 8, 26));
        let sequence = OrderSequence::with_clock(&clock);

        let first = sequence.next_number();
        let second = sequence.next_number();

        assert_eq!(first.seq(), 1);
        assert_eq!(second.seq(), 2);
        assert_eq!(first.date(), second.date());
    }

    #[test]
    fn counter_resets_on_a_date_change() {
        let clock = FixedClock::at(date(2026, 8, 26));
        let sequence = OrderSequence::with_clock(&clock);

        let _issued = sequence.next_number();
        let _issued = sequence.next_number();

        clock.advance_to(date(2026, 8, 27));

        let rolled = sequence.next_number();

        assert_eq!(rolled.seq(), 1);
        assert_eq!(rolled.date(), date(2026, 8, 27));
    }

    #[test]
    fn display_pads_date_and_sequence() {
        let clock = FixedClock::at(date(2026, 8, 26));
        let sequence = OrderSequence::with_clock(&clock);

        assert_eq!(sequence.next_number().to_string(), "ORD-20260826-0001");
    }

    #[test]
    fn system_clock_sequence_starts_at_one() {
        let sequence = OrderSequence::new();

        assert_eq!(sequence.next_number().seq(), 1);
    }
}
