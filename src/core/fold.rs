// Pure state reconstruction from an ordered list of stored events.
//
// Responsibilities
// - Replay events over an initial state with a per entity evolve function.
// - Never perform input or output and never touch the event list itself.

use crate::core::envelope::StoredEvent;

/// A state shape that can be rebuilt from the events of one stream.
///
/// `evolve` must be total: payload variants that do not concern the state are
/// returned unchanged.
pub trait Evolve<P>: Sized {
    fn initial() -> Self;

    fn evolve(self, event: &StoredEvent<P>) -> Self;
}

pub fn fold<'a, S, P, I, F>(initial: S, events: I, apply: F) -> S
where
    P: 'a,
    I: IntoIterator<Item = &'a StoredEvent<P>>,
    F: FnMut(S, &'a StoredEvent<P>) -> S,
{
    events.into_iter().fold(initial, apply)
}

/// Fold with the state's own `initial` and `evolve`.
pub fn replay<'a, S, P, I>(events: I) -> S
where
    S: Evolve<P>,
    P: 'a,
    I: IntoIterator<Item = &'a StoredEvent<P>>,
{
    fold(S::initial(), events, S::evolve)
}

#[cfg(test)]
mod fold_tests {
    use super::*;
    use crate::core::envelope::Event;
    use crate::core::stream::StreamId;
    use chrono::{TimeZone, Utc};
    use rstest::{fixture, rstest};

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum CounterEvent {
        Added(i64),
        Reset,
        Renamed(String),
    }

    #[derive(Debug, Clone, PartialEq, Eq, Default)]
    struct Counter {
        total: i64,
        applied: u64,
    }

    impl Evolve<CounterEvent> for Counter {
        fn initial() -> Self {
            Self::default()
        }

        fn evolve(self, event: &StoredEvent<CounterEvent>) -> Self {
            match event.payload() {
                CounterEvent::Added(n) => Counter {
                    total: self.total + n,
                    applied: self.applied + 1,
                },
                CounterEvent::Reset => Counter {
                    total: 0,
                    applied: self.applied + 1,
                },
                _ => self,
            }
        }
    }

    #[fixture]
    fn events() -> Vec<StoredEvent<CounterEvent>> {
        let at = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
        [
            CounterEvent::Added(5),
            CounterEvent::Renamed("ignored".into()),
            CounterEvent::Reset,
            CounterEvent::Added(2),
            CounterEvent::Added(3),
        ]
        .into_iter()
        .enumerate()
        .map(|(sequence, payload)| StoredEvent {
            stream_id: StreamId::new("counter", "1").unwrap(),
            sequence: sequence as u64,
            event: Event::new(payload, at),
        })
        .collect()
    }

    #[rstest]
    fn it_should_return_the_initial_state_for_no_events() {
        let state: Counter = replay(&Vec::<StoredEvent<CounterEvent>>::new());
        assert_eq!(state, Counter::initial());
    }

    #[rstest]
    fn it_should_fold_in_order_and_pass_through_unrelated_variants(
        events: Vec<StoredEvent<CounterEvent>>,
    ) {
        let state: Counter = replay(&events);
        assert_eq!(state, Counter { total: 5, applied: 4 });
    }

    #[rstest]
    fn it_should_be_deterministic(events: Vec<StoredEvent<CounterEvent>>) {
        let first: Counter = replay(&events);
        let second: Counter = replay(&events);
        assert_eq!(first, second);
    }

    #[rstest]
    fn it_should_accept_an_explicit_apply_function(events: Vec<StoredEvent<CounterEvent>>) {
        let count = fold(0usize, &events, |n, _| n + 1);
        assert_eq!(count, events.len());
    }
}
