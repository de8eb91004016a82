use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};

use futures_util::future::{BoxFuture, FutureExt, Shared};
use rlookup_core::StoreError;

type Attempt<T> = Shared<BoxFuture<'static, Result<T, StoreError>>>;

/// Lazily produced, reusable value with at most one producing attempt in flight.
///
/// Callers arriving while an attempt runs await that same attempt. A failed
/// attempt is not remembered, so the next caller starts over.
pub struct SingleFlight<T> {
    slot: Mutex<Slot<T>>,
}

struct Slot<T> {
    ready: Option<T>,
    in_flight: Option<(u64, Attempt<T>)>,
    generation: u64,
}

impl<T> Default for SingleFlight<T> {
    fn default() -> Self {
        Self {
            slot: Mutex::new(Slot {
                ready: None,
                in_flight: None,
                generation: 0,
            }),
        }
    }
}

impl<T> SingleFlight<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached value while `is_usable` accepts it, otherwise join or start `connect`
    pub async fn get_or_connect<U, F, Fut>(&self, is_usable: U, connect: F) -> Result<T, StoreError>
    where
        U: Fn(&T) -> bool,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, StoreError>> + Send + 'static,
    {
        let (generation, attempt) = {
            let mut guard = self.lock();
            let slot = &mut *guard;

            if let Some(ready) = slot.ready.as_ref() {
                if is_usable(ready) {
                    return Ok(ready.clone());
                }
            }

            if let Some(in_flight) = slot.in_flight.clone() {
                in_flight
            } else {
                slot.ready = None;
                slot.generation += 1;
                let attempt = connect().boxed().shared();
                slot.in_flight = Some((slot.generation, attempt.clone()));
                (slot.generation, attempt)
            }
        };

        let result = attempt.await;

        let mut guard = self.lock();
        let slot = &mut *guard;
        if matches!(&slot.in_flight, Some((g, _)) if *g == generation) {
            slot.in_flight = None;
            if let Ok(value) = &result {
                slot.ready = Some(value.clone());
            }
        }

        result
    }

    fn lock(&self) -> MutexGuard<'_, Slot<T>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
