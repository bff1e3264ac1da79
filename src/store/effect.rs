use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures_util::future::LocalBoxFuture;

/// Cancellation handle for a scheduled [`Effect::debounce`]. Reducers keep
/// the handle of the last scheduled debounce in their state and cancel it
/// when a newer input supersedes it.
#[derive(Clone, Default)]
pub struct Debouncer {
    cancelled: Arc<AtomicBool>,
}

impl Debouncer {
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

impl std::fmt::Debug for Debouncer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Debouncer")
            .field(&self.is_cancelled())
            .finish()
    }
}

/// What a reducer wants to happen after its mutation step: nothing, another
/// action, a future resolving to an action, or a combination.
pub enum Effect<'a, Action> {
    Nothing,
    Action(Action),
    Future(LocalBoxFuture<'a, Action>),
    Merge(Vec<Effect<'a, Action>>),
}

impl<'a, Action: 'a> Effect<'a, Action> {
    pub const NONE: Self = Effect::Nothing;

    pub fn action(action: Action) -> Self {
        Effect::Action(action)
    }

    pub fn future<T, F, M>(future: F, map: M) -> Self
    where
        F: Future<Output = T> + 'a,
        M: FnOnce(T) -> Action + 'a,
    {
        Effect::Future(Box::pin(async move { map(future.await) }))
    }

    /// Run `future` after `delay` of quiet time. A cancelled debounce still
    /// delivers its action, carrying `None` instead of the future's output.
    pub fn debounce<T, F, M>(future: F, map: M, delay: Duration, debouncer: Debouncer) -> Self
    where
        F: Future<Output = T> + 'a,
        M: FnOnce(Option<T>) -> Action + 'a,
    {
        Effect::Future(Box::pin(async move {
            tokio::time::sleep(delay).await;
            if debouncer.is_cancelled() {
                return map(None);
            }
            map(Some(future.await))
        }))
    }

    pub fn merge2(a: Self, b: Self) -> Self {
        Effect::Merge(vec![a, b])
    }

    pub fn merge3(a: Self, b: Self, c: Self) -> Self {
        Effect::Merge(vec![a, b, c])
    }

    pub fn merge4(a: Self, b: Self, c: Self, d: Self) -> Self {
        Effect::Merge(vec![a, b, c, d])
    }

    /// Lift this effect into a parent action space.
    pub fn map<B, F>(self, map: F) -> Effect<'a, B>
    where
        B: 'a,
        F: Fn(Action) -> B + Clone + 'a,
    {
        match self {
            Effect::Nothing => Effect::Nothing,
            Effect::Action(action) => Effect::Action(map(action)),
            Effect::Future(future) => Effect::Future(Box::pin(async move { map(future.await) })),
            Effect::Merge(effects) => Effect::Merge(
                effects
                    .into_iter()
                    .map(|effect| effect.map(map.clone()))
                    .collect(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debouncer_cancel() {
        let debouncer = Debouncer::default();
        assert!(!debouncer.is_cancelled());
        let other = debouncer.clone();
        other.cancel();
        assert!(debouncer.is_cancelled());
    }

    #[tokio::test]
    async fn test_future_effect_maps_output() {
        let effect = Effect::future(async { 2 + 2 }, |n: i32| n * 10);
        let Effect::Future(future) = effect else {
            panic!("expected a future effect");
        };
        assert_eq!(future.await, 40);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_debounce_delivers_none() {
        let debouncer = Debouncer::default();
        let effect = Effect::debounce(
            async { 7 },
            |value: Option<i32>| value,
            Duration::from_millis(300),
            debouncer.clone(),
        );
        debouncer.cancel();
        let Effect::Future(future) = effect else {
            panic!("expected a future effect");
        };
        assert_eq!(future.await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_live_debounce_runs_future() {
        let effect = Effect::debounce(
            async { 7 },
            |value: Option<i32>| value,
            Duration::from_millis(300),
            Debouncer::default(),
        );
        let Effect::Future(future) = effect else {
            panic!("expected a future effect");
        };
        assert_eq!(future.await, Some(7));
    }

    #[test]
    fn test_map_lifts_nested_actions() {
        let effect = Effect::merge2(Effect::action(1), Effect::action(2)).map(|n: i32| n + 10);
        let Effect::Merge(effects) = effect else {
            panic!("expected a merge");
        };
        let actions: Vec<i32> = effects
            .into_iter()
            .map(|effect| match effect {
                Effect::Action(a) => a,
                _ => panic!("expected plain actions"),
            })
            .collect();
        assert_eq!(actions, vec![11, 12]);
    }
}
