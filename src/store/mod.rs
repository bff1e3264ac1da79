pub mod effect;
pub mod publisher;

pub use effect::{Debouncer, Effect};
pub use publisher::Publisher;

use std::cell::RefCell;

use futures_util::future::LocalBoxFuture;
use futures_util::stream::FuturesUnordered;
use futures_util::StreamExt;

/// A state partition driven by dispatched actions.
pub trait Reducer {
    type Action: Clone + std::fmt::Debug + 'static;
    type State: 'static;
    type Environment;

    fn reduce(
        action: Self::Action,
        state: &mut Self::State,
        environment: &Self::Environment,
    ) -> Effect<'static, Self::Action>;

    fn initial_action() -> Option<Self::Action> {
        None
    }
}

/// Single-threaded action-dispatch container. Every mutation funnels through
/// [`Store::dispatch`]; each reduce step runs to completion before the next
/// one starts, and effect futures are suspended work that re-enters the
/// store as ordinary actions when they resolve.
pub struct Store<R: Reducer> {
    state: Publisher<R::State>,
    environment: R::Environment,
    sender: flume::Sender<R::Action>,
    receiver: flume::Receiver<R::Action>,
    tasks: RefCell<FuturesUnordered<LocalBoxFuture<'static, R::Action>>>,
}

impl<R: Reducer> Store<R> {
    pub fn new(state: R::State, environment: R::Environment) -> Self {
        let (sender, receiver) = flume::unbounded();
        let store = Self {
            state: Publisher::new(state),
            environment,
            sender,
            receiver,
            tasks: RefCell::new(FuturesUnordered::new()),
        };
        if let Some(action) = R::initial_action() {
            store.dispatch(action);
        }
        store
    }

    /// Cloneable handle for event sources that enqueue actions without a
    /// reference to the store. Queued actions run on the next `dispatch`
    /// or `run_until_settled`.
    pub fn sender(&self) -> flume::Sender<R::Action> {
        self.sender.clone()
    }

    pub fn environment(&self) -> &R::Environment {
        &self.environment
    }

    pub fn dispatch(&self, action: R::Action) {
        let _ = self.sender.send(action);
        self.drain();
    }

    pub fn subscribe(&self, key: impl Into<String>, subscriber: impl Fn() + 'static) {
        self.state.subscribe(key, subscriber);
    }

    pub fn unsubscribe(&self, key: &str) {
        self.state.unsubscribe(key);
    }

    pub fn with_state<T>(&self, f: impl FnOnce(&R::State) -> T) -> T {
        self.state.with(f)
    }

    /// Drive queued actions and their effects until no work remains.
    pub async fn run_until_settled(&self) {
        loop {
            self.drain();
            if self.tasks.borrow().is_empty() {
                if self.receiver.is_empty() {
                    return;
                }
                continue;
            }
            let finished =
                futures_util::future::poll_fn(|cx| self.tasks.borrow_mut().poll_next_unpin(cx))
                    .await;
            if let Some(action) = finished {
                let _ = self.sender.send(action);
            }
        }
    }

    fn drain(&self) {
        while let Ok(action) = self.receiver.try_recv() {
            let effect = self
                .state
                .with_mutation(|state| R::reduce(action, state, &self.environment));
            self.handle(effect);
        }
    }

    fn handle(&self, effect: Effect<'static, R::Action>) {
        match effect {
            Effect::Nothing => {}
            Effect::Action(action) => {
                let _ = self.sender.send(action);
            }
            Effect::Future(future) => {
                self.tasks.borrow_mut().push(future);
            }
            Effect::Merge(effects) => {
                for effect in effects {
                    self.handle(effect);
                }
            }
        }
    }
}
