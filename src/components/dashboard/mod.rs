mod reducer;

pub use reducer::{reduce, Action, State};

use crate::environment::Environment;
use crate::store::{Effect, Reducer};

pub struct DashboardReducer;

impl Reducer for DashboardReducer {
    type Action = reducer::Action;
    type State = reducer::State;
    type Environment = Environment;

    fn reduce(
        action: Self::Action,
        state: &mut Self::State,
        environment: &Self::Environment,
    ) -> Effect<'static, Self::Action> {
        reducer::reduce(action, state, environment)
    }

    fn initial_action() -> Option<Self::Action> {
        Some(Action::Start)
    }
}
