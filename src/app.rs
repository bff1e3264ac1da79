use crate::components::dashboard::{DashboardReducer, State};
use crate::environment::mock::MockContentProvider;
use crate::environment::{Environment, Provider};
use crate::store::Store;

/// Boot a dashboard session against the built-in synthetic provider:
/// initialize logging, create the store and drive it until the initial feed
/// and trending loads have settled. An embedding shell builds its own store
/// the same way and keeps dispatching user actions into it.
pub fn run() {
    use env_logger::Env;
    use std::io::Write;
    env_logger::Builder::from_env(Env::default().default_filter_or("debug"))
        .format(|buf, record| {
            writeln!(
                buf,
                "{}:{} {} [{}] - {}",
                record.file().unwrap_or("unknown"),
                record.line().unwrap_or(0),
                chrono::Local::now().format("%Y-%m-%dT%H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .target(env_logger::Target::Stdout)
        .init();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("Expect to be able to start the session runtime");

    runtime.block_on(async {
        let environment = Environment::new(Provider::new(MockContentProvider::default()));
        let store = Store::<DashboardReducer>::new(State::default(), environment);
        store.subscribe("session", || log::trace!("state changed"));
        store.run_until_settled().await;
        store.with_state(|state| {
            log::info!(
                "session ready: {} feed items, {} trending, active tab {}",
                state.content.items().len(),
                state.content.trending().len(),
                state.ui.active_tab
            );
        });
    });
}
