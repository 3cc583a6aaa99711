//! Scenario state and runtime/server initialisation for the issue
//! synchronisation BDD tests.

use std::cell::RefCell;
use std::rc::Rc;

use gitlab_mirror::Event;
use gitlab_mirror::gitlab::Issue;
use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;
use tokio::runtime::Runtime;
use wiremock::{Mock, MockServer};

/// Shared runtime wrapper that can be stored in an `rstest-bdd` Slot.
#[derive(Clone)]
pub(crate) struct SharedRuntime(Rc<RefCell<Runtime>>);

impl SharedRuntime {
    fn new(runtime: Runtime) -> Self {
        Self(Rc::new(RefCell::new(runtime)))
    }

    pub(crate) fn block_on<F: std::future::Future>(&self, future: F) -> F::Output {
        self.0.borrow().block_on(future)
    }
}

#[derive(ScenarioState, Default)]
pub(crate) struct SyncState {
    pub(crate) runtime: Slot<SharedRuntime>,
    pub(crate) server: Slot<MockServer>,
    pub(crate) issues: Slot<Vec<Issue>>,
    pub(crate) events: Slot<Vec<Event>>,
}

/// Ensures a multi-threaded runtime and a mock server exist.
pub(crate) fn ensure_runtime_and_server(sync_state: &SyncState) -> SharedRuntime {
    if sync_state.runtime.with_ref(|_| ()).is_none() {
        let runtime = Runtime::new()
            .unwrap_or_else(|error| panic!("failed to create Tokio runtime: {error}"));
        sync_state.runtime.set(SharedRuntime::new(runtime));
    }

    let shared_runtime = sync_state
        .runtime
        .get()
        .unwrap_or_else(|| panic!("runtime not initialised after set"));

    if sync_state.server.with_ref(|_| ()).is_none() {
        sync_state
            .server
            .set(shared_runtime.block_on(MockServer::start()));
    }

    shared_runtime
}

/// Mounts `mock` on the scenario's server.
pub(crate) fn mount(sync_state: &SyncState, mock: Mock) {
    let runtime = ensure_runtime_and_server(sync_state);
    sync_state
        .server
        .with_ref(|server| {
            runtime.block_on(mock.mount(server));
        })
        .unwrap_or_else(|| panic!("mock server not initialised"));
}
