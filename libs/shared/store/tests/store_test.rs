use shared_store::{Dispatch, Reducer, Store};

#[derive(Clone, Default, PartialEq, Debug)]
struct Counter {
    value: i64,
    history: Vec<i64>,
}

#[derive(Debug)]
enum CounterAction {
    Add(i64),
    Reset,
}

impl Reducer for Counter {
    type Action = CounterAction;

    fn reduce(&mut self, action: CounterAction) {
        match action {
            CounterAction::Add(n) => {
                self.value += n;
                self.history.push(self.value);
            }
            CounterAction::Reset => {
                self.value = 0;
                self.history.push(0);
            }
        }
    }
}

#[tokio::test]
async fn applies_actions_in_dispatch_order() {
    let store = Store::spawn(Counter::default());

    store.dispatch(CounterAction::Add(1));
    store.dispatch(CounterAction::Add(10));
    store.dispatch(CounterAction::Reset);
    store.dispatch(CounterAction::Add(5));
    store.flush().await;

    let state = store.state();
    assert_eq!(state.value, 5);
    assert_eq!(state.history, vec![1, 11, 0, 5]);
}

#[tokio::test]
async fn snapshots_are_observable_through_subscribe() {
    let store = Store::spawn(Counter::default());
    let mut updates = store.subscribe();

    store.dispatch(CounterAction::Add(7));
    updates.changed().await.expect("store task alive");

    assert_eq!(updates.borrow().value, 7);
}

#[tokio::test]
async fn clones_share_the_same_queue() {
    let store = Store::spawn(Counter::default());
    let other = store.clone();

    store.dispatch(CounterAction::Add(2));
    other.dispatch(CounterAction::Add(3));
    store.flush().await;

    assert_eq!(other.state().value, 5);
}
