use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, warn};

/// A state slice (or a composition of slices) with a pure transition
/// function. All mutation happens inside the reducer; nothing outside
/// the store task ever holds `&mut` state.
pub trait Reducer: Clone + Send + Sync + 'static {
    type Action: Send + 'static;

    fn reduce(&mut self, action: Self::Action);
}

/// Dispatch seam between async operations and a store. Ops are written
/// against `Dispatch<CellAction>`, so they run unchanged against the
/// composed application store or a single-slice store in tests.
pub trait Dispatch<A>: Send + Sync {
    fn dispatch(&self, action: A);
}

enum Msg<A> {
    Action(A),
    Barrier(oneshot::Sender<()>),
}

/// Single-writer store: actions flow through an unbounded FIFO queue
/// into one reducer task that owns the state; every applied action
/// publishes a fresh snapshot through a watch channel. The queue is
/// the client's one concurrency-safety mechanism: reducers observe
/// actions strictly in dispatch order.
pub struct Store<R: Reducer> {
    tx: mpsc::UnboundedSender<Msg<R::Action>>,
    snapshot: watch::Receiver<R>,
}

impl<R: Reducer> Clone for Store<R> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
            snapshot: self.snapshot.clone(),
        }
    }
}

impl<R: Reducer> Store<R> {
    pub fn spawn(initial: R) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<Msg<R::Action>>();
        let (watch_tx, watch_rx) = watch::channel(initial.clone());

        tokio::spawn(async move {
            let mut state = initial;
            while let Some(msg) = rx.recv().await {
                match msg {
                    Msg::Action(action) => {
                        state.reduce(action);
                        if watch_tx.send(state.clone()).is_err() {
                            debug!("All store subscribers dropped");
                        }
                    }
                    Msg::Barrier(ack) => {
                        let _ = ack.send(());
                    }
                }
            }
            debug!("Store command queue closed, reducer task exiting");
        });

        Self { tx, snapshot: watch_rx }
    }

    /// Latest published snapshot.
    pub fn state(&self) -> R {
        self.snapshot.borrow().clone()
    }

    /// Subscribe to snapshot updates (one per applied action).
    pub fn subscribe(&self) -> watch::Receiver<R> {
        self.snapshot.clone()
    }

    /// Wait until every action dispatched before this call has been
    /// applied. Dispatch itself is fire-and-forget; tests and shutdown
    /// paths use the barrier for deterministic observation.
    pub async fn flush(&self) {
        let (ack_tx, ack_rx) = oneshot::channel();
        if self.tx.send(Msg::Barrier(ack_tx)).is_err() {
            return;
        }
        let _ = ack_rx.await;
    }
}

impl<R, A> Dispatch<A> for Store<R>
where
    R: Reducer,
    R::Action: From<A>,
    A: Send,
{
    fn dispatch(&self, action: A) {
        if self.tx.send(Msg::Action(action.into())).is_err() {
            warn!("Dispatch after store shutdown, action dropped");
        }
    }
}
