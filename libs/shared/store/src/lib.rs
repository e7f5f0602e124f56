pub mod seq;
pub mod store;

pub use seq::{FetchGate, FetchSeq};
pub use store::{Dispatch, Reducer, Store};
