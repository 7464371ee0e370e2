pub mod client;
pub mod sheets;
pub mod sink;
pub mod source;
pub mod webhook;

pub use self::{
    sink::RecordSink,
    source::{ChargeLogSource, FetchMode},
};
