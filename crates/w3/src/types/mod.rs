//! Call, filter and response types

mod access_list;
mod block;
mod filter;
mod log;
mod message;
mod state;

pub use access_list::{AccessList, AccessListEntry, AccessListResponse};
pub use block::BlockNumber;
pub use filter::FilterQuery;
pub use log::Log;
pub use message::{Message, ResolvedMessage};
pub use state::{Account, State};
