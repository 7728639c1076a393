pub mod a2a;

pub use a2a::{A2aRequest, A2aResponse, Message, MessagePart, PartKind, Role, RpcError};
