pub mod ai;
pub mod improve;
pub mod settings;

pub use ai::{
    ApiKind, DispatchCallback, DispatchError, DispatchResult, Dispatcher, EndpointConfig,
    DEFAULT_TIMEOUT_SECS,
};
pub use improve::{ImproveService, ImprovedPrompt, TaskType};
