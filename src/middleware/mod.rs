pub mod gate;
pub mod identity;
pub mod response;

pub use gate::request_gate;
pub use identity::{GateUser, MaybeGateUser, HEADER_USER_ID, HEADER_USER_ROLE};
pub use response::{ApiResponse, ApiResult};
