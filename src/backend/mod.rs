//! Code validation and leaderboard service client
//!
//! The service itself is external. This module owns the contract: request
//! shapes, how statuses map to errors, and (in the browser) the fetch calls.

pub mod api;
pub mod code;
pub mod error;
#[cfg(target_arch = "wasm32")]
pub mod http;

pub use api::{
    SubmitReceipt, SubmitScoreRequest, SubmitScoreResponse, ValidateCodeRequest,
    ValidateCodeResponse, interpret_listing, interpret_submission, interpret_validation,
};
pub use code::{CODE_PREFIX, RedemptionCode};
pub use error::{ApiError, ApiResult, ValidationError};
#[cfg(target_arch = "wasm32")]
pub use http::BackendClient;
