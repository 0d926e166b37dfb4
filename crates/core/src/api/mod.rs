mod error;
mod http_mapping;
mod requests;
mod responses;

pub use error::ApiError;
pub use http_mapping::api_error_to_status_code;
pub use requests::{Operation, OperationRequest};
pub use responses::{MutationOutcome, MutationResponse, UserView};
