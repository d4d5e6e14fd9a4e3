#[macro_use]
pub mod enums;
pub mod pagination;
pub mod query;
pub mod response;

pub use pagination::{PaginatedResponse, PaginationInfo, PaginationQuery};
pub use query::deserialize_optional_parsed;
pub use response::ApiResponse;
