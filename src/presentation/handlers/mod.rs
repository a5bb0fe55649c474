mod add;
mod check;
mod error;
mod fallback;
mod health;
mod help;
mod image;
mod info;

pub use add::{AddRequest, AddResponse, add_handler, add_query_handler};
pub use check::{CheckResponse, JobQuery, check_handler};
pub use error::{ApiError, ErrorResponse, parse_job_id};
pub use fallback::{method_not_allowed_handler, not_found_handler, panic_response};
pub use health::{HealthResponse, health_handler};
pub use help::{help_handler, root_handler};
pub use image::image_handler;
pub use info::{ErrorBody, InfoResponse, ResultBody, info_handler};
