mod model;
mod routes;

pub use model::{MAX_REVIEW_ANSWERS, ReviewAnswer, ReviewRequest, ReviewSummary};
pub use routes::routes;
