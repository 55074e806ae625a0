use validator::Validate;

use crate::error::ApiError;

/// Resolve the `limit` query parameter of a recommendation request.
///
/// # Examples
/// ```
/// use ielts_api::validation::resolve_limit;
///
/// assert_eq!(resolve_limit(None, 20).unwrap(), 2);
/// assert!(resolve_limit(Some(0), 20).is_err());
/// ```
pub fn resolve_limit(limit: Option<usize>, max: usize) -> Result<usize, ApiError> {
    let limit = limit.unwrap_or(ielts_engine::recommend::DEFAULT_LIMIT);

    if limit == 0 || limit > max {
        return Err(ApiError::Validation(format!(
            "limit must be between 1 and {max}, got {limit}"
        )));
    }

    Ok(limit)
}

/// Run the `validator` rules of a request body.
pub fn validate_payload<T: Validate>(payload: &T) -> Result<(), ApiError> {
    payload
        .validate()
        .map_err(|e| ApiError::Validation(e.to_string()))
}
