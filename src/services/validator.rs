use super::error::ServiceError;

pub const TITLE_MAX_LENGTH: usize = 50;
pub const DESCRIPTION_MAX_LENGTH: usize = 500;

/// Lengths count characters, not bytes
pub fn validate_title(title: &str) -> Result<(), ServiceError> {
    let length = title.chars().count();
    if length < 1 || length > TITLE_MAX_LENGTH {
        return Err(ServiceError::bad_request(format!(
            "length of title must be 1 to {}, but {}",
            TITLE_MAX_LENGTH, length
        )));
    }
    Ok(())
}

pub fn validate_description(description: &str) -> Result<(), ServiceError> {
    let length = description.chars().count();
    if length > DESCRIPTION_MAX_LENGTH {
        return Err(ServiceError::bad_request(format!(
            "length of description must be at most {}, but {}",
            DESCRIPTION_MAX_LENGTH, length
        )));
    }
    Ok(())
}

pub fn parse_id(raw: &str) -> Result<i64, ServiceError> {
    raw.parse::<i64>()
        .map_err(|_| ServiceError::bad_request(format!("id must be integer, but {}", raw)))
}
