use crate::api::errors::ApiError;
use crate::schemas::inventory::LooseId;

/// Path IDs that are not positive integers cannot name an item, so they read as "not found".
pub(crate) fn parse_item_id(raw: &str) -> Result<u64, ApiError> {
    parse_digits(raw.trim()).filter(|id| *id > 0).ok_or_else(ApiError::item_not_found)
}

/// Any non-negative integer is a well-formed search ID; `0` simply matches nothing.
pub(crate) fn parse_search_id(id: Option<&LooseId>) -> Result<u64, ApiError> {
    let parsed = match id {
        Some(LooseId::Number(value)) => u64::try_from(*value).ok(),
        Some(LooseId::Text(value)) => parse_digits(value.trim()),
        None => None,
    };
    parsed.ok_or_else(|| ApiError::BadRequest("Invalid ID for search".to_string()))
}

fn parse_digits(value: &str) -> Option<u64> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    value.parse::<u64>().ok()
}
