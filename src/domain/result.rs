//! Result type alias for Assetport

use super::errors::AssetportError;

/// Result type alias for Assetport operations
///
/// # Examples
///
/// ```
/// use assetport::domain::result::Result;
/// use assetport::domain::errors::AssetportError;
///
/// fn failing_function() -> Result<()> {
///     Err(AssetportError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, AssetportError>;
