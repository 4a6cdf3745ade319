//! User-facing error strings shared across resources

pub const MISSING_ACTION_OR_SEQ_BODY_ERROR: &str =
    "Missing mandatory action or sequence parameter from options.";
pub const INVALID_ACTION_AND_SEQ_PARAMETERS: &str =
    "Invalid options parameters, contains both \"action\" and \"sequence\" parameters in options.";
pub const INVALID_SEQ_PARAMETER: &str =
    "Invalid options parameter, \"sequence\" must be an array of action names.";
pub const INVALID_SEQ_PARAMETER_LENGTH: &str =
    "Invalid options parameter, \"sequence\" must contain at least one action.";

pub const MISSING_NAME_ERROR: &str = "Missing mandatory name parameter from options.";

pub const MISSING_URL_ERROR: &str = "missing api host";
pub const MISSING_AUTH_ERROR: &str = "missing api key";
pub const INVALID_AUTH_ERROR: &str = "api key must use the \"user:password\" format";
