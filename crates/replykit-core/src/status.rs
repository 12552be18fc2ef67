// Rust guideline compliant 2026-10-16

//! Canonical status families.

/// The fixed status families exposed by the adapters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusKind {
    /// 200.
    Ok,
    /// 201.
    Created,
    /// 202.
    Accepted,
    /// 204, never carries data.
    NoContent,
    /// 400.
    BadRequest,
    /// 401.
    Unauthorized,
    /// 403.
    Forbidden,
    /// 404.
    NotFound,
    /// 409.
    Conflict,
    /// 422.
    UnprocessableEntity,
    /// 429.
    TooManyRequests,
    /// 500.
    InternalServerError,
}

impl StatusKind {
    /// Every family, in status order.
    pub const ALL: [StatusKind; 12] = [
        Self::Ok,
        Self::Created,
        Self::Accepted,
        Self::NoContent,
        Self::BadRequest,
        Self::Unauthorized,
        Self::Forbidden,
        Self::NotFound,
        Self::Conflict,
        Self::UnprocessableEntity,
        Self::TooManyRequests,
        Self::InternalServerError,
    ];

    /// Status code.
    #[must_use]
    pub const fn code(self) -> u16 {
        match self {
            Self::Ok => 200,
            Self::Created => 201,
            Self::Accepted => 202,
            Self::NoContent => 204,
            Self::BadRequest => 400,
            Self::Unauthorized => 401,
            Self::Forbidden => 403,
            Self::NotFound => 404,
            Self::Conflict => 409,
            Self::UnprocessableEntity => 422,
            Self::TooManyRequests => 429,
            Self::InternalServerError => 500,
        }
    }

    /// Message used when the caller supplies none.
    #[must_use]
    pub const fn default_message(self) -> &'static str {
        match self {
            Self::Ok => "Success",
            Self::Created => "Created successfully",
            Self::Accepted => "Accepted",
            Self::NoContent => "No content",
            Self::BadRequest => "Bad request",
            Self::Unauthorized => "Unauthorized",
            Self::Forbidden => "Forbidden",
            Self::NotFound => "Not found",
            Self::Conflict => "Conflict",
            Self::UnprocessableEntity => "Unprocessable entity",
            Self::TooManyRequests => "Too many requests",
            Self::InternalServerError => "Internal server error",
        }
    }

    /// Success flag.
    #[must_use]
    pub const fn is_success(self) -> bool {
        self.code() < 400
    }

    /// Looks up the family for a status code.
    #[must_use]
    pub fn from_code(code: u16) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.code() == code)
    }
}

/// Default message for an arbitrary status code.
#[must_use]
pub fn default_message_for(code: u16) -> &'static str {
    match StatusKind::from_code(code) {
        Some(kind) => kind.default_message(),
        None if code >= 500 => StatusKind::InternalServerError.default_message(),
        None if code >= 400 => "Request failed",
        None => StatusKind::Ok.default_message(),
    }
}

/// Returns true for codes below 400.
#[must_use]
pub fn is_success_code(code: u16) -> bool {
    code < 400
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_round_trips_codes() {
        for kind in StatusKind::ALL {
            assert_eq!(StatusKind::from_code(kind.code()), Some(kind));
        }
    }

    #[test]
    fn test_success_flags() {
        assert!(StatusKind::NoContent.is_success());
        assert!(!StatusKind::BadRequest.is_success());
        assert!(!StatusKind::InternalServerError.is_success());
    }

    #[test]
    fn test_default_message_fallbacks() {
        assert_eq!(default_message_for(404), "Not found");
        assert_eq!(default_message_for(418), "Request failed");
        assert_eq!(default_message_for(503), "Internal server error");
        assert_eq!(default_message_for(206), "Success");
    }
}
