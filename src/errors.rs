use actix_web::http::{header::ContentType, StatusCode};
use actix_web::{error::ResponseError, HttpResponse};
use derive_more::Display;

use crate::views;

/// The submitted field that failed to parse
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum InvalidInput {
    #[display(fmt = "Invalid table id")]
    TableId,

    #[display(fmt = "Invalid number of guests")]
    GuestCount,

    #[display(fmt = "Invalid date format, use YYYY-MM-DDTHH:MM")]
    DateFormat,

    #[display(fmt = "The {} field is required", _0)]
    MissingContact(&'static str),
}

#[derive(Debug, Display, PartialEq)]
pub enum ServiceError {
    #[display(fmt = "Internal Server Error")]
    InternalServerError,

    #[display(fmt = "Unable to render the page")]
    RenderFailure,

    #[display(fmt = "BadRequest: {}", _0)]
    BadRequest(String),

    #[display(fmt = "{}", _0)]
    InvalidInput(InvalidInput),

    #[display(fmt = "The date must be in the future")]
    DateInPast,

    #[display(fmt = "This table is already booked for the selected time")]
    SlotAlreadyBooked,

    #[display(fmt = "Not Found: {}", _0)]
    NotFound(String),
}

impl ServiceError {
    /// The message shown to the visitor
    fn user_message(&self) -> String {
        match self {
            ServiceError::InternalServerError => "Internal Server Error, Please try later".into(),
            ServiceError::RenderFailure => "Unable to render the page, Please try later".into(),
            ServiceError::BadRequest(ref message) => message.clone(),
            ServiceError::NotFound(ref message) => message.clone(),
            _ => self.to_string(),
        }
    }
}

impl From<InvalidInput> for ServiceError {
    fn from(input: InvalidInput) -> ServiceError {
        ServiceError::InvalidInput(input)
    }
}

// impl ResponseError trait allows to convert our errors into http responses with appropriate data
impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::InternalServerError | ServiceError::RenderFailure => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ServiceError::BadRequest(_)
            | ServiceError::InvalidInput(_)
            | ServiceError::DateInPast => StatusCode::BAD_REQUEST,
            ServiceError::SlotAlreadyBooked => StatusCode::CONFLICT,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = self.user_message();
        let mut response = HttpResponse::build(self.status_code());

        match views::error_page(&message) {
            Ok(page) => response.content_type(ContentType::html()).body(page),
            Err(_) => response.content_type(ContentType::plaintext()).body(message),
        }
    }
}

impl From<sqlx::Error> for ServiceError {
    fn from(error: sqlx::Error) -> ServiceError {
        match error {
            sqlx::Error::RowNotFound => ServiceError::NotFound("Not Found".to_string()),
            sqlx::Error::Database(ref info) if info.is_unique_violation() => {
                debug!("unique violation: {}", info);
                ServiceError::SlotAlreadyBooked
            }
            sqlx::Error::Database(ref info) if info.is_foreign_key_violation() => {
                debug!("foreign key violation: {}", info);
                ServiceError::NotFound("Table not found".to_string())
            }
            _ => {
                error!("db error: {}", error);
                ServiceError::InternalServerError
            }
        }
    }
}

impl From<std::fmt::Error> for ServiceError {
    fn from(error: std::fmt::Error) -> ServiceError {
        error!("unable to render view: {}", error);
        ServiceError::RenderFailure
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes() {
        let cases = vec![
            (ServiceError::InvalidInput(InvalidInput::TableId), 400),
            (ServiceError::InvalidInput(InvalidInput::DateFormat), 400),
            (ServiceError::BadRequest("broken form".into()), 400),
            (ServiceError::DateInPast, 400),
            (ServiceError::SlotAlreadyBooked, 409),
            (ServiceError::NotFound("Table not found".into()), 404),
            (ServiceError::InternalServerError, 500),
            (ServiceError::RenderFailure, 500),
        ];

        for (error, status) in cases {
            assert_eq!(error.status_code().as_u16(), status, "{:?}", error);
        }
    }

    #[test]
    fn row_not_found_is_not_found() {
        let error: ServiceError = sqlx::Error::RowNotFound.into();

        assert!(matches!(error, ServiceError::NotFound(_)));
    }

    #[test]
    fn pool_errors_are_hidden() {
        let error: ServiceError = sqlx::Error::PoolTimedOut.into();

        assert_eq!(error, ServiceError::InternalServerError);
        assert_eq!(
            error.user_message(),
            "Internal Server Error, Please try later"
        );
    }

    /// A postgres error reduced to its constraint kind
    #[derive(Debug)]
    struct ConstraintError(sqlx::error::ErrorKind);

    impl std::fmt::Display for ConstraintError {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "constraint violated: {:?}", self.0)
        }
    }

    impl std::error::Error for ConstraintError {}

    impl sqlx::error::DatabaseError for ConstraintError {
        fn message(&self) -> &str {
            "constraint violated"
        }

        fn as_error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn std::error::Error + Send + Sync + 'static> {
            self
        }

        fn kind(&self) -> sqlx::error::ErrorKind {
            match self.0 {
                sqlx::error::ErrorKind::UniqueViolation => sqlx::error::ErrorKind::UniqueViolation,
                sqlx::error::ErrorKind::ForeignKeyViolation => {
                    sqlx::error::ErrorKind::ForeignKeyViolation
                }
                sqlx::error::ErrorKind::NotNullViolation => {
                    sqlx::error::ErrorKind::NotNullViolation
                }
                sqlx::error::ErrorKind::CheckViolation => sqlx::error::ErrorKind::CheckViolation,
                _ => sqlx::error::ErrorKind::Other,
            }
        }
    }

    fn violation(kind: sqlx::error::ErrorKind) -> ServiceError {
        sqlx::Error::Database(Box::new(ConstraintError(kind))).into()
    }

    #[test]
    fn taken_slot_is_a_conflict() {
        let error = violation(sqlx::error::ErrorKind::UniqueViolation);

        assert_eq!(error, ServiceError::SlotAlreadyBooked);
        assert_eq!(error.status_code(), StatusCode::CONFLICT);
    }

    #[test]
    fn unknown_table_is_not_found() {
        let error = violation(sqlx::error::ErrorKind::ForeignKeyViolation);

        assert_eq!(error, ServiceError::NotFound("Table not found".to_string()));
        assert_eq!(error.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn other_constraints_are_internal_errors() {
        for kind in vec![
            sqlx::error::ErrorKind::CheckViolation,
            sqlx::error::ErrorKind::NotNullViolation,
            sqlx::error::ErrorKind::Other,
        ] {
            let error = violation(kind);

            assert_eq!(error, ServiceError::InternalServerError);
            assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        }
    }

    #[test]
    fn missing_contact_names_the_field() {
        let error = ServiceError::from(InvalidInput::MissingContact("email"));

        assert_eq!(error.to_string(), "The email field is required");
    }
}
