use actix_web::{error, HttpResponse};
use actix_web::http::StatusCode;
use derive_more::{Display, Error};
use crate::server::model::order::ErrorResponse;

#[derive(Debug, Display, Error, PartialEq)]
pub(crate) enum QueryError {
    #[display("Invalid 'page' parameter")]
    InvalidPage,
    #[display("{message}")]
    MissingPairedParameter { message: String },
    #[display("{message}")]
    InvalidFilterValue { message: String },
    #[display("Invalid query string: {message}")]
    MalformedQuery { message: String },
}

impl QueryError {
    pub fn missing_pair(message: impl Into<String>) -> Self {
        QueryError::MissingPairedParameter { message: message.into() }
    }

    pub fn invalid_filter(message: impl Into<String>) -> Self {
        QueryError::InvalidFilterValue { message: message.into() }
    }
}

impl error::ResponseError for QueryError {
    fn status_code(&self) -> StatusCode {
        match *self {
            QueryError::InvalidPage
            | QueryError::MissingPairedParameter { .. }
            | QueryError::InvalidFilterValue { .. }
            | QueryError::MalformedQuery { .. } => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
        })
    }
}
