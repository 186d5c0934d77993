//! The discriminated result of a call.
//!
//! A call that reached the server always yields a [`FetchResponse`] holding
//! exactly one of `data` or `error`, plus the raw [`Response`]. Only transport
//! and interceptor failures surface as [`crate::Error`].

use http::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::{ParseAs, Response, Result, from_value};

/// Either the success payload or the error payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T, E> {
    /// The server answered with a success status.
    Data(T),
    /// The server answered with an error status, or a `default` response.
    Error(E),
}

impl<T, E> Outcome<T, E> {
    /// Returns `true` for [`Outcome::Data`].
    #[must_use]
    pub const fn is_data(&self) -> bool {
        matches!(self, Self::Data(_))
    }

    /// Borrow both sides.
    #[must_use]
    pub const fn as_ref(&self) -> Outcome<&T, &E> {
        match self {
            Self::Data(data) => Outcome::Data(data),
            Self::Error(error) => Outcome::Error(error),
        }
    }

    /// Convert into a standard [`Result`](std::result::Result).
    ///
    /// # Errors
    ///
    /// Returns the error payload for [`Outcome::Error`].
    pub fn into_result(self) -> std::result::Result<T, E> {
        match self {
            Self::Data(data) => Ok(data),
            Self::Error(error) => Err(error),
        }
    }
}

/// Statuses a call is declared to answer with.
///
/// Mirrors the response map of an operation description. When `default` is
/// set, any status missing from `declared` is routed to the error side, even
/// a 2xx one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Responses {
    /// Explicitly described statuses.
    pub declared: Vec<u16>,
    /// The operation also describes a catch-all `default` response.
    pub default: bool,
}

impl Responses {
    /// No declared status and no `default`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a status.
    #[must_use]
    pub fn status(mut self, status: u16) -> Self {
        self.declared.push(status);
        self
    }

    /// Declare a `default` response.
    #[must_use]
    pub fn with_default(mut self) -> Self {
        self.default = true;
        self
    }

    /// Whether `status` lands on the error side.
    #[must_use]
    pub fn is_error(&self, status: u16) -> bool {
        if self.default && !self.declared.contains(&status) {
            return true;
        }
        !StatusCode::from_u16(status).is_ok_and(|status| status.is_success())
    }
}

/// Result of a call that produced an HTTP response.
#[derive(Debug, Clone)]
pub struct FetchResponse<T = Value, E = Value> {
    outcome: Outcome<T, E>,
    response: Response,
}

impl FetchResponse {
    /// Split a response into `data` or `error`.
    ///
    /// - `204` yields `data = {}`.
    /// - Any other empty body (or `content-length: 0`) yields `{}` on the side
    ///   the status selects.
    /// - Otherwise the body is parsed with `parse_as`, which never fails.
    #[must_use]
    pub fn discriminate(response: Response, parse_as: ParseAs, responses: Option<&Responses>) -> Self {
        let status = response.status();
        if status == 204 {
            return Self::new(Outcome::Data(empty()), response);
        }

        let is_error = responses.map_or_else(|| !response.is_success(), |r| r.is_error(status));
        let value = if response.is_empty_body() {
            empty()
        } else {
            parse_as.parse(response.body())
        };

        let outcome = if is_error {
            Outcome::Error(value)
        } else {
            Outcome::Data(value)
        };
        Self::new(outcome, response)
    }

    /// Deserialize both sides into caller types.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::JsonDeserialization`] with the failing path.
    pub fn typed<T, E>(self) -> Result<FetchResponse<T, E>>
    where
        T: DeserializeOwned,
        E: DeserializeOwned,
    {
        let outcome = match self.outcome {
            Outcome::Data(value) => Outcome::Data(from_value(value)?),
            Outcome::Error(value) => Outcome::Error(from_value(value)?),
        };
        Ok(FetchResponse::new(outcome, self.response))
    }
}

fn empty() -> Value {
    Value::Object(Map::new())
}

impl<T, E> FetchResponse<T, E> {
    /// Assemble from parts.
    #[must_use]
    pub const fn new(outcome: Outcome<T, E>, response: Response) -> Self {
        Self { outcome, response }
    }

    /// The outcome.
    #[must_use]
    pub const fn outcome(&self) -> &Outcome<T, E> {
        &self.outcome
    }

    /// Success payload, if any.
    #[must_use]
    pub const fn data(&self) -> Option<&T> {
        match &self.outcome {
            Outcome::Data(data) => Some(data),
            Outcome::Error(_) => None,
        }
    }

    /// Error payload, if any.
    #[must_use]
    pub const fn error(&self) -> Option<&E> {
        match &self.outcome {
            Outcome::Data(_) => None,
            Outcome::Error(error) => Some(error),
        }
    }

    /// Returns `true` when the call produced `data`.
    #[must_use]
    pub const fn is_data(&self) -> bool {
        self.outcome.is_data()
    }

    /// HTTP status of the underlying response.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.response.status()
    }

    /// The raw response, after response interceptors ran.
    #[must_use]
    pub const fn response(&self) -> &Response {
        &self.response
    }

    /// Consume into the payload as a [`Result`](std::result::Result).
    ///
    /// # Errors
    ///
    /// Returns the error payload when the call produced `error`.
    pub fn into_result(self) -> std::result::Result<T, E> {
        self.outcome.into_result()
    }

    /// Consume into outcome and response.
    #[must_use]
    pub fn into_parts(self) -> (Outcome<T, E>, Response) {
        (self.outcome, self.response)
    }
}
