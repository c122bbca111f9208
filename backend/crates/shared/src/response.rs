//! Success envelope
//!
//! Every successful response has the shape
//! `{"status":"success","message":"...", ...payload}` where the payload's
//! fields are merged into the top-level object.

use std::borrow::Cow;

use serde::Serialize;

/// JSON success envelope
///
/// ```rust
/// use kernel::response::ApiResponse;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Payload { count: u32 }
///
/// let body = ApiResponse::ok("Counted", Payload { count: 3 });
/// let json = serde_json::to_value(&body).unwrap();
/// assert_eq!(json["status"], "success");
/// assert_eq!(json["count"], 3);
/// ```
#[derive(Debug, Serialize)]
pub struct ApiResponse<T = ()>
where
    T: Serialize,
{
    status: &'static str,
    message: Cow<'static, str>,
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    payload: Option<T>,
    #[serde(skip)]
    status_code: u16,
}

impl<T: Serialize> ApiResponse<T> {
    /// 200 with payload
    pub fn ok(message: impl Into<Cow<'static, str>>, payload: T) -> Self {
        Self {
            status: "success",
            message: message.into(),
            payload: Some(payload),
            status_code: 200,
        }
    }

    /// 201 with payload
    pub fn created(message: impl Into<Cow<'static, str>>, payload: T) -> Self {
        Self {
            status_code: 201,
            ..Self::ok(message, payload)
        }
    }

    pub fn status_code(&self) -> u16 {
        self.status_code
    }
}

impl ApiResponse<()> {
    /// 200 without payload
    pub fn message(message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            status: "success",
            message: message.into(),
            payload: None,
            status_code: 200,
        }
    }

    /// 201 without payload
    pub fn created_message(message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            status_code: 201,
            ..Self::message(message)
        }
    }
}

#[cfg(feature = "axum")]
impl<T: Serialize> axum::response::IntoResponse for ApiResponse<T> {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        let status = StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::OK);
        (status, Json(self)).into_response()
    }
}
