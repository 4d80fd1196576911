use serde::Deserialize;

use crate::api::fronius::FetchError;

/// Status envelope shared by all Solar API endpoints except `GetAPIVersion.cgi`.
///
/// `Body` is usually missing when the status code is non-zero.
#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Response<D> {
    head: Head,

    body: Option<Body<D>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct Head {
    status: Status,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct Status {
    code: i64,

    #[serde(default)]
    reason: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct Body<D> {
    data: D,
}

impl<D: Default> From<Response<D>> for Result<D, FetchError> {
    fn from(response: Response<D>) -> Self {
        let Status { code, reason } = response.head.status;
        if code == 0 {
            Ok(response.body.map_or_else(D::default, |body| body.data))
        } else {
            Err(FetchError::DeviceStatus { code, reason })
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn test_error_status() -> Result<(), FetchError> {
        // language=json
        let body = r#"{"Head":{"Status":{"Code":1,"Reason":"TestReason"}}}"#;
        let response: Response<HashMap<String, f64>> =
            serde_json::from_str(body).map_err(FetchError::Decode)?;
        let error = Result::<_, FetchError>::from(response).unwrap_err();
        assert!(
            matches!(&error, FetchError::DeviceStatus { code: 1, reason } if reason == "TestReason"),
        );
        assert!(error.to_string().contains("TestReason"));
        Ok(())
    }

    #[test]
    fn test_success_without_body() -> Result<(), FetchError> {
        // language=json
        let body = r#"{"Head":{"Status":{"Code":0,"Reason":"","UserMessage":""}}}"#;
        let response: Response<HashMap<String, f64>> =
            serde_json::from_str(body).map_err(FetchError::Decode)?;
        assert!(Result::<_, FetchError>::from(response)?.is_empty());
        Ok(())
    }
}
