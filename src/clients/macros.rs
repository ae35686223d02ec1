#[macro_export]
/// Make a GET request expecting JSON.
/// A 404 resolves to `Ok(None)`; if JSON deser fails, emit a `WARN` level tracing event
macro_rules! json_get {
    ($client:expr, $url:expr, $expected:ty) => {{
        let url = $url.clone();
        tracing::debug!(url = url.as_str(), method = "GET", "Dispatching API request");

        let resp = $client.get($url).send().await?;
        let status = resp.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let text = resp.text().await?;
        let result: Result<$crate::clients::common::ClientResponse<$expected>, _> = text.parse();

        match result {
            Err(e) => {
                tracing::warn!(
                    method = "GET",
                    url = %url,
                    status = status.as_u16(),
                    response = text.as_str(),
                    "Unexpected response from server"
                );

                if status.is_success() {
                    Err(e.into())
                } else {
                    Err($crate::clients::common::ClientError::ApiError(
                        $crate::clients::common::ErrorResponse {
                            code: $crate::clients::common::NumericOrTextCode::Number(
                                status.as_u16() as usize,
                            ),
                            message: Some(text),
                        },
                    ))
                }
            }
            Ok(response) if !status.is_success() && !response.is_err() => {
                Err($crate::clients::common::ClientError::ApiError(
                    $crate::clients::common::ErrorResponse {
                        code: $crate::clients::common::NumericOrTextCode::Number(
                            status.as_u16() as usize,
                        ),
                        message: Some(text),
                    },
                ))
            }
            Ok(response) => response.into_client_result(),
        }
    }};
}
