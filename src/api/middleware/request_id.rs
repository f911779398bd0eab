//! Request ID middleware
//!
//! 沿用上游传入的 `X-Request-ID`（反向代理常见做法），否则生成 UUID。
//! 该 ID 写入 tracing span，并回写到响应头。

use actix_web::{
    Error,
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    http::header::{HeaderName, HeaderValue},
    middleware::Next,
};
use tracing::{Instrument, info_span};
use uuid::Uuid;

use crate::api::constants::REQUEST_ID_HEADER;

/// 接受的上游 ID 最大长度
const MAX_INBOUND_ID_LEN: usize = 128;

pub struct RequestIdMiddleware;

impl RequestIdMiddleware {
    /// 用于 `from_fn` 的中间件函数
    pub async fn assign(
        req: ServiceRequest,
        next: Next<impl MessageBody>,
    ) -> Result<ServiceResponse<impl MessageBody>, Error> {
        let request_id = inbound_request_id(&req).unwrap_or_else(|| Uuid::new_v4().to_string());

        let span = info_span!(
            "request",
            request_id = %request_id,
            method = %req.method(),
            path = %req.path(),
        );

        let mut response = next.call(req).instrument(span).await?;

        if let Ok(value) = HeaderValue::from_str(&request_id) {
            response
                .headers_mut()
                .insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
        }

        Ok(response)
    }
}

fn inbound_request_id(req: &ServiceRequest) -> Option<String> {
    let value = req.headers().get(REQUEST_ID_HEADER)?.to_str().ok()?;
    is_acceptable_id(value).then(|| value.to_string())
}

/// 非空、长度受限，且只含 `[A-Za-z0-9._:-]`
fn is_acceptable_id(value: &str) -> bool {
    !value.is_empty()
        && value.len() <= MAX_INBOUND_ID_LEN
        && value
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.' | b':'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acceptable_ids() {
        assert!(is_acceptable_id("3f2c9a"));
        assert!(is_acceptable_id("edge-01:req_42.7"));
        assert!(is_acceptable_id(&"a".repeat(MAX_INBOUND_ID_LEN)));
    }

    #[test]
    fn test_rejected_ids() {
        assert!(!is_acceptable_id(""));
        assert!(!is_acceptable_id("has space"));
        assert!(!is_acceptable_id("line\nbreak"));
        assert!(!is_acceptable_id(&"a".repeat(MAX_INBOUND_ID_LEN + 1)));
    }
}
