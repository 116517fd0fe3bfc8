use crate::config::DEFAULT_QR_ENDPOINT;
use serde::{Deserialize, Serialize};

/// Direct payment provider reachable through a scannable request code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Provider {
    Alipay,
    WeChat,
}

impl Provider {
    /// URI scheme of the provider's payment request
    pub fn scheme(&self) -> &'static str {
        match self {
            Provider::Alipay => "alipay",
            Provider::WeChat => "wechat",
        }
    }
}

/// Request string for one provider plus the URL the code renderer fetches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentPayload {
    pub provider: Provider,
    pub request_uri: String,
    pub render_url: String,
}

/// Builds provider payment requests.
///
/// Output is a pure function of `(provider, merchant_id, amount)` and the
/// renderer endpoint, so identical inputs give byte-identical payloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayloadBuilder {
    endpoint: String,
}

impl PayloadBuilder {
    pub fn new() -> Self {
        PayloadBuilder::with_endpoint(DEFAULT_QR_ENDPOINT)
    }

    pub fn with_endpoint(endpoint: &str) -> Self {
        PayloadBuilder {
            endpoint: endpoint.to_string(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// `amount` is the raw amount as request text; promotions never apply to provider requests.
    pub fn build(&self, provider: Provider, merchant_id: &str, amount: &str) -> PaymentPayload {
        let request_uri = request_uri(provider, merchant_id, amount);
        let render_url = format!(
            "{}?size=300x300&data={}",
            self.endpoint,
            urlencoding::encode(&request_uri)
        );
        PaymentPayload {
            provider,
            request_uri,
            render_url,
        }
    }
}

impl Default for PayloadBuilder {
    fn default() -> Self {
        PayloadBuilder::new()
    }
}

/// `<scheme>://pay?merchantId=<id>&amount=<amount>`; an empty amount is sent as `0`.
pub fn request_uri(provider: Provider, merchant_id: &str, amount: &str) -> String {
    let amount = if amount.trim().is_empty() { "0" } else { amount };
    format!(
        "{}://pay?merchantId={}&amount={}",
        provider.scheme(),
        merchant_id,
        amount
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_uri_shape() {
        assert_eq!(
            request_uri(Provider::Alipay, "2088-01", "58.00"),
            "alipay://pay?merchantId=2088-01&amount=58.00"
        );
        assert_eq!(
            request_uri(Provider::WeChat, "wx-1", ""),
            "wechat://pay?merchantId=wx-1&amount=0"
        );
    }

    #[test]
    fn test_merchant_id_passes_through() {
        let uri = request_uri(Provider::Alipay, "id with space&x=1", "1");
        assert_eq!(uri, "alipay://pay?merchantId=id with space&x=1&amount=1");
    }

    #[test]
    fn test_render_url_encodes_request() {
        let payload = PayloadBuilder::new().build(Provider::Alipay, "2088-01", "58.00");
        assert_eq!(
            payload.render_url,
            "https://api.qrserver.com/v1/create-qr-code/?size=300x300&data=alipay%3A%2F%2Fpay%3FmerchantId%3D2088-01%26amount%3D58.00"
        );
    }

    #[test]
    fn test_build_is_idempotent() {
        let builder = PayloadBuilder::with_endpoint("https://qr.example/render");
        let a = builder.build(Provider::WeChat, "wx-1", "250.00");
        let b = builder.build(Provider::WeChat, "wx-1", "250.00");
        assert_eq!(a, b);
        assert_eq!(a.render_url.as_bytes(), b.render_url.as_bytes());
    }
}
