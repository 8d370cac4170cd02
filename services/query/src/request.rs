use crate::params::ParamMap;
use awsig_core::{Error, Result};
use bytes::Bytes;
use http::{header, HeaderValue, Method, Request};

/// Builds the ready-to-sign HTTP request for a query protocol operation.
///
/// The query protocol speaks form-encoded POST: the flattened parameters
/// become the body, and the endpoint is derived from the service and
/// region. Sign the result with
/// [`Signer::sign`](awsig_core::Signer::sign) and hand it to whatever
/// transport dispatches it; this crate never performs the network call.
///
/// ```
/// use awsig_query::{ParamMap, QueryRequestBuilder};
///
/// let params = ParamMap::new()
///     .with("Action", "SendEmail")
///     .with("Source", "sender@example.com");
/// let req = QueryRequestBuilder::new("email", "us-east-1")
///     .build(&params)
///     .expect("request must build");
/// assert_eq!(req.uri(), "https://email.us-east-1.amazonaws.com/");
/// ```
#[derive(Debug)]
pub struct QueryRequestBuilder {
    service: String,
    region: String,

    endpoint: Option<String>,
}

impl QueryRequestBuilder {
    /// Create a new builder for the given service and region.
    pub fn new(service: &str, region: &str) -> Self {
        Self {
            service: service.into(),
            region: region.into(),

            endpoint: None,
        }
    }

    /// Override the `{service}.{region}.amazonaws.com` host, e.g. for a
    /// service whose endpoint name differs from its signing name.
    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = Some(endpoint.to_string());
        self
    }

    /// Build the unsigned request carrying the flattened parameters.
    pub fn build(&self, params: &ParamMap) -> Result<Request<Bytes>> {
        if self.service.is_empty() || self.region.is_empty() {
            return Err(Error::config_invalid(
                "service and region must not be empty",
            ));
        }

        let host = match &self.endpoint {
            Some(endpoint) => endpoint.clone(),
            None => format!("{}.{}.amazonaws.com", self.service, self.region),
        };

        let req = Request::builder()
            .method(Method::POST)
            .uri(format!("https://{host}/"))
            .header(
                header::CONTENT_TYPE,
                HeaderValue::from_static("application/x-www-form-urlencoded"),
            )
            .header(header::ACCEPT, HeaderValue::from_static("application/json"))
            .body(Bytes::from(params.to_form_urlencoded()))?;

        Ok(req)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use awsig_core::ErrorKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_build_form_request() {
        let params = ParamMap::new()
            .with("Action", "SendEmail")
            .with("Destination", ParamMap::new().with("ToAddresses", vec!["a@example.com"]));

        let req = QueryRequestBuilder::new("email", "us-east-1")
            .build(&params)
            .expect("request must build");

        assert_eq!(req.method(), Method::POST);
        assert_eq!(req.uri(), "https://email.us-east-1.amazonaws.com/");
        assert_eq!(
            req.headers()[header::CONTENT_TYPE]
                .to_str()
                .expect("must be valid"),
            "application/x-www-form-urlencoded"
        );
        assert_eq!(
            req.headers()[header::ACCEPT]
                .to_str()
                .expect("must be valid"),
            "application/json"
        );
        assert_eq!(
            req.body().as_ref(),
            b"Action=SendEmail&Destination.ToAddresses.1=a%40example.com"
        );
    }

    #[test]
    fn test_build_with_endpoint_override() {
        let req = QueryRequestBuilder::new("ses", "us-east-1")
            .with_endpoint("email.us-east-1.amazonaws.com")
            .build(&ParamMap::new())
            .expect("request must build");

        assert_eq!(req.uri(), "https://email.us-east-1.amazonaws.com/");
        assert!(req.body().is_empty());
    }

    #[test]
    fn test_build_rejects_empty_service() {
        let err = QueryRequestBuilder::new("", "us-east-1")
            .build(&ParamMap::new())
            .expect_err("build must fail");
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
    }
}
