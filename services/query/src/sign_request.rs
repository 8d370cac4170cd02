use crate::cache::SigningKeyCache;
use crate::constants::{
    AWS4_HMAC_SHA256, AWS_QUERY_ENCODE_SET, AWS_URI_ENCODE_SET, X_AMZ_DATE, X_AMZ_SECURITY_TOKEN,
};
use crate::Credential;
use async_trait::async_trait;
use awsig_core::hash::{hex_hmac_sha256, hex_sha256, hmac_sha256};
use awsig_core::time::{format_iso8601, now, DateTime};
use awsig_core::{Context, Error, Result, SignRequest, SigningRequest};
use http::request::Parts;
use http::{header, HeaderValue};
use log::debug;
use percent_encoding::utf8_percent_encode;
use std::fmt::Write;
use std::sync::Arc;

/// RequestSigner that implements AWS SigV4 for the query protocol.
///
/// - [Signature Version 4 signing process](https://docs.aws.amazon.com/general/latest/gr/signature-version-4.html)
///
/// Signing is a deterministic one-shot pipeline: flatten-encoded payload
/// bytes in, Authorization header out. There is no retry here; every
/// failure is an input or configuration defect and surfaces immediately.
#[derive(Debug)]
pub struct RequestSigner {
    service: String,
    region: String,

    key_cache: Option<Arc<SigningKeyCache>>,
    time: Option<DateTime>,
}

impl RequestSigner {
    /// Create a new signer for the given service and region.
    pub fn new(service: &str, region: &str) -> Self {
        Self {
            service: service.into(),
            region: region.into(),

            key_cache: None,
            time: None,
        }
    }

    /// Reuse derived signing keys through the given cache.
    ///
    /// The cache is keyed by `(access key id, region, service, date
    /// stamp)`; a UTC date rollover selects a fresh entry rather than
    /// reusing a stale key.
    pub fn with_signing_key_cache(mut self, cache: Arc<SigningKeyCache>) -> Self {
        self.key_cache = Some(cache);
        self
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }

    fn signing_key(&self, cred: &Credential, sctx: &SigningContext) -> Vec<u8> {
        let Some(cache) = &self.key_cache else {
            return generate_signing_key(
                &cred.secret_access_key,
                &sctx.date_stamp,
                &self.region,
                &self.service,
            );
        };

        if let Some(key) = cache.get(
            &cred.access_key_id,
            &self.region,
            &self.service,
            &sctx.date_stamp,
        ) {
            return key;
        }

        let key = generate_signing_key(
            &cred.secret_access_key,
            &sctx.date_stamp,
            &self.region,
            &self.service,
        );
        cache.put(
            &cred.access_key_id,
            &self.region,
            &self.service,
            &sctx.date_stamp,
            key.clone(),
        );
        key
    }
}

#[async_trait]
impl SignRequest for RequestSigner {
    type Credential = Credential;

    async fn sign_request(
        &self,
        _: &Context,
        req: &mut Parts,
        payload: &[u8],
        credential: Option<&Self::Credential>,
    ) -> Result<()> {
        if self.service.is_empty() || self.region.is_empty() {
            return Err(Error::config_invalid(
                "service and region must not be empty",
            ));
        }
        let Some(cred) = credential else {
            return Err(Error::credential_invalid("no credential to sign with"));
        };
        if cred.access_key_id.is_empty() || cred.secret_access_key.is_empty() {
            return Err(Error::credential_invalid(
                "access key id and secret access key must not be empty",
            ));
        }

        let now = self.time.unwrap_or_else(now);
        let sctx = SigningContext::new(now, &self.region, &self.service);
        debug!("calculated scope: {}", sctx.scope);

        let mut signed_req = SigningRequest::build(req)?;

        canonicalize_header(&mut signed_req, cred, &sctx)?;
        canonicalize_query(&mut signed_req);

        let creq = canonical_request_string(&signed_req, &hex_sha256(payload))?;
        debug!("calculated canonical request:\n{creq}");

        let string_to_sign = string_to_sign(&sctx, &creq)?;
        debug!("calculated string to sign:\n{string_to_sign}");

        let signing_key = self.signing_key(cred, &sctx);
        let signature = hex_hmac_sha256(&signing_key, string_to_sign.as_bytes());

        let mut authorization = HeaderValue::from_str(&format!(
            "{AWS4_HMAC_SHA256} Credential={}/{}, SignedHeaders={}, Signature={}",
            cred.access_key_id,
            sctx.scope,
            signed_req.header_name_to_vec_sorted().join(";"),
            signature
        ))?;
        authorization.set_sensitive(true);

        signed_req
            .headers
            .insert(header::AUTHORIZATION, authorization);

        // Apply to the request.
        signed_req.apply(req)
    }
}

/// Scope values derived once per signing operation.
///
/// `date_stamp` is sliced out of `amz_date`, so the prefix relationship
/// between the two always holds.
#[derive(Debug)]
struct SigningContext {
    amz_date: String,
    date_stamp: String,
    scope: String,
}

impl SigningContext {
    fn new(time: DateTime, region: &str, service: &str) -> Self {
        let amz_date = format_iso8601(time);
        let date_stamp = amz_date[..8].to_string();
        let scope = format!("{date_stamp}/{region}/{service}/aws4_request");

        Self {
            amz_date,
            date_stamp,
            scope,
        }
    }
}

fn canonicalize_header(
    ctx: &mut SigningRequest,
    cred: &Credential,
    sctx: &SigningContext,
) -> Result<()> {
    // Header values are normalized per Step 4 of https://docs.aws.amazon.com/general/latest/gr/sigv4-create-canonical-request.html
    for (_, value) in ctx.headers.iter_mut() {
        SigningRequest::header_value_normalize(value)
    }

    // Insert HOST header if not present.
    if ctx.headers.get(header::HOST).is_none() {
        ctx.headers
            .insert(header::HOST, ctx.authority.as_str().parse()?);
    }

    // Insert DATE header if not present.
    if ctx.headers.get(X_AMZ_DATE).is_none() {
        ctx.headers
            .insert(X_AMZ_DATE, HeaderValue::try_from(sctx.amz_date.as_str())?);
    }

    // Insert security token header if the credential carries one.
    if let Some(token) = &cred.session_token {
        let mut value = HeaderValue::from_str(token)?;
        // Set token value sensitive to avoid leaking.
        value.set_sensitive(true);

        ctx.headers.insert(X_AMZ_SECURITY_TOKEN, value);
    }

    Ok(())
}

fn canonicalize_query(ctx: &mut SigningRequest) {
    if ctx.query.is_empty() {
        return;
    }

    // Sort by param name.
    ctx.query.sort();

    ctx.query = ctx
        .query
        .iter()
        .map(|(k, v)| {
            (
                utf8_percent_encode(k, &AWS_QUERY_ENCODE_SET).to_string(),
                utf8_percent_encode(v, &AWS_QUERY_ENCODE_SET).to_string(),
            )
        })
        .collect();
}

fn canonical_request_string(ctx: &SigningRequest, payload_hash: &str) -> Result<String> {
    // 256 is specially chosen to avoid reallocation for most requests.
    let mut f = String::with_capacity(256);

    // Insert method
    writeln!(f, "{}", ctx.method)?;
    // Insert encoded path
    let path = ctx.path_percent_decoded()?;
    writeln!(f, "{}", utf8_percent_encode(&path, &AWS_URI_ENCODE_SET))?;
    // Insert query
    writeln!(
        f,
        "{}",
        ctx.query
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&")
    )?;
    // Insert signed headers, one per line, with a blank line after the
    // last one.
    let signed_headers = ctx.header_name_to_vec_sorted();
    for name in signed_headers.iter() {
        writeln!(f, "{}:{}", name, ctx.headers[*name].to_str()?)?;
    }
    writeln!(f)?;
    writeln!(f, "{}", signed_headers.join(";"))?;
    // Insert payload hash, with no trailing newline.
    write!(f, "{payload_hash}")?;

    Ok(f)
}

fn string_to_sign(sctx: &SigningContext, creq: &str) -> Result<String> {
    let mut f = String::new();
    writeln!(f, "{AWS4_HMAC_SHA256}")?;
    writeln!(f, "{}", sctx.amz_date)?;
    writeln!(f, "{}", sctx.scope)?;
    write!(f, "{}", hex_sha256(creq.as_bytes()))?;

    Ok(f)
}

/// Derive the request-scoped signing key.
///
/// Every stage keys the next with its raw bytes; only the final request
/// signature is hex-encoded.
fn generate_signing_key(secret: &str, date_stamp: &str, region: &str, service: &str) -> Vec<u8> {
    // Sign secret
    let secret = format!("AWS4{secret}");
    // Sign date
    let sign_date = hmac_sha256(secret.as_bytes(), date_stamp.as_bytes());
    // Sign region
    let sign_region = hmac_sha256(sign_date.as_slice(), region.as_bytes());
    // Sign service
    let sign_service = hmac_sha256(sign_region.as_slice(), service.as_bytes());
    // Sign request
    hmac_sha256(sign_service.as_slice(), "aws4_request".as_bytes())
}
