use std::borrow::Cow;
use std::mem;
use std::str::FromStr;

use http::uri::{Authority, PathAndQuery, Scheme};
use http::{HeaderMap, HeaderValue, Method, Uri};

use crate::{Error, Result};

/// A request deconstructed for signing.
///
/// Built from `http::request::Parts`, mutated by the service signer
/// (headers inserted, query canonicalized), then applied back. Each signing
/// call builds its own instance; nothing is shared between calls.
#[derive(Debug)]
pub struct SigningRequest {
    /// HTTP method.
    pub method: Method,
    /// HTTP scheme.
    pub scheme: Scheme,
    /// HTTP authority.
    pub authority: Authority,
    /// HTTP path.
    pub path: String,
    /// HTTP query parameters, decoded.
    pub query: Vec<(String, String)>,
    /// HTTP headers.
    pub headers: HeaderMap,
}

impl SigningRequest {
    /// Deconstruct `http::request::Parts` into a signing request.
    ///
    /// A request without an authority cannot be signed: the `host` header
    /// is always part of the signed header set.
    pub fn build(parts: &mut http::request::Parts) -> Result<Self> {
        let uri = mem::take(&mut parts.uri).into_parts();
        let paq = uri
            .path_and_query
            .unwrap_or_else(|| PathAndQuery::from_static("/"));

        Ok(SigningRequest {
            method: parts.method.clone(),
            scheme: uri.scheme.unwrap_or(Scheme::HTTPS),
            authority: uri.authority.ok_or_else(|| {
                Error::request_invalid("request without authority is invalid for signing")
            })?,
            path: paq.path().to_string(),
            query: paq
                .query()
                .map(|v| {
                    form_urlencoded::parse(v.as_bytes())
                        .map(|(k, v)| (k.into_owned(), v.into_owned()))
                        .collect()
                })
                .unwrap_or_default(),

            // Take the headers out of the request to avoid copy.
            // They are returned when the context is applied.
            headers: mem::take(&mut parts.headers),
        })
    }

    /// Apply the signing request back to `http::request::Parts`.
    pub fn apply(mut self, parts: &mut http::request::Parts) -> Result<()> {
        let query_size = self.query_size();

        mem::swap(&mut parts.headers, &mut self.headers);
        parts.method = self.method;
        parts.uri = {
            let mut uri_parts = mem::take(&mut parts.uri).into_parts();
            uri_parts.scheme = Some(self.scheme);
            uri_parts.authority = Some(self.authority);
            uri_parts.path_and_query = {
                let paq = if query_size == 0 {
                    self.path
                } else {
                    let mut s = self.path;
                    s.reserve(query_size + 1);

                    s.push('?');
                    for (i, (k, v)) in self.query.iter().enumerate() {
                        if i > 0 {
                            s.push('&');
                        }

                        s.push_str(k);
                        if !v.is_empty() {
                            s.push('=');
                            s.push_str(v);
                        }
                    }

                    s
                };

                Some(PathAndQuery::from_str(&paq)?)
            };
            Uri::from_parts(uri_parts)?
        };

        Ok(())
    }

    /// Get the path percent decoded.
    ///
    /// A path whose decoded bytes are not valid UTF-8 cannot be
    /// canonicalized and fails the signing operation.
    pub fn path_percent_decoded(&self) -> Result<Cow<'_, str>> {
        percent_encoding::percent_decode_str(&self.path)
            .decode_utf8()
            .map_err(|e| {
                Error::encoding_invalid(format!("request path is not valid UTF-8: {e}"))
            })
    }

    /// Get total byte size of all query keys and values.
    #[inline]
    pub fn query_size(&self) -> usize {
        self.query
            .iter()
            .map(|(k, v)| k.len() + v.len())
            .sum::<usize>()
    }

    /// Trim leading and trailing spaces from a header value in place.
    pub fn header_value_normalize(v: &mut HeaderValue) {
        let bs = v.as_bytes();

        let starting_index = bs.iter().position(|b| *b != b' ').unwrap_or(0);
        let ending_offset = bs.iter().rev().position(|b| *b != b' ').unwrap_or(0);
        let ending_index = bs.len() - ending_offset;

        // This can't fail because we started with a valid HeaderValue and then only trimmed spaces
        *v = HeaderValue::from_bytes(&bs[starting_index..ending_index])
            .expect("invalid header value")
    }

    /// Get header names as a sorted vector.
    ///
    /// `http::HeaderMap` stores names lowercased, so this is the signed
    /// header list in canonical order.
    pub fn header_name_to_vec_sorted(&self) -> Vec<&str> {
        let mut h = self
            .headers
            .keys()
            .map(|k| k.as_str())
            .collect::<Vec<&str>>();
        h.sort_unstable();

        h
    }
}
