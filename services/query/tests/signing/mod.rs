use awsig_core::time::DateTime;
use awsig_core::{Context, SignRequest, Signer};
use awsig_query::{
    Credential, ParamMap, QueryRequestBuilder, RequestSigner, StaticCredentialProvider,
};
use chrono::{TimeZone, Utc};
use http::{header, Method, Request};
use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;

// The worked example from
// https://docs.aws.amazon.com/general/latest/gr/sigv4-calculate-signature.html
const EXAMPLE_SECRET: &str = "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY";

fn example_time() -> DateTime {
    Utc.with_ymd_and_hms(2015, 8, 30, 12, 36, 0).unwrap()
}

fn example_signer(service: &str, region: &str) -> Signer<Credential> {
    Signer::new(
        Context::new(),
        StaticCredentialProvider::new("AKIDEXAMPLE", EXAMPLE_SECRET),
        RequestSigner::new(service, region).with_time(example_time()),
    )
}

#[tokio::test]
async fn test_authorization_header_known_vector() {
    let _ = env_logger::builder().is_test(true).try_init();

    let req = Request::builder()
        .method(Method::GET)
        .uri("https://iam.amazonaws.com/?Action=ListUsers&Version=2010-05-08")
        .header(
            header::CONTENT_TYPE,
            "application/x-www-form-urlencoded; charset=utf-8",
        )
        .body(())
        .expect("request must build");
    let (mut parts, _) = req.into_parts();

    example_signer("iam", "us-east-1")
        .sign(&mut parts, b"")
        .await
        .expect("sign must succeed");

    assert_eq!(
        parts.headers[header::AUTHORIZATION]
            .to_str()
            .expect("must be valid"),
        "AWS4-HMAC-SHA256 Credential=AKIDEXAMPLE/20150830/us-east-1/iam/aws4_request, \
         SignedHeaders=content-type;host;x-amz-date, \
         Signature=5d672d79c15b13162d9279b0855cfba6789a8edb4c82c400e06b5924a6f2b5d7"
    );
}

fn send_email_params() -> ParamMap {
    ParamMap::new()
        .with("Action", "SendEmail")
        .with("Version", "2010-12-01")
        .with(
            "Destination",
            ParamMap::new().with("ToAddresses", vec!["success@simulator.amazonses.com"]),
        )
        .with(
            "Message",
            ParamMap::new()
                .with("Subject", ParamMap::new().with("Data", "hello"))
                .with(
                    "Body",
                    ParamMap::new().with("Text", ParamMap::new().with("Data", "hello world")),
                ),
        )
        .with("Source", "sender@example.com")
}

#[tokio::test]
async fn test_signed_query_request_artifact() {
    let _ = env_logger::builder().is_test(true).try_init();

    let req = QueryRequestBuilder::new("email", "us-east-1")
        .build(&send_email_params())
        .expect("request must build");
    let (mut parts, body) = req.into_parts();

    example_signer("email", "us-east-1")
        .sign(&mut parts, &body)
        .await
        .expect("sign must succeed");

    assert_eq!(parts.method, Method::POST);
    assert_eq!(parts.uri.to_string(), "https://email.us-east-1.amazonaws.com/");
    assert_eq!(
        body.as_ref(),
        b"Action=SendEmail\
          &Version=2010-12-01\
          &Destination.ToAddresses.1=success%40simulator.amazonses.com\
          &Message.Subject.Data=hello\
          &Message.Body.Text.Data=hello%20world\
          &Source=sender%40example.com"
            .as_slice()
    );

    let headers = &parts.headers;
    assert_eq!(
        headers[header::HOST].to_str().expect("must be valid"),
        "email.us-east-1.amazonaws.com"
    );
    assert_eq!(
        headers[header::CONTENT_TYPE]
            .to_str()
            .expect("must be valid"),
        "application/x-www-form-urlencoded"
    );
    assert_eq!(
        headers[header::ACCEPT].to_str().expect("must be valid"),
        "application/json"
    );
    assert_eq!(
        headers["x-amz-date"].to_str().expect("must be valid"),
        "20150830T123600Z"
    );

    let authorization = headers[header::AUTHORIZATION]
        .to_str()
        .expect("must be valid");
    let (prefix, signature) = authorization
        .split_once("Signature=")
        .expect("authorization must carry a signature");
    assert_eq!(
        prefix,
        "AWS4-HMAC-SHA256 Credential=AKIDEXAMPLE/20150830/us-east-1/email/aws4_request, \
         SignedHeaders=accept;content-type;host;x-amz-date, "
    );
    assert_eq!(signature.len(), 64);
    assert!(signature
        .chars()
        .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
}

#[tokio::test]
async fn test_signing_is_reproducible() {
    let build = || {
        QueryRequestBuilder::new("email", "us-east-1")
            .build(&send_email_params())
            .expect("request must build")
    };

    let mut authorizations = Vec::new();
    for _ in 0..2 {
        let (mut parts, body) = build().into_parts();
        example_signer("email", "us-east-1")
            .sign(&mut parts, &body)
            .await
            .expect("sign must succeed");
        authorizations.push(
            parts.headers[header::AUTHORIZATION]
                .to_str()
                .expect("must be valid")
                .to_string(),
        );
    }

    assert_eq!(authorizations[0], authorizations[1]);
}

#[tokio::test]
async fn test_signature_avalanche_over_random_payloads() {
    let signer = RequestSigner::new("email", "us-east-1").with_time(example_time());
    let cred = Credential {
        access_key_id: "AKIDEXAMPLE".to_string(),
        secret_access_key: EXAMPLE_SECRET.to_string(),
        ..Default::default()
    };
    let ctx = Context::new();

    // Payloads are made unique by a counter prefix; the random tail just
    // varies length and content.
    let mut rng = StdRng::seed_from_u64(0x5197);
    let mut signatures = HashSet::new();
    for i in 0..1000u32 {
        let mut payload = i.to_be_bytes().to_vec();
        let tail = (rng.gen::<u8>() % 64) as usize;
        payload.extend(std::iter::repeat_with(|| rng.gen::<u8>()).take(tail));

        let mut parts = Request::builder()
            .method(Method::POST)
            .uri("https://email.us-east-1.amazonaws.com/")
            .body(())
            .expect("request must build")
            .into_parts()
            .0;
        signer
            .sign_request(&ctx, &mut parts, &payload, Some(&cred))
            .await
            .expect("sign must succeed");

        let authorization = parts.headers[header::AUTHORIZATION]
            .to_str()
            .expect("must be valid");
        let (_, signature) = authorization
            .split_once("Signature=")
            .expect("authorization must carry a signature");
        signatures.insert(signature.to_string());
    }

    // No two distinct payloads may collide on a signature.
    assert_eq!(signatures.len(), 1000);
}
