use rstest::*;
use serde_json::json;

use super::*;
use crate::testutils::*;

#[rstest]
fn test_decode_request_init() {
    let event: TapEvent = serde_json::from_value(json!({
        "source": {"ip": {"ipv4": 167772161}, "port": 80},
        "sourceMeta": {"labels": {"tls": "true"}},
        "destination": {"ip": {"ipv6": {"first": 1, "last": 2}}, "port": 8080},
        "proxyDirection": "INBOUND",
        "http": {"requestInit": {
            "id": {"base": 1, "stream": 2},
            "method": {"registered": "GET"},
            "scheme": {"registered": "HTTPS"},
            "authority": "example.com",
            "path": "/x",
        }},
    }))
    .unwrap();

    assert_eq!(event.source.ip, ipv4([10, 0, 0, 1]));
    assert_eq!(event.destination.ip, Some(IpAddress::Ipv6(Ipv6Halves { first: 1, last: 2 })));
    assert_eq!(event.source_meta.labels.get("tls").map(String::as_str), Some("true"));
    assert_eq!(event.proxy_direction, ProxyDirection::Inbound);
    assert_eq!(
        event.http,
        Some(HttpEvent::RequestInit(RequestInit {
            id: StreamId { base: 1, stream: 2 },
            method: Some(HttpMethod::Registered(RegisteredMethod::Get)),
            scheme: Some(Scheme::Registered(RegisteredScheme::Https)),
            authority: "example.com".into(),
            path: "/x".into(),
        }))
    );
}

#[rstest]
fn test_decode_missing_fields_default() {
    let event: TapEvent = serde_json::from_str("{}").unwrap();
    assert_eq!(event, TapEvent::default());
    assert_eq!(event.proxy_direction, ProxyDirection::Unknown);
    assert_eq!(event.http, None);
}

#[rstest]
fn test_decode_unrecognized_direction() {
    let event: TapEvent = serde_json::from_value(json!({"proxyDirection": "SIDEWAYS"})).unwrap();
    assert_eq!(event.proxy_direction, ProxyDirection::Unknown);
    assert_eq!(event.proxy_direction.to_string(), "UNKNOWN");
}

#[rstest]
#[case::grpc(json!({"grpcStatusCode": 14}), Some(Eos::GrpcStatusCode(14)))]
#[case::reset(json!({"resetErrorCode": 8}), Some(Eos::ResetErrorCode(8)))]
#[case::none(json!(null), None)]
fn test_decode_end_of_stream(#[case] eos: serde_json::Value, #[case] expected: Option<Eos>) {
    let event: TapEvent = serde_json::from_value(json!({
        "http": {"responseEnd": {"responseBytes": 10, "eos": eos}},
    }))
    .unwrap();

    let Some(HttpEvent::ResponseEnd(end)) = event.http else { panic!("expected a response end") };
    assert_eq!(end.eos, expected);
    assert_eq!(end.response_bytes, 10);
}

#[rstest]
#[case(0, "OK")]
#[case(2, "Unknown")]
#[case(14, "Unavailable")]
#[case(16, "Unauthenticated")]
#[case(17, "Code(17)")]
fn test_grpc_code_names(#[case] code: u32, #[case] expected: &str) {
    assert_eq!(GrpcCode(code).to_string(), expected);
}

#[rstest]
#[case(ProtoDuration { seconds: 0, nanos: 1_234_567 }, 1_234)]
#[case(ProtoDuration { seconds: 2, nanos: 999 }, 2_000_000)]
#[case(ProtoDuration::default(), 0)]
fn test_duration_as_micros(#[case] duration: ProtoDuration, #[case] expected: i64) {
    assert_eq!(duration.as_micros(), expected);
}

#[rstest]
fn test_unregistered_method_has_no_name() {
    assert_eq!(HttpMethod::Unregistered("PROPFIND".into()).registered_name(), "");
    assert_eq!(HttpMethod::Registered(RegisteredMethod::Delete).registered_name(), "DELETE");
    assert_eq!(HttpMethod::Registered(RegisteredMethod::Unknown).registered_name(), "");
}
