use rstest::fixture;

use crate::event::*;

pub fn ipv4(octets: [u8; 4]) -> Option<IpAddress> {
    Some(IpAddress::Ipv4(u32::from_be_bytes(octets)))
}

pub fn labels(pairs: &[(&str, &str)]) -> Metadata {
    Metadata {
        labels: pairs.iter().map(|(k, v)| ((*k).into(), (*v).into())).collect(),
    }
}

pub fn duration_us(micros: i64) -> ProtoDuration {
    ProtoDuration {
        seconds: micros / 1_000_000,
        nanos: i32::try_from((micros % 1_000_000) * 1_000).unwrap(),
    }
}

/// An inbound event from 10.0.0.1:80 to 10.0.0.2:8080 carrying `http`.
pub fn tap_event(http: Option<HttpEvent>) -> TapEvent {
    TapEvent {
        source: TcpAddress { ip: ipv4([10, 0, 0, 1]), port: 80 },
        destination: TcpAddress { ip: ipv4([10, 0, 0, 2]), port: 8080 },
        proxy_direction: ProxyDirection::Inbound,
        http,
        ..Default::default()
    }
}

pub const TEST_STREAM: StreamId = StreamId { base: 1, stream: 2 };

#[fixture]
pub fn request_init() -> TapEvent {
    tap_event(Some(HttpEvent::RequestInit(RequestInit {
        id: TEST_STREAM,
        method: Some(HttpMethod::Registered(RegisteredMethod::Get)),
        scheme: Some(Scheme::Registered(RegisteredScheme::Http)),
        authority: "example.com".into(),
        path: "/x".into(),
    })))
}

#[fixture]
pub fn response_init() -> TapEvent {
    tap_event(Some(HttpEvent::ResponseInit(ResponseInit {
        id: TEST_STREAM,
        since_request_init: duration_us(1_234),
        http_status: 200,
    })))
}

#[fixture]
pub fn response_end() -> TapEvent {
    response_end_with(None)
}

pub fn response_end_with(eos: Option<Eos>) -> TapEvent {
    tap_event(Some(HttpEvent::ResponseEnd(ResponseEnd {
        id: TEST_STREAM,
        since_request_init: duration_us(5_000),
        since_response_init: duration_us(3_500),
        response_bytes: 42,
        eos,
    })))
}

#[fixture]
pub fn unknown_event() -> TapEvent {
    tap_event(None)
}
