use std::collections::HashSet;

use assertables::*;
use rstest::*;

use crate::display::DisplayEvent;
use crate::event::{
    Eos,
    ProxyDirection,
    TapEvent,
};
use crate::k8s::ShortNames;
use crate::render::render_line;
use crate::testutils::*;

fn compact(event: &TapEvent) -> String {
    render_line(&DisplayEvent::from(event), None, &ShortNames::default())
}

fn wide(event: &TapEvent, kind: &str) -> String {
    render_line(&DisplayEvent::from(event), Some(kind), &ShortNames::default())
}

#[rstest]
fn test_compact_request_init(request_init: TapEvent) {
    assert_eq!(
        compact(&request_init),
        "req id=1:2 proxy=in  src=10.0.0.1:80 dst=10.0.0.2:8080 tls= :method=GET :authority=example.com :path=/x"
    );
}

#[rstest]
fn test_compact_response_init(response_init: TapEvent) {
    insta::assert_snapshot!(
        compact(&response_init),
        @"rsp id=1:2 proxy=in  src=10.0.0.1:80 dst=10.0.0.2:8080 tls= :status=200 latency=1234µs"
    );
}

#[rstest]
#[case::grpc(
    Some(Eos::GrpcStatusCode(14)),
    "end id=1:2 proxy=in  src=10.0.0.1:80 dst=10.0.0.2:8080 tls= grpc-status=Unavailable duration=3500µs response-length=42B"
)]
#[case::grpc_ok(
    Some(Eos::GrpcStatusCode(0)),
    "end id=1:2 proxy=in  src=10.0.0.1:80 dst=10.0.0.2:8080 tls= grpc-status=OK duration=3500µs response-length=42B"
)]
#[case::reset(
    Some(Eos::ResetErrorCode(2)),
    "end id=1:2 proxy=in  src=10.0.0.1:80 dst=10.0.0.2:8080 tls= reset-error=2 duration=3500µs response-length=42B"
)]
#[case::none(None, "end id=1:2 proxy=in  src=10.0.0.1:80 dst=10.0.0.2:8080 tls= duration=3500µs response-length=42B")]
fn test_compact_response_end(#[case] eos: Option<Eos>, #[case] expected: &str) {
    assert_eq!(compact(&response_end_with(eos)), expected);
}

#[rstest]
fn test_compact_unknown(unknown_event: TapEvent) {
    insta::assert_snapshot!(compact(&unknown_event), @"unknown proxy=in  src=10.0.0.1:80 dst=10.0.0.2:8080 tls=");
}

#[rstest]
#[case::inbound(ProxyDirection::Inbound, "proxy=in  ", "tls=src-tls ")]
#[case::outbound(ProxyDirection::Outbound, "proxy=out ", "tls=dst-tls ")]
#[case::unknown(ProxyDirection::Unknown, "proxy=??? ", "tls= ")]
fn test_proxy_direction_and_tls(
    request_init: TapEvent,
    #[case] direction: ProxyDirection,
    #[case] proxy: &str,
    #[case] tls: &str,
) {
    let mut event = request_init;
    event.proxy_direction = direction;
    event.source_meta = labels(&[("tls", "src-tls")]);
    event.destination_meta = labels(&[("tls", "dst-tls")]);

    let line = compact(&event);
    assert_contains!(line, proxy);
    assert_contains!(line, tls);
}

#[rstest]
fn test_compact_ignores_peer_labels(request_init: TapEvent) {
    let mut event = request_init;
    event.source_meta = labels(&[("deployment", "web"), ("namespace", "emojivoto")]);
    event.route_meta = labels(&[("route", "/x")]);

    assert_ends_with!(compact(&event), ":path=/x");
}

#[rstest]
fn test_wide_resource_and_pod_fallback(request_init: TapEvent) {
    let mut event = request_init;
    event.source_meta = labels(&[("deployment", "web"), ("pod", "web-abc"), ("namespace", "emojivoto")]);
    event.destination_meta = labels(&[("pod", "voting-xyz"), ("namespace", "emojivoto")]);

    insta::assert_snapshot!(
        wide(&event, "deployment"),
        @"req id=1:2 proxy=in  src=10.0.0.1:80 dst=10.0.0.2:8080 tls= :method=GET :authority=example.com :path=/x src_res=deploy/web src_ns=emojivoto dst_pod=voting-xyz dst_ns=emojivoto"
    );
}

#[rstest]
fn test_wide_namespace_kind_skips_ns_label(response_init: TapEvent) {
    let mut event = response_init;
    event.source_meta = labels(&[("namespace", "emojivoto")]);

    let line = wide(&event, "namespace");
    assert_ends_with!(line, "latency=1234µs src_res=ns/emojivoto");
    assert_not_contains!(line, "src_ns=");
}

#[rstest]
fn test_wide_without_resource_or_pod(response_end: TapEvent) {
    let mut event = response_end;
    event.destination_meta = labels(&[("namespace", "prod")]);

    assert_ends_with!(wide(&event, "deployment"), "response-length=42B dst_ns=prod");
}

#[rstest]
fn test_wide_unabbreviated_kind(request_init: TapEvent) {
    let mut event = request_init;
    event.source_meta = labels(&[("widget", "w-1")]);

    assert_ends_with!(wide(&event, "widget"), " src_res=widget/w-1");
}

#[rstest]
fn test_wide_route_labels(request_init: TapEvent) {
    let mut event = request_init;
    event.route_meta = labels(&[("route", "GET /books"), ("service", "books")]);

    let line = wide(&event, "deployment");
    let (_, suffix) = line.split_once(":path=/x").unwrap();

    let labels: HashSet<_> = suffix.split(" rt_").filter(|s| !s.is_empty()).collect();
    assert_eq!(labels, HashSet::from(["route=GET /books", "service=books"]));
}

#[rstest]
fn test_unknown_event_has_no_route_labels(unknown_event: TapEvent) {
    let mut event = unknown_event;
    event.route_meta = labels(&[("route", "GET /books")]);

    assert_eq!(wide(&event, "deployment"), "unknown proxy=in  src=10.0.0.1:80 dst=10.0.0.2:8080 tls=");
}

#[rstest]
fn test_empty_resource_kind_is_compact(request_init: TapEvent) {
    let mut event = request_init;
    event.source_meta = labels(&[("deployment", "web")]);

    assert_eq!(wide(&event, ""), compact(&event));
}

#[rstest]
fn test_missing_addresses_render_empty(unknown_event: TapEvent) {
    let mut event = unknown_event;
    event.source.ip = None;
    event.destination = Default::default();

    assert_eq!(compact(&event), "unknown proxy=in  src=:80 dst=:0 tls=");
}
