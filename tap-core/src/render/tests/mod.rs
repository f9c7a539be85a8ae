mod line_test;

use rstest::*;

use super::*;
use crate::testutils::*;
use crate::TapEvent;

#[rstest]
fn test_renderer_compact(request_init: TapEvent) {
    let display = DisplayEvent::from(&request_init);
    let renderer = Renderer::new(OutputMode::Compact);
    assert_eq!(renderer.render(&display), render_line(&display, None, &ShortNames::default()));
}

#[rstest]
fn test_renderer_wide(request_init: TapEvent) {
    let mut event = request_init;
    event.source_meta = labels(&[("deployment", "web")]);
    let display = DisplayEvent::from(&event);

    let renderer = Renderer::new(OutputMode::Wide { resource_kind: "deployment".into() });
    assert_eq!(renderer.render(&display), render_line(&display, Some("deployment"), &ShortNames::default()));
}

#[rstest]
fn test_renderer_wide_custom_short_names(request_init: TapEvent) {
    let mut event = request_init;
    event.source_meta = labels(&[("deployment", "web")]);
    let display = DisplayEvent::from(&event);

    let renderer = Renderer::new(OutputMode::Wide { resource_kind: "deployment".into() })
        .with_short_names(ShortNames::empty());
    assert!(renderer.render(&display).ends_with(" src_res=deployment/web"));
}

#[rstest]
fn test_renderer_json(response_init: TapEvent) {
    let display = DisplayEvent::from(&response_init);
    let renderer = Renderer::new(OutputMode::Json);
    assert_eq!(renderer.render(&display), render_json(&display));
}
