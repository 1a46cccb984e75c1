#![forbid(unsafe_code)]

//! Tracing instrumentation tests.
//!
//! Verifies that header index rebuilds open a span and that sticky header
//! changes and data replacement are logged, using a capturing layer.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use pintree::prelude::*;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;

// ============================================================================
// Test Infrastructure
// ============================================================================

#[derive(Debug, Clone)]
struct CapturedEvent {
    message: String,
    fields: HashMap<String, String>,
}

#[derive(Default, Clone)]
struct Capture {
    spans: Arc<Mutex<Vec<(String, HashMap<String, String>)>>>,
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl Capture {
    fn span_names(&self) -> Vec<String> {
        self.spans
            .lock()
            .unwrap()
            .iter()
            .map(|(n, _)| n.clone())
            .collect()
    }

    fn events_with(&self, message: &str) -> Vec<CapturedEvent> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.message == message)
            .cloned()
            .collect()
    }
}

struct FieldVisitor(HashMap<String, String>);

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0
            .insert(field.name().to_string(), format!("{value:?}"));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0.insert(field.name().to_string(), value.to_string());
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.0.insert(field.name().to_string(), value.to_string());
    }
}

impl<S> tracing_subscriber::Layer<S> for Capture
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_new_span(
        &self,
        attrs: &tracing::span::Attributes<'_>,
        _id: &tracing::span::Id,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let mut visitor = FieldVisitor(HashMap::new());
        attrs.record(&mut visitor);
        self.spans
            .lock()
            .unwrap()
            .push((attrs.metadata().name().to_string(), visitor.0));
    }

    fn on_event(&self, event: &tracing::Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
        let mut visitor = FieldVisitor(HashMap::new());
        event.record(&mut visitor);
        let mut fields = visitor.0;
        let message = fields
            .remove("message")
            .unwrap_or_default()
            .trim_matches('"')
            .to_string();
        self.events
            .lock()
            .unwrap()
            .push(CapturedEvent { message, fields });
    }
}

fn with_capture(f: impl FnOnce()) -> Capture {
    let capture = Capture::default();
    let subscriber = tracing_subscriber::registry().with(capture.clone());
    tracing::subscriber::with_default(subscriber, f);
    capture
}

struct Resting(f32);

impl Viewport for Resting {
    fn scroll_top(&self) -> f32 {
        self.0
    }

    fn recompute_row_heights(&mut self, _start_index: usize) {}
}

fn sample_tree() -> StickyTree<&'static str, ()> {
    let rows = flatten(&[
        Node::new(1, "a").child(Node::new(2, "a.1")),
        Node::new(3, "b").child(Node::new(4, "b.1")),
    ]);
    StickyTree::builder(rows)
        .row_renderer(|_| ())
        .on_change(|_| {})
        .build()
        .unwrap()
}

// ============================================================================
// Tests
// ============================================================================

#[test]
fn header_index_rebuild_opens_span() {
    let capture = with_capture(|| {
        let mut tree = sample_tree();
        tree.mount(&Resting(0.0));
        tree.on_scroll(ScrollEvent::at(50.0));
    });

    let rebuilds = capture
        .span_names()
        .into_iter()
        .filter(|n| n == "header_index")
        .count();
    // Once for mount, once for the scroll.
    assert_eq!(rebuilds, 2);
}

#[test]
fn sticky_changes_are_logged_once_per_identity() {
    let capture = with_capture(|| {
        let mut tree = sample_tree();
        tree.mount(&Resting(0.0));
        for top in [5.0, 10.0, 15.0, 45.0, 50.0] {
            tree.on_scroll(ScrollEvent::at(top));
        }
    });

    let changes = capture.events_with("sticky header changed");
    assert_eq!(changes.len(), 2, "mount pin + switch to second group");
    assert_eq!(
        changes[1].fields.get("to").map(String::as_str),
        Some("Some(NodeId(3))")
    );
}

#[test]
fn replacement_is_logged() {
    let capture = with_capture(|| {
        let mut tree = sample_tree();
        let mut viewport = Resting(0.0);
        tree.set_nodes(vec![Node::new(9, "z")], &mut viewport);
    });

    let replaced = capture.events_with("node sequence replaced");
    assert_eq!(replaced.len(), 1);
    assert_eq!(
        replaced[0].fields.get("new_rows").map(String::as_str),
        Some("1")
    );
}

#[test]
fn rejected_measurement_warns() {
    let capture = with_capture(|| {
        let mut tree = sample_tree();
        assert!(!tree.record_row_height(0, f32::NAN));
    });
    assert_eq!(capture.events_with("rejected row measurement").len(), 1);
}
