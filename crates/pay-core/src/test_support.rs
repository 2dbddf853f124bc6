//! Test helpers shared across modules

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::Layer;

/// One recorded event: level plus its fields rendered as strings
pub type Recorded = (Level, HashMap<String, String>);

/// Layer that keeps every event it sees
#[derive(Clone, Default)]
pub struct CaptureLayer {
    recorded: Arc<Mutex<Vec<Recorded>>>,
}

impl CaptureLayer {
    pub fn events(&self) -> Vec<Recorded> {
        self.recorded.lock().unwrap().clone()
    }
}

struct FieldRecorder<'a>(&'a mut HashMap<String, String>);

impl Visit for FieldRecorder<'_> {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.0.insert(field.name().to_string(), value.to_string());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.0.insert(field.name().to_string(), format!("{:?}", value));
    }
}

impl<S: Subscriber> Layer<S> for CaptureLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut fields = HashMap::new();
        event.record(&mut FieldRecorder(&mut fields));
        self.recorded
            .lock()
            .unwrap()
            .push((*event.metadata().level(), fields));
    }
}
