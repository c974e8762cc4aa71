use camera_rig::components::{CameraComponent, CameraContext, CameraController, VirtualCamera};
use std::any::Any;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Shared record of everything a test component or controller saw.
#[derive(Debug, Default)]
pub struct CallLog {
    pub initialize: AtomicUsize,
    pub activate: AtomicUsize,
    pub deactivate: AtomicUsize,
    pub update: AtomicUsize,
    pub dispose: AtomicUsize,
    pub deltas: Mutex<Vec<f32>>,
}

impl CallLog {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn count(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }

    pub fn last_delta(&self) -> Option<f32> {
        self.deltas.lock().ok().and_then(|deltas| deltas.last().copied())
    }
}

/// Ordered trace across several components and controllers.
pub type Trace = Arc<Mutex<Vec<String>>>;

pub fn new_trace() -> Trace {
    Arc::new(Mutex::new(Vec::new()))
}

fn push_trace(trace: &Option<Trace>, entry: String) {
    if let Some(trace) = trace {
        if let Ok(mut trace) = trace.lock() {
            trace.push(entry);
        }
    }
}

pub struct CountingComponent {
    pub camera: VirtualCamera,
    pub log: Arc<CallLog>,
    pub trace: Option<Trace>,
}

impl CountingComponent {
    pub fn new(camera: VirtualCamera, log: Arc<CallLog>) -> Self {
        Self {
            camera,
            log,
            trace: None,
        }
    }

    pub fn with_trace(mut self, trace: Trace) -> Self {
        self.trace = Some(trace);
        self
    }
}

impl CameraComponent for CountingComponent {
    fn camera(&self) -> &VirtualCamera {
        &self.camera
    }

    fn initialize(&mut self, _context: &CameraContext) {
        self.log.initialize.fetch_add(1, Ordering::SeqCst);
    }

    fn activate(&mut self) {
        self.log.activate.fetch_add(1, Ordering::SeqCst);
        self.camera.set_enabled(true);
    }

    fn deactivate(&mut self) {
        self.log.deactivate.fetch_add(1, Ordering::SeqCst);
        self.camera.set_enabled(false);
    }

    fn update(&mut self, delta_time: f32) {
        self.log.update.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut deltas) = self.log.deltas.lock() {
            deltas.push(delta_time);
        }
        push_trace(&self.trace, format!("component:{}", self.camera.name()));
    }

    fn dispose(&mut self) {
        self.log.dispose.fetch_add(1, Ordering::SeqCst);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

pub struct CountingController {
    pub label: String,
    pub log: Arc<CallLog>,
    pub trace: Option<Trace>,
}

impl CountingController {
    pub fn new(label: &str, log: Arc<CallLog>) -> Self {
        Self {
            label: label.to_string(),
            log,
            trace: None,
        }
    }

    pub fn with_trace(mut self, trace: Trace) -> Self {
        self.trace = Some(trace);
        self
    }
}

impl CameraController for CountingController {
    fn initialize(&mut self, _component: &dyn CameraComponent) {
        self.log.initialize.fetch_add(1, Ordering::SeqCst);
    }

    fn activate(&mut self) {
        self.log.activate.fetch_add(1, Ordering::SeqCst);
    }

    fn deactivate(&mut self) {
        self.log.deactivate.fetch_add(1, Ordering::SeqCst);
    }

    fn update(&mut self, delta_time: f32) {
        self.log.update.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut deltas) = self.log.deltas.lock() {
            deltas.push(delta_time);
        }
        push_trace(&self.trace, format!("controller:{}", self.label));
    }

    fn dispose(&mut self) {
        self.log.dispose.fetch_add(1, Ordering::SeqCst);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
