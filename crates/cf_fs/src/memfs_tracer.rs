use std::path::{Path, PathBuf};

use enum_dispatch::enum_dispatch;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraceEvent {
    Read(PathBuf),
    ReadNonexist(PathBuf),
    Create(PathBuf),
    CreateOverwrite(PathBuf),
    CreateDir(PathBuf),
    WriteRejected(PathBuf),
}

#[enum_dispatch]
pub trait Trace {
    fn on_read(&mut self, path: &Path);
    fn on_read_nonexist(&mut self, path: &Path);

    fn on_create(&mut self, path: &Path);
    fn on_create_overwrite(&mut self, path: &Path);
    fn on_create_dir(&mut self, path: &Path);
    fn on_write_rejected(&mut self, path: &Path);

    fn events(&self) -> &[TraceEvent] {
        &[]
    }
}

#[enum_dispatch(Trace)]
#[derive(Debug)]
pub enum Tracer {
    NoopTracer,
    RecordingTracer,
}

impl Default for Tracer {
    fn default() -> Self {
        Self::NoopTracer(Default::default())
    }
}

#[derive(Debug, Default)]
pub struct NoopTracer;

impl Trace for NoopTracer {
    fn on_read(&mut self, _path: &Path) {}

    fn on_read_nonexist(&mut self, _path: &Path) {}

    fn on_create(&mut self, _path: &Path) {}

    fn on_create_overwrite(&mut self, _path: &Path) {}

    fn on_create_dir(&mut self, _path: &Path) {}

    fn on_write_rejected(&mut self, _path: &Path) {}
}

/// Keeps every event in order; used by tests to assert on file traffic.
#[derive(Debug, Default)]
pub struct RecordingTracer {
    events: Vec<TraceEvent>,
}

impl Trace for RecordingTracer {
    fn on_read(&mut self, path: &Path) {
        self.events.push(TraceEvent::Read(path.to_path_buf()));
    }

    fn on_read_nonexist(&mut self, path: &Path) {
        self.events.push(TraceEvent::ReadNonexist(path.to_path_buf()));
    }

    fn on_create(&mut self, path: &Path) {
        self.events.push(TraceEvent::Create(path.to_path_buf()));
    }

    fn on_create_overwrite(&mut self, path: &Path) {
        self.events.push(TraceEvent::CreateOverwrite(path.to_path_buf()));
    }

    fn on_create_dir(&mut self, path: &Path) {
        self.events.push(TraceEvent::CreateDir(path.to_path_buf()));
    }

    fn on_write_rejected(&mut self, path: &Path) {
        self.events.push(TraceEvent::WriteRejected(path.to_path_buf()));
    }

    fn events(&self) -> &[TraceEvent] {
        &self.events
    }
}
