use std::sync::{Arc, Mutex};

use crate::overlay::domain::overlay_kind::OverlayKind;
use crate::overlay::domain::overlay_placement::OverlayPlacement;
use crate::overlay::domain::overlay_sink::{OverlayCommand, OverlaySink};

/// Keeps every command in memory.
///
/// Clones share the same log, so a clone can be handed to the pipeline
/// while the original is kept for inspection. Commands registered with
/// [`fail_once`](Self::fail_once) are rejected the next time they arrive
/// and are not recorded.
#[derive(Clone, Debug, Default)]
pub struct RecordingOverlaySink {
    commands: Arc<Mutex<Vec<OverlayCommand>>>,
    failures: Arc<Mutex<Vec<OverlayCommand>>>,
}

impl RecordingOverlaySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> Vec<OverlayCommand> {
        self.commands
            .lock()
            .map(|c| c.clone())
            .unwrap_or_default()
    }

    pub fn placements(&self) -> Vec<OverlayPlacement> {
        self.commands()
            .iter()
            .filter_map(|c| c.placement().copied())
            .collect()
    }

    pub fn take(&self) -> Vec<OverlayCommand> {
        self.commands
            .lock()
            .map(|mut c| std::mem::take(&mut *c))
            .unwrap_or_default()
    }

    /// Makes the next occurrence of `command` fail.
    pub fn fail_once(&self, command: OverlayCommand) {
        if let Ok(mut failures) = self.failures.lock() {
            failures.push(command);
        }
    }

    fn push(&self, command: OverlayCommand) -> Result<(), Box<dyn std::error::Error>> {
        {
            let mut failures = self
                .failures
                .lock()
                .map_err(|_| "Recording sink lock poisoned")?;
            if let Some(i) = failures.iter().position(|f| *f == command) {
                failures.remove(i);
                return Err(format!("Sink rejected {command:?}").into());
            }
        }
        self.commands
            .lock()
            .map_err(|_| "Recording sink lock poisoned")?
            .push(command);
        Ok(())
    }
}

impl OverlaySink for RecordingOverlaySink {
    fn attach_surface(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        self.push(OverlayCommand::AttachSurface)
    }

    fn detach_surface(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        self.push(OverlayCommand::DetachSurface)
    }

    fn clear_overlay(&mut self, kind: OverlayKind) -> Result<(), Box<dyn std::error::Error>> {
        self.push(OverlayCommand::Clear { kind })
    }

    fn apply_placement(
        &mut self,
        placement: &OverlayPlacement,
    ) -> Result<(), Box<dyn std::error::Error>> {
        self.push(OverlayCommand::Apply {
            placement: *placement,
        })
    }
}
