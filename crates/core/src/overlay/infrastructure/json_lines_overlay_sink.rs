use std::io::Write;

use crate::overlay::domain::overlay_kind::OverlayKind;
use crate::overlay::domain::overlay_placement::OverlayPlacement;
use crate::overlay::domain::overlay_sink::{OverlayCommand, OverlaySink};

/// Writes one JSON object per command, newline-delimited.
///
/// Lets an external renderer (or a test harness in another language)
/// consume the exact command stream the pipeline produced.
pub struct JsonLinesOverlaySink<W: Write + Send> {
    out: W,
    written: usize,
}

impl<W: Write + Send> JsonLinesOverlaySink<W> {
    pub fn new(out: W) -> Self {
        Self { out, written: 0 }
    }

    pub fn written(&self) -> usize {
        self.written
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, command: &OverlayCommand) -> Result<(), Box<dyn std::error::Error>> {
        serde_json::to_writer(&mut self.out, command)?;
        self.out.write_all(b"\n")?;
        self.out.flush()?;
        self.written += 1;
        Ok(())
    }
}

impl<W: Write + Send> OverlaySink for JsonLinesOverlaySink<W> {
    fn attach_surface(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        self.emit(&OverlayCommand::AttachSurface)
    }

    fn detach_surface(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        self.emit(&OverlayCommand::DetachSurface)
    }

    fn clear_overlay(&mut self, kind: OverlayKind) -> Result<(), Box<dyn std::error::Error>> {
        self.emit(&OverlayCommand::Clear { kind })
    }

    fn apply_placement(
        &mut self,
        placement: &OverlayPlacement,
    ) -> Result<(), Box<dyn std::error::Error>> {
        self.emit(&OverlayCommand::Apply {
            placement: *placement,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlay::domain::overlay_placement::Mirror;
    use crate::shared::geometry::ScreenPoint;

    #[test]
    fn test_each_command_is_one_line() {
        let mut sink = JsonLinesOverlaySink::new(Vec::new());
        sink.attach_surface().unwrap();
        sink.clear_overlay(OverlayKind::RightEar).unwrap();
        sink.apply_placement(&OverlayPlacement {
            kind: OverlayKind::Nose,
            position: ScreenPoint::new(10.0, 20.0),
            scale: -0.5,
            mirror: Mirror::BOTH,
        })
        .unwrap();
        assert_eq!(sink.written(), 3);

        let text = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], r#"{"command":"attach_surface"}"#);
        assert_eq!(lines[1], r#"{"command":"clear","kind":"right_ear"}"#);

        let parsed: OverlayCommand = serde_json::from_str(lines[2]).unwrap();
        let placement = parsed.placement().unwrap();
        assert_eq!(placement.kind, OverlayKind::Nose);
        assert_eq!(placement.position, ScreenPoint::new(10.0, 20.0));
    }
}
