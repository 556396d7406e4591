use crate::overlay::domain::overlay_kind::OverlayKind;
use crate::overlay::domain::overlay_layers::{OverlayLayers, StalePlacementPolicy};
use crate::overlay::domain::overlay_sink::OverlaySink;
use crate::overlay::domain::presence_tracker::{PresenceState, PresenceTracker, SurfaceTransition};
use crate::pipeline::frame_update::FrameUpdate;

/// What presenting one update did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PresentReport {
    pub transition: Option<SurfaceTransition>,
    pub applied: usize,
    pub cleared: usize,
    /// Sink calls that returned an error.
    pub sink_failures: usize,
}

/// Applies frame updates to the rendering sink.
///
/// Lives on the rendering thread and is the only owner of presence state
/// and the last-applied placements, so the sink never sees interleaved
/// updates from different frames.
///
/// Sink errors are logged and counted, never returned. Presence is rolled
/// back and layers are left alone when the sink rejects a call, so a failed
/// attach or clear is issued again by a later frame.
pub struct OverlayPresenter {
    sink: Box<dyn OverlaySink>,
    presence: PresenceTracker,
    layers: OverlayLayers,
    policy: StalePlacementPolicy,
    last_frame: Option<usize>,
}

impl OverlayPresenter {
    pub fn new(sink: Box<dyn OverlaySink>, policy: StalePlacementPolicy) -> Self {
        Self {
            sink,
            presence: PresenceTracker::new(),
            layers: OverlayLayers::new(),
            policy,
            last_frame: None,
        }
    }

    pub fn presence(&self) -> PresenceState {
        self.presence.state()
    }

    pub fn layers(&self) -> &OverlayLayers {
        &self.layers
    }

    /// Index of the newest update presented so far.
    pub fn last_frame(&self) -> Option<usize> {
        self.last_frame
    }

    /// Returns `None` when the update is older than one already presented.
    pub fn present(&mut self, update: &FrameUpdate) -> Option<PresentReport> {
        if self.last_frame.is_some_and(|last| update.frame_index <= last) {
            log::debug!(
                "Discarding stale update for frame {} (already at {:?})",
                update.frame_index,
                self.last_frame
            );
            return None;
        }
        self.last_frame = Some(update.frame_index);

        let mut report = PresentReport::default();

        if let Some(transition) = self.presence.observe(update.face_count) {
            let result = match transition {
                SurfaceTransition::Attach => self.sink.attach_surface(),
                SurfaceTransition::Detach => self.sink.detach_surface(),
            };
            if let Err(e) = result {
                log::warn!(
                    "Frame {}: surface {transition:?} failed: {e}",
                    update.frame_index
                );
                self.presence.revert(transition);
                report.sink_failures += 1;
                return Some(report);
            }
            report.transition = Some(transition);
        }

        if !update.has_faces() {
            for kind in self.layers.occupied() {
                self.clear(kind, update.frame_index, &mut report);
            }
            return Some(report);
        }

        if let Some(issue) = update.issue {
            log::debug!(
                "Frame {}: {}, leaving overlays untouched",
                update.frame_index,
                issue.name()
            );
            return Some(report);
        }

        // Kinds the sink refused to clear keep their old placement.
        let mut uncleared = Vec::new();
        if self.policy == StalePlacementPolicy::Clear {
            for kind in OverlayKind::ALL {
                if !self.clear(kind, update.frame_index, &mut report) {
                    uncleared.push(kind);
                }
            }
        }

        for placement in &update.placements {
            let cleared = match self.policy {
                StalePlacementPolicy::Retain => {
                    self.clear(placement.kind, update.frame_index, &mut report)
                }
                StalePlacementPolicy::Clear => !uncleared.contains(&placement.kind),
            };
            if !cleared {
                continue;
            }
            match self.sink.apply_placement(placement) {
                Ok(()) => {
                    self.layers.set(*placement);
                    report.applied += 1;
                }
                Err(e) => {
                    log::warn!(
                        "Frame {}: applying {} failed: {e}",
                        update.frame_index,
                        placement.kind
                    );
                    report.sink_failures += 1;
                }
            }
        }

        Some(report)
    }

    /// Returns whether the sink cleared `kind`.
    fn clear(
        &mut self,
        kind: OverlayKind,
        frame_index: usize,
        report: &mut PresentReport,
    ) -> bool {
        match self.sink.clear_overlay(kind) {
            Ok(()) => {
                self.layers.clear(kind);
                report.cleared += 1;
                true
            }
            Err(e) => {
                log::warn!("Frame {frame_index}: clearing {kind} failed: {e}");
                report.sink_failures += 1;
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlay::domain::overlay_placement::{Mirror, OverlayPlacement};
    use crate::overlay::domain::overlay_sink::OverlayCommand;
    use crate::overlay::infrastructure::recording_overlay_sink::RecordingOverlaySink;
    use crate::pipeline::frame_update::FrameIssue;
    use crate::shared::geometry::ScreenPoint;

    fn placement(kind: OverlayKind, x: f64) -> OverlayPlacement {
        OverlayPlacement {
            kind,
            position: ScreenPoint::new(x, 0.0),
            scale: -1.0,
            mirror: Mirror::BOTH,
        }
    }

    fn face_update(index: usize, kinds: &[OverlayKind]) -> FrameUpdate {
        FrameUpdate {
            placements: kinds.iter().map(|k| placement(*k, index as f64)).collect(),
            ..FrameUpdate::new(index, 1)
        }
    }

    fn presenter(policy: StalePlacementPolicy) -> (OverlayPresenter, RecordingOverlaySink) {
        let sink = RecordingOverlaySink::new();
        (OverlayPresenter::new(Box::new(sink.clone()), policy), sink)
    }

    fn clear(kind: OverlayKind) -> OverlayCommand {
        OverlayCommand::Clear { kind }
    }

    fn apply(kind: OverlayKind, x: f64) -> OverlayCommand {
        OverlayCommand::Apply {
            placement: placement(kind, x),
        }
    }

    #[test]
    fn test_first_face_attaches_then_clears_and_applies() {
        let (mut p, sink) = presenter(StalePlacementPolicy::Retain);

        let report = p.present(&face_update(0, &OverlayKind::ALL)).unwrap();

        assert_eq!(report.transition, Some(SurfaceTransition::Attach));
        assert_eq!(report.applied, 3);
        assert_eq!(
            sink.commands(),
            vec![
                OverlayCommand::AttachSurface,
                clear(OverlayKind::Nose),
                apply(OverlayKind::Nose, 0.0),
                clear(OverlayKind::LeftEar),
                apply(OverlayKind::LeftEar, 0.0),
                clear(OverlayKind::RightEar),
                apply(OverlayKind::RightEar, 0.0),
            ]
        );
        assert_eq!(p.presence(), PresenceState::Visible);
    }

    #[test]
    fn test_no_face_frame_detaches_and_clears_shown_overlays() {
        let (mut p, sink) = presenter(StalePlacementPolicy::Retain);
        p.present(&face_update(0, &[OverlayKind::Nose]));
        sink.take();

        let report = p.present(&FrameUpdate::new(1, 0)).unwrap();

        assert_eq!(report.transition, Some(SurfaceTransition::Detach));
        assert_eq!(report.applied, 0);
        assert_eq!(
            sink.commands(),
            vec![OverlayCommand::DetachSurface, clear(OverlayKind::Nose)]
        );
        assert!(p.layers().occupied().is_empty());
        assert_eq!(p.presence(), PresenceState::Hidden);
    }

    #[test]
    fn test_repeated_empty_frames_are_silent() {
        let (mut p, sink) = presenter(StalePlacementPolicy::Retain);
        p.present(&FrameUpdate::new(0, 0));
        p.present(&FrameUpdate::new(1, 0));
        assert!(sink.commands().is_empty());
    }

    #[test]
    fn test_retain_keeps_occluded_overlay() {
        let (mut p, sink) = presenter(StalePlacementPolicy::Retain);
        p.present(&face_update(0, &OverlayKind::ALL));
        sink.take();

        p.present(&face_update(1, &[OverlayKind::Nose, OverlayKind::RightEar]));

        assert_eq!(
            sink.commands(),
            vec![
                clear(OverlayKind::Nose),
                apply(OverlayKind::Nose, 1.0),
                clear(OverlayKind::RightEar),
                apply(OverlayKind::RightEar, 1.0),
            ]
        );
        // Left ear still shows frame 0's placement.
        assert_eq!(
            p.layers().get(OverlayKind::LeftEar).unwrap().position.x,
            0.0
        );
    }

    #[test]
    fn test_clear_policy_wipes_all_before_applying() {
        let (mut p, sink) = presenter(StalePlacementPolicy::Clear);
        p.present(&face_update(0, &OverlayKind::ALL));
        sink.take();

        p.present(&face_update(1, &[OverlayKind::Nose]));

        assert_eq!(
            sink.commands(),
            vec![
                clear(OverlayKind::Nose),
                clear(OverlayKind::LeftEar),
                clear(OverlayKind::RightEar),
                apply(OverlayKind::Nose, 1.0),
            ]
        );
        assert_eq!(p.layers().occupied(), vec![OverlayKind::Nose]);
    }

    #[test]
    fn test_issue_frame_leaves_overlays_untouched() {
        let (mut p, sink) = presenter(StalePlacementPolicy::Clear);
        p.present(&face_update(0, &[OverlayKind::Nose]));
        sink.take();

        let update = FrameUpdate::new(1, 1).with_issue(FrameIssue::ViewportUnavailable);
        let report = p.present(&update).unwrap();

        assert_eq!(report, PresentReport::default());
        assert!(sink.commands().is_empty());
        assert_eq!(p.layers().occupied(), vec![OverlayKind::Nose]);
    }

    #[test]
    fn test_out_of_order_update_is_discarded() {
        let (mut p, sink) = presenter(StalePlacementPolicy::Retain);
        p.present(&face_update(5, &[OverlayKind::Nose]));
        sink.take();

        assert!(p.present(&face_update(4, &[OverlayKind::Nose])).is_none());
        assert!(p.present(&FrameUpdate::new(5, 0)).is_none());

        assert!(sink.commands().is_empty());
        assert_eq!(p.presence(), PresenceState::Visible);
    }

    #[test]
    fn test_presence_signals_follow_face_counts() {
        let (mut p, sink) = presenter(StalePlacementPolicy::Retain);
        let counts = [0, 0, 3, 3, 0, 2];
        let transitions: Vec<Option<SurfaceTransition>> = counts
            .iter()
            .enumerate()
            .map(|(i, n)| {
                p.present(&FrameUpdate::new(i, *n)).unwrap().transition
            })
            .collect();

        assert_eq!(
            transitions,
            vec![
                None,
                None,
                Some(SurfaceTransition::Attach),
                None,
                Some(SurfaceTransition::Detach),
                Some(SurfaceTransition::Attach),
            ]
        );
        assert_eq!(
            sink.commands(),
            vec![
                OverlayCommand::AttachSurface,
                OverlayCommand::DetachSurface,
                OverlayCommand::AttachSurface,
            ]
        );
    }

    #[test]
    fn test_failed_attach_is_retried_on_next_face_frame() {
        let (mut p, sink) = presenter(StalePlacementPolicy::Retain);
        sink.fail_once(OverlayCommand::AttachSurface);

        let first = p.present(&face_update(0, &[OverlayKind::Nose])).unwrap();
        assert_eq!(first.sink_failures, 1);
        assert_eq!(first.transition, None);
        assert_eq!(first.applied, 0);
        assert_eq!(p.presence(), PresenceState::Hidden);
        assert!(sink.commands().is_empty());

        let second = p.present(&face_update(1, &[OverlayKind::Nose])).unwrap();
        assert_eq!(second.transition, Some(SurfaceTransition::Attach));
        assert_eq!(second.applied, 1);
        assert_eq!(
            sink.commands(),
            vec![
                OverlayCommand::AttachSurface,
                clear(OverlayKind::Nose),
                apply(OverlayKind::Nose, 1.0),
            ]
        );
        assert_eq!(p.presence(), PresenceState::Visible);
    }

    #[test]
    fn test_failed_clear_keeps_layer_and_skips_its_placement() {
        let (mut p, sink) = presenter(StalePlacementPolicy::Retain);
        p.present(&face_update(0, &[OverlayKind::Nose, OverlayKind::LeftEar]));
        sink.take();
        sink.fail_once(clear(OverlayKind::Nose));

        let report = p
            .present(&face_update(1, &[OverlayKind::Nose, OverlayKind::LeftEar]))
            .unwrap();

        assert_eq!(report.sink_failures, 1);
        assert_eq!(report.applied, 1);
        assert_eq!(
            sink.commands(),
            vec![clear(OverlayKind::LeftEar), apply(OverlayKind::LeftEar, 1.0)]
        );
        // Nose still shows frame 0's placement.
        assert_eq!(p.layers().get(OverlayKind::Nose).unwrap().position.x, 0.0);
    }

    #[test]
    fn test_failed_clear_on_absence_is_retried() {
        let (mut p, sink) = presenter(StalePlacementPolicy::Retain);
        p.present(&face_update(0, &[OverlayKind::Nose]));
        sink.take();
        sink.fail_once(clear(OverlayKind::Nose));

        let report = p.present(&FrameUpdate::new(1, 0)).unwrap();
        assert_eq!(report.sink_failures, 1);
        assert_eq!(p.layers().occupied(), vec![OverlayKind::Nose]);

        p.present(&FrameUpdate::new(2, 0));
        assert!(p.layers().occupied().is_empty());
        assert_eq!(
            sink.commands(),
            vec![OverlayCommand::DetachSurface, clear(OverlayKind::Nose)]
        );
    }

    #[test]
    fn test_failed_detach_keeps_surface_visible() {
        let (mut p, sink) = presenter(StalePlacementPolicy::Clear);
        p.present(&face_update(0, &[OverlayKind::Nose]));
        sink.take();
        sink.fail_once(OverlayCommand::DetachSurface);

        let report = p.present(&FrameUpdate::new(1, 0)).unwrap();

        assert_eq!(report.sink_failures, 1);
        assert_eq!(p.presence(), PresenceState::Visible);
        assert!(sink.commands().is_empty());

        let retry = p.present(&FrameUpdate::new(2, 0)).unwrap();
        assert_eq!(retry.transition, Some(SurfaceTransition::Detach));
        assert_eq!(p.presence(), PresenceState::Hidden);
    }

    #[test]
    fn test_failed_apply_leaves_layer_empty() {
        let (mut p, sink) = presenter(StalePlacementPolicy::Clear);
        sink.fail_once(apply(OverlayKind::LeftEar, 0.0));

        let report = p.present(&face_update(0, &OverlayKind::ALL)).unwrap();

        assert_eq!(report.sink_failures, 1);
        assert_eq!(report.applied, 2);
        assert_eq!(
            p.layers().occupied(),
            vec![OverlayKind::Nose, OverlayKind::RightEar]
        );
    }
}
