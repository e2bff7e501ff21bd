//! # Possession Resolver
//!
//! Decides per frame which player controls the ball, marks that player's
//! `has_ball`, and builds the team possession timeline.
//!
//! Frames without an assignment inherit the previous frame's team, so a
//! ball in flight between teammates stays with the passing team.

pub mod assigner;
pub mod timeline;

pub use assigner::{BallAssigner, NearestFootAssigner};
pub use timeline::{split_possession, PossessionMark, PossessionShare, PossessionTimeline};

use tracing::{debug, info, trace};

use crate::error::{AnalyticsError, Result};
use crate::tracks::{BoundingBox, TrackStore, BALL, PLAYERS};

/// Resolve ball possession for every frame.
///
/// Any `has_ball` flags already present on players are cleared first so at
/// most one player per frame holds the ball afterwards. The returned
/// timeline has exactly one mark per frame.
pub fn resolve_possession<A>(store: &mut TrackStore, assigner: &A) -> Result<PossessionTimeline>
where
    A: BallAssigner + ?Sized,
{
    let ball_boxes: Vec<Option<BoundingBox>> = store
        .ball()?
        .iter()
        .map(|frame| frame.values().find_map(|record| record.bbox))
        .collect();

    let players = store.require_mut(PLAYERS)?;
    if players.len() != ball_boxes.len() {
        return Err(AnalyticsError::FrameCountMismatch {
            class: BALL.to_string(),
            expected: players.len(),
            found: ball_boxes.len(),
        });
    }

    let mut timeline = PossessionTimeline::with_capacity(players.len());
    let mut assigned_frames = 0usize;

    for (frame_num, (frame, ball_box)) in players.iter_mut().zip(&ball_boxes).enumerate() {
        for record in frame.values_mut() {
            record.has_ball = false;
        }

        let Some(ball_box) = ball_box else {
            trace!(frame_num, "no ball box");
            timeline.push_unassigned();
            continue;
        };

        let holder = match assigner.assign(frame, ball_box) {
            Some(track_id) => frame.get_mut(&track_id),
            None => None,
        };

        match holder {
            Some(record) => {
                record.has_ball = true;
                assigned_frames += 1;
                match record.team.as_deref() {
                    Some(team) => timeline.push_team(team),
                    None => {
                        debug!(frame_num, "ball holder has no team");
                        timeline.push_unassigned();
                    }
                }
            }
            None => timeline.push_unassigned(),
        }
    }

    info!(
        frames = timeline.len(),
        assigned = assigned_frames,
        "possession resolved"
    );
    Ok(timeline)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracks::{FrameSnapshot, TrackId, TrackRecord};

    /// Two players (1 = Red, 2 = Blue) and a ball box in every frame.
    fn scripted_store(frames: usize) -> TrackStore {
        let mut store = TrackStore::new();
        let players = (0..frames)
            .map(|_| {
                let mut frame = FrameSnapshot::new();
                frame.insert(1, TrackRecord::default().with_team("Red"));
                frame.insert(2, TrackRecord::default().with_team("Blue"));
                frame
            })
            .collect();
        let ball = (0..frames)
            .map(|_| {
                let mut frame = FrameSnapshot::new();
                frame.insert(
                    1,
                    TrackRecord::default().with_bbox(BoundingBox::new(0.0, 0.0, 1.0, 1.0)),
                );
                frame
            })
            .collect();
        store.insert_class(PLAYERS, players);
        store.insert_class(BALL, ball);
        store
    }

    /// Returns the scripted holder for each call, in frame order.
    struct Scripted(Vec<Option<TrackId>>, std::cell::Cell<usize>);

    impl BallAssigner for Scripted {
        fn assign(&self, _: &FrameSnapshot, _: &BoundingBox) -> Option<TrackId> {
            let idx = self.1.get();
            self.1.set(idx + 1);
            self.0[idx]
        }
    }

    fn scripted(holders: &[Option<TrackId>]) -> Scripted {
        Scripted(holders.to_vec(), std::cell::Cell::new(0))
    }

    #[test]
    fn test_timeline_follows_assignments() {
        let mut store = scripted_store(5);
        let assigner = scripted(&[None, Some(1), None, Some(2), None]);

        let timeline = resolve_possession(&mut store, &assigner).unwrap();
        let teams: Vec<_> = timeline.marks().iter().map(|m| m.team()).collect();
        assert_eq!(
            teams,
            vec![None, Some("Red"), Some("Red"), Some("Blue"), Some("Blue")]
        );

        let players = store.players().unwrap();
        assert!(players[1][&1].has_ball);
        assert!(!players[2][&1].has_ball);
        assert!(players[3][&2].has_ball);
    }

    #[test]
    fn test_stale_has_ball_cleared() {
        let mut store = scripted_store(1);
        store.class_mut(PLAYERS).unwrap()[0]
            .get_mut(&2)
            .unwrap()
            .has_ball = true;

        resolve_possession(&mut store, &scripted(&[Some(1)])).unwrap();

        let frame = &store.players().unwrap()[0];
        assert!(frame[&1].has_ball);
        assert!(!frame[&2].has_ball);
    }

    #[test]
    fn test_missing_ball_box_inherits() {
        let mut store = scripted_store(3);
        store.class_mut(BALL).unwrap()[1].clear();

        let timeline =
            resolve_possession(&mut store, &scripted(&[Some(2), Some(1)])).unwrap();
        let teams: Vec<_> = timeline.marks().iter().map(|m| m.team()).collect();
        assert_eq!(teams, vec![Some("Blue"), Some("Blue"), Some("Red")]);
    }

    #[test]
    fn test_holder_without_team() {
        let mut store = scripted_store(2);
        store.class_mut(PLAYERS).unwrap()[1]
            .get_mut(&1)
            .unwrap()
            .team = None;

        let timeline = resolve_possession(&mut store, &scripted(&[Some(2), Some(1)])).unwrap();
        assert_eq!(timeline.marks()[1].team(), Some("Blue"));
        assert!(store.players().unwrap()[1][&1].has_ball);
    }

    #[test]
    fn test_missing_ball_class_is_fatal() {
        let mut store = TrackStore::new();
        store.insert_class(PLAYERS, vec![FrameSnapshot::new()]);

        let err = resolve_possession(&mut store, &NearestFootAssigner::default()).unwrap_err();
        assert!(err.is_structural());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: one mark per frame, and no Unknown after the first team
            #[test]
            fn prop_timeline_length_and_no_late_unknown(
                holders in prop::collection::vec(prop::option::weighted(0.3, 1u32..=2), 1..80),
            ) {
                let mut store = scripted_store(holders.len());
                let timeline = resolve_possession(&mut store, &scripted(&holders)).unwrap();

                prop_assert_eq!(timeline.len(), holders.len());
                let first_team = timeline.marks().iter().position(|m| m.team().is_some());
                if let Some(first) = first_team {
                    prop_assert!(timeline.marks()[first..].iter().all(|m| m.team().is_some()));
                }
            }
        }
    }
}
