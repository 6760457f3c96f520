use serde::{Deserialize, Serialize};

/// The two kinds of vote a user can hold on a target. The reputation values
/// are deliberately asymmetric: a downvote costs the author double what an
/// upvote earns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteKind {
    Upvote,
    Downvote,
}

impl VoteKind {
    pub fn as_str(self) -> &'static str {
        match self {
            VoteKind::Upvote => "upvote",
            VoteKind::Downvote => "downvote",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "upvote" => Some(VoteKind::Upvote),
            "downvote" => Some(VoteKind::Downvote),
            _ => None,
        }
    }

    fn score(self) -> i32 {
        match self {
            VoteKind::Upvote => 1,
            VoteKind::Downvote => -1,
        }
    }

    fn reputation(self) -> i32 {
        match self {
            VoteKind::Upvote => 5,
            VoteKind::Downvote => -10,
        }
    }
}

/// Signed adjustments to apply to the target's aggregate score and the
/// target author's reputation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LedgerDelta {
    pub score: i32,
    pub reputation: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// The requested kind is already active; nothing changes.
    NoOp,
    /// First vote by this user on this target.
    Cast(LedgerDelta),
    /// Replaces an active vote of the opposite kind: the old vote's effect
    /// is undone and the new one applied, observable as one combined delta.
    Switched(LedgerDelta),
}

/// State transition for `applyVote`. `current` is the user's active vote on
/// the target, if any.
pub fn apply(current: Option<VoteKind>, requested: VoteKind) -> ApplyOutcome {
    match current {
        Some(active) if active == requested => ApplyOutcome::NoOp,
        Some(active) => ApplyOutcome::Switched(LedgerDelta {
            score: requested.score() - active.score(),
            reputation: requested.reputation() - active.reputation(),
        }),
        None => ApplyOutcome::Cast(LedgerDelta {
            score: requested.score(),
            reputation: requested.reputation(),
        }),
    }
}

/// State transition for `retractVote`: reverses the active vote's exact
/// effect. `None` means there is no active vote to retract.
pub fn retract(current: Option<VoteKind>) -> Option<LedgerDelta> {
    current.map(|active| LedgerDelta {
        score: -active.score(),
        reputation: -active.reputation(),
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use VoteKind::{Downvote, Upvote};

    #[test]
    fn first_upvote() {
        assert_eq!(
            apply(None, Upvote),
            ApplyOutcome::Cast(LedgerDelta {
                score: 1,
                reputation: 5
            })
        );
    }

    #[test]
    fn first_downvote() {
        assert_eq!(
            apply(None, Downvote),
            ApplyOutcome::Cast(LedgerDelta {
                score: -1,
                reputation: -10
            })
        );
    }

    #[test]
    fn switching_combines_undo_and_apply() {
        assert_eq!(
            apply(Some(Upvote), Downvote),
            ApplyOutcome::Switched(LedgerDelta {
                score: -2,
                reputation: -15
            })
        );
        assert_eq!(
            apply(Some(Downvote), Upvote),
            ApplyOutcome::Switched(LedgerDelta {
                score: 2,
                reputation: 15
            })
        );
    }

    #[test]
    fn reapplying_the_same_kind_is_a_noop() {
        assert_eq!(apply(Some(Upvote), Upvote), ApplyOutcome::NoOp);
        assert_eq!(apply(Some(Downvote), Downvote), ApplyOutcome::NoOp);
    }

    #[test]
    fn retract_reverses_the_active_vote_exactly() {
        assert_eq!(
            retract(Some(Upvote)),
            Some(LedgerDelta {
                score: -1,
                reputation: -5
            })
        );
        assert_eq!(
            retract(Some(Downvote)),
            Some(LedgerDelta {
                score: 1,
                reputation: 10
            })
        );
    }

    #[test]
    fn retract_without_an_active_vote_is_reported() {
        assert_eq!(retract(None), None);
    }

    // Replays a sequence of transitions against running counters, the way
    // the vote handlers do, and checks that the counters never drift from
    // the table.
    fn replay(ops: &[(Option<VoteKind>, Option<VoteKind>)]) -> (i32, i32) {
        let mut score = 0;
        let mut reputation = 100;
        for &(current, requested) in ops {
            let delta = match requested {
                Some(kind) => match apply(current, kind) {
                    ApplyOutcome::NoOp => LedgerDelta::default(),
                    ApplyOutcome::Cast(d) | ApplyOutcome::Switched(d) => d,
                },
                None => retract(current).unwrap_or_default(),
            };
            score += delta.score;
            reputation += delta.reputation;
        }
        (score, reputation)
    }

    #[test]
    fn upvote_then_switch_to_downvote() {
        // score 0 -> 1 -> -1, reputation 100 -> 105 -> 90
        let (score, reputation) = replay(&[(None, Some(Upvote)), (Some(Upvote), Some(Downvote))]);
        assert_eq!(score, -1);
        assert_eq!(reputation, 90);
    }

    #[test]
    fn apply_then_retract_round_trips() {
        let (score, reputation) = replay(&[(None, Some(Upvote)), (Some(Upvote), None)]);
        assert_eq!(score, 0);
        assert_eq!(reputation, 100);

        let (score, reputation) = replay(&[(None, Some(Downvote)), (Some(Downvote), None)]);
        assert_eq!(score, 0);
        assert_eq!(reputation, 100);
    }

    #[test]
    fn double_apply_equals_single_apply() {
        let once = replay(&[(None, Some(Upvote))]);
        let twice = replay(&[(None, Some(Upvote)), (Some(Upvote), Some(Upvote))]);
        assert_eq!(once, twice);
    }

    #[test]
    fn kind_round_trips_through_storage_strings() {
        assert_eq!(VoteKind::parse(Upvote.as_str()), Some(Upvote));
        assert_eq!(VoteKind::parse(Downvote.as_str()), Some(Downvote));
        assert_eq!(VoteKind::parse("sideways"), None);
    }
}
