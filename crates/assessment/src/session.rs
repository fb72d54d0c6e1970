//! The assessment session state machine.
//!
//! ```text
//! NotStarted --start--> Collecting(0) --submit--> ... --submit--> Complete
//!      ^                                                             |
//!      +--------------------------- restart -------------------------+
//! ```
//!
//! A session is a plain value owned by its caller; there is no shared
//! state between sessions. Rejected transitions leave the session untouched.

use pillarwise_core::pillar::pillar_at;
use pillarwise_core::{AnswerMap, PILLAR_COUNT, Result, StateError};
use tracing::info;

/// Where a session is in the pillar walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    NotStarted,
    /// Waiting for the answer to the pillar at `cursor`
    Collecting { cursor: usize },
    Complete,
}

/// What happened after an answer was accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// The next pillar to ask about
    Next { cursor: usize, pillar: &'static str },
    /// Every pillar has an answer
    Complete,
}

/// One founder's walk through the pillars.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssessmentSession {
    idea: String,
    state: SessionState,
    answers: AnswerMap,
    sub_answers: Vec<String>,
}

impl AssessmentSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn idea(&self) -> &str {
        &self.idea
    }

    pub fn answers(&self) -> &AnswerMap {
        &self.answers
    }

    /// Index of the pillar awaiting an answer; `PILLAR_COUNT` once complete.
    pub fn cursor(&self) -> usize {
        match self.state {
            SessionState::NotStarted => 0,
            SessionState::Collecting { cursor } => cursor,
            SessionState::Complete => PILLAR_COUNT,
        }
    }

    /// The pillar awaiting an answer, if collecting.
    pub fn current_pillar(&self) -> Option<&'static str> {
        match self.state {
            SessionState::Collecting { cursor } => pillar_at(cursor),
            _ => None,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.state == SessionState::Complete
    }

    /// Begin collecting answers for `idea`, starting at the first pillar.
    pub fn start(&mut self, idea: &str) -> Result<&'static str> {
        match self.state {
            SessionState::NotStarted => {}
            SessionState::Collecting { cursor } => {
                return Err(StateError::AlreadyCollecting {
                    cursor,
                    total: PILLAR_COUNT,
                }
                .into());
            }
            SessionState::Complete => return Err(StateError::AlreadyComplete.into()),
        }

        self.idea = idea.trim().to_string();
        self.answers.clear();
        self.sub_answers.clear();
        self.state = SessionState::Collecting { cursor: 0 };
        info!(idea_chars = self.idea.chars().count(), "Assessment started");

        Ok(pillar_at(0).unwrap_or_default())
    }

    /// Record the answer for the current pillar and move to the next one.
    ///
    /// The answer is buffered, the buffer is joined with newlines into the
    /// answer map, and the cursor advances.
    pub fn submit(&mut self, raw_answer: &str) -> Result<Advance> {
        let cursor = match self.state {
            SessionState::Collecting { cursor } => cursor,
            SessionState::NotStarted => return Err(StateError::NotStarted.into()),
            SessionState::Complete => return Err(StateError::AlreadyComplete.into()),
        };
        let pillar = pillar_at(cursor).ok_or(StateError::AlreadyComplete)?;

        self.sub_answers.push(raw_answer.trim().to_string());
        self.answers.insert(pillar, self.sub_answers.join("\n"));
        self.sub_answers.clear();

        let next = cursor + 1;
        info!(pillar, answered = next, total = PILLAR_COUNT, "Pillar answered");

        match pillar_at(next) {
            Some(next_pillar) => {
                self.state = SessionState::Collecting { cursor: next };
                Ok(Advance::Next {
                    cursor: next,
                    pillar: next_pillar,
                })
            }
            None => {
                self.state = SessionState::Complete;
                info!("All pillars answered");
                Ok(Advance::Complete)
            }
        }
    }

    /// Discard everything and return to `NotStarted`.
    pub fn restart(&mut self) {
        *self = Self::default();
        info!("Assessment restarted");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pillarwise_core::{Error, PILLARS};

    fn started() -> AssessmentSession {
        let mut session = AssessmentSession::new();
        session.start("  A mobile coffee cart  ").unwrap();
        session
    }

    #[test]
    fn fresh_session_is_not_started() {
        let session = AssessmentSession::new();
        assert_eq!(session.state(), SessionState::NotStarted);
        assert_eq!(session.cursor(), 0);
        assert!(session.answers().is_empty());
        assert!(session.current_pillar().is_none());
    }

    #[test]
    fn start_moves_to_first_pillar() {
        let mut session = AssessmentSession::new();
        let first = session.start("  A mobile coffee cart  ").unwrap();
        assert_eq!(first, "Personal Readiness");
        assert_eq!(session.idea(), "A mobile coffee cart");
        assert_eq!(session.state(), SessionState::Collecting { cursor: 0 });
    }

    #[test]
    fn submit_advances_cursor_and_records_answer() {
        let mut session = started();
        let advance = session.submit("  I have savings \n").unwrap();
        assert_eq!(
            advance,
            Advance::Next {
                cursor: 1,
                pillar: "Financial Readiness"
            }
        );
        assert_eq!(session.answers().get("Personal Readiness"), Some("I have savings"));
        assert_eq!(session.current_pillar(), Some("Financial Readiness"));
    }

    #[test]
    fn cursor_tracks_submissions_until_complete() {
        let mut session = started();
        for n in 1..=PILLARS.len() {
            let advance = session.submit(&format!("answer {n}")).unwrap();
            assert_eq!(session.answers().len(), n);
            if n < PILLARS.len() {
                assert_eq!(session.cursor(), n);
                assert!(matches!(advance, Advance::Next { cursor, .. } if cursor == n));
            } else {
                assert_eq!(advance, Advance::Complete);
                assert!(session.is_complete());
                assert_eq!(session.cursor(), PILLAR_COUNT);
            }
        }
        let order: Vec<_> = session.answers().pillars().collect();
        assert_eq!(order, PILLARS.to_vec());
    }

    #[test]
    fn submit_before_start_is_rejected() {
        let mut session = AssessmentSession::new();
        let err = session.submit("too early").unwrap_err();
        assert!(matches!(err, Error::State(StateError::NotStarted)));
        assert_eq!(session, AssessmentSession::new());
    }

    #[test]
    fn start_while_collecting_is_rejected_without_changes() {
        let mut session = started();
        session.submit("first").unwrap();
        let before = session.clone();

        let err = session.start("another idea").unwrap_err();
        assert!(matches!(
            err,
            Error::State(StateError::AlreadyCollecting { cursor: 1, total: 19 })
        ));
        assert_eq!(session, before);
    }

    #[test]
    fn complete_only_allows_restart() {
        let mut session = started();
        for _ in 0..PILLAR_COUNT {
            session.submit("ok").unwrap();
        }
        assert!(matches!(
            session.submit("extra"),
            Err(Error::State(StateError::AlreadyComplete))
        ));
        assert!(matches!(
            session.start("new"),
            Err(Error::State(StateError::AlreadyComplete))
        ));
        assert_eq!(session.answers().len(), PILLAR_COUNT);

        session.restart();
        assert!(session.start("new").is_ok());
    }

    #[test]
    fn restart_from_any_state_matches_fresh_session() {
        let mut never_started = AssessmentSession::new();
        never_started.restart();
        assert_eq!(never_started, AssessmentSession::new());

        let mut collecting = started();
        collecting.submit("x").unwrap();
        collecting.restart();
        assert_eq!(collecting, AssessmentSession::new());
        assert_eq!(collecting.idea(), "");

        let mut complete = started();
        for _ in 0..PILLAR_COUNT {
            complete.submit("x").unwrap();
        }
        complete.restart();
        assert_eq!(complete, AssessmentSession::new());
    }
}
