//! Tests for two-participant sessions driven through the engine.

use strictly_rounds::{
    EMPTY_MARKER, EngineConfig, IllegalMoveReason, InvariantSet, RoundStatus, Seat, Session,
    SessionEngine, SessionErrorKind, SessionId, SessionInvariants, SessionStatus,
};

fn engine() -> SessionEngine {
    SessionEngine::in_memory(EngineConfig::default())
}

fn create(engine: &SessionEngine, rounds: usize) -> SessionId {
    let session = engine.create_session(false, "Ana", "Beto", rounds).unwrap();
    session.id().unwrap()
}

fn play(engine: &SessionEngine, id: SessionId, cells: &[usize]) -> Session {
    let mut last = None;
    for &cell in cells {
        last = Some(engine.make_move(id, cell).unwrap());
    }
    last.expect("at least one move")
}

/// Ana takes the top row while Beto answers in the middle row.
const ANA_WINS: [usize; 5] = [0, 3, 1, 4, 2];
/// Beto completes the middle row.
const BETO_WINS: [usize; 6] = [0, 3, 1, 4, 8, 5];
/// Nine moves with no line.
const DRAW: [usize; 9] = [0, 1, 2, 3, 5, 4, 6, 8, 7];

#[test]
fn test_create_session_starts_pristine() {
    let engine = engine();
    let session = engine.create_session(false, "Ana", "Beto", 3).unwrap();

    assert!(session.id().is_some());
    assert_eq!(*session.status(), SessionStatus::Playing);
    assert_eq!(session.round_count(), 3);
    assert_eq!(*session.scores().first(), 0);
    assert_eq!(*session.scores().second(), 0);
    assert!(session.winner().is_none());
    assert!(session.rounds().iter().all(|round| round.is_pristine()));
    assert!(
        session
            .rounds()
            .iter()
            .all(|round| round.turn_holder() == "Ana")
    );
}

#[test]
fn test_create_session_rejects_bad_round_counts() {
    let engine = engine();
    let max = *engine.config().max_round_count();

    for rounds in [0, max + 1] {
        let err = engine.create_session(false, "Ana", "Beto", rounds).unwrap_err();
        assert!(matches!(err.kind(), SessionErrorKind::InvalidConfig(_)));
    }
    assert!(engine.create_session(false, "Ana", "Beto", max).is_ok());
    assert!(engine.list_sessions().unwrap().len() == 1);
}

#[test]
fn test_create_session_rejects_bad_names() {
    let engine = engine();

    for (first, second) in [("", "Beto"), ("Ana", "  "), ("Ana", "Ana"), (EMPTY_MARKER, "Beto")] {
        let err = engine.create_session(false, first, second, 1).unwrap_err();
        assert!(
            matches!(err.kind(), SessionErrorKind::InvalidConfig(_)),
            "{first:?} vs {second:?} should be rejected"
        );
    }
    assert!(engine.list_sessions().unwrap().is_empty());
}

#[test]
fn test_first_participant_wins_single_round() {
    let engine = engine();
    let id = create(&engine, 1);

    let session = play(&engine, id, &ANA_WINS);

    let round = &session.rounds()[0];
    assert_eq!(*round.status(), RoundStatus::Won);
    assert_eq!(*round.winner(), Some(Seat::First));
    assert_eq!(*session.scores().first(), 1);
    assert_eq!(*session.scores().second(), 0);
    assert_eq!(*session.status(), SessionStatus::Completed);
    assert_eq!(session.winner_name(), Some("Ana"));
}

#[test]
fn test_full_board_without_line_resets_round() {
    let engine = engine();
    let id = create(&engine, 1);

    let session = play(&engine, id, &DRAW);

    let round = &session.rounds()[0];
    assert!(round.board().cells().iter().all(|cell| cell.square().is_empty()));
    assert_eq!(*round.status(), RoundStatus::Playing);
    assert_eq!(*round.scores().first(), 0);
    assert_eq!(*round.scores().second(), 0);
    assert_eq!(round.turn_holder(), "Ana");
    assert_eq!(*session.status(), SessionStatus::Playing);
}

#[test]
fn test_draw_then_win_completes_session() {
    let engine = engine();
    let id = create(&engine, 1);

    play(&engine, id, &DRAW);
    let session = play(&engine, id, &BETO_WINS);

    assert_eq!(*session.status(), SessionStatus::Completed);
    assert_eq!(session.winner_name(), Some("Beto"));
}

#[test]
fn test_void_session_zeroes_scores_and_blocks_moves() {
    let engine = engine();
    let id = create(&engine, 4);

    play(&engine, id, &ANA_WINS);
    play(&engine, id, &ANA_WINS);
    let session = play(&engine, id, &BETO_WINS);
    assert_eq!(*session.scores().first(), 2);
    assert_eq!(*session.scores().second(), 1);

    let session = engine.void_session(id).unwrap();
    assert_eq!(*session.status(), SessionStatus::Voided);
    assert_eq!(*session.scores().first(), 0);
    assert_eq!(*session.scores().second(), 0);
    assert!(session.winner().is_none());

    let err = engine.make_move(id, 0).unwrap_err();
    assert!(matches!(err.kind(), SessionErrorKind::NoActiveRound(_)));

    // Voiding twice is harmless
    assert_eq!(engine.void_session(id).unwrap(), session);
}

#[test]
fn test_occupied_cell_leaves_board_unchanged() {
    let engine = engine();
    let id = create(&engine, 1);

    let before = play(&engine, id, &[4]);
    let err = engine.make_move(id, 4).unwrap_err();

    assert!(matches!(
        err.kind(),
        SessionErrorKind::IllegalMove {
            index: 4,
            reason: IllegalMoveReason::Occupied
        }
    ));
    assert_eq!(engine.session(id).unwrap(), before);
}

#[test]
fn test_out_of_range_cell_is_illegal() {
    let engine = engine();
    let id = create(&engine, 1);

    let err = engine.make_move(id, 9).unwrap_err();
    assert!(matches!(
        err.kind(),
        SessionErrorKind::IllegalMove {
            index: 9,
            reason: IllegalMoveReason::OutOfRange
        }
    ));
    assert!(engine.session(id).unwrap().rounds()[0].is_pristine());
}

#[test]
fn test_turns_alternate_within_round() {
    let engine = engine();
    let id = create(&engine, 1);

    assert_eq!(engine.session_view(id).unwrap().turn_holder(), "Ana");
    engine.make_move(id, 0).unwrap();
    assert_eq!(engine.session_view(id).unwrap().turn_holder(), "Beto");
    engine.make_move(id, 1).unwrap();
    assert_eq!(engine.session_view(id).unwrap().turn_holder(), "Ana");
}

#[test]
fn test_next_round_becomes_active_after_win() {
    let engine = engine();
    let id = create(&engine, 2);

    let session = play(&engine, id, &ANA_WINS);

    assert_eq!(*session.status(), SessionStatus::Playing);
    assert_eq!(session.active_round_index(), Some(1));
    let view = engine.session_view(id).unwrap();
    assert_eq!(view.turn_holder(), "Ana");
    assert_eq!(view.empty_cells().len(), 9);
    assert_eq!(*view.first_score(), 1);
}

#[test]
fn test_tied_session_has_no_winner() {
    let engine = engine();
    let id = create(&engine, 2);

    play(&engine, id, &ANA_WINS);
    let session = play(&engine, id, &BETO_WINS);

    assert_eq!(*session.status(), SessionStatus::Completed);
    assert!(session.winner().is_none());
    assert_eq!(*session.scores().first(), 1);
    assert_eq!(*session.scores().second(), 1);
}

#[test]
fn test_restart_is_idempotent() {
    let engine = engine();
    let id = create(&engine, 2);

    play(&engine, id, &ANA_WINS);
    play(&engine, id, &[4, 0]);

    let once = engine.restart_session(id).unwrap();
    let twice = engine.restart_session(id).unwrap();

    assert_eq!(once, twice);
    assert_eq!(*once.status(), SessionStatus::Playing);
    assert_eq!(once.round_count(), 2);
    assert_eq!(*once.scores().first(), 0);
    assert!(once.rounds().iter().all(|round| round.is_pristine()));
    assert_eq!(once.participants().first().name(), "Ana");
    assert_eq!(once.participants().second().name(), "Beto");
}

#[test]
fn test_restart_reopens_completed_session() {
    let engine = engine();
    let id = create(&engine, 1);

    play(&engine, id, &ANA_WINS);
    let session = engine.restart_session(id).unwrap();

    assert_eq!(*session.status(), SessionStatus::Playing);
    assert!(session.winner().is_none());
    assert!(engine.make_move(id, 0).is_ok());
}

#[test]
fn test_restart_voided_session_fails() {
    let engine = engine();
    let id = create(&engine, 1);
    engine.void_session(id).unwrap();

    let err = engine.restart_session(id).unwrap_err();
    assert!(matches!(err.kind(), SessionErrorKind::SessionVoided(v) if *v == id));
    assert_eq!(*engine.session(id).unwrap().status(), SessionStatus::Voided);
}

#[test]
fn test_unknown_session_is_not_found() {
    let engine = engine();

    assert!(matches!(
        engine.make_move(42, 0).unwrap_err().kind(),
        SessionErrorKind::NotFound(42)
    ));
    assert!(matches!(
        engine.restart_session(42).unwrap_err().kind(),
        SessionErrorKind::NotFound(42)
    ));
    assert!(matches!(
        engine.void_session(42).unwrap_err().kind(),
        SessionErrorKind::NotFound(42)
    ));
    assert!(matches!(
        engine.session_view(42).unwrap_err().kind(),
        SessionErrorKind::NotFound(42)
    ));
}

#[test]
fn test_view_of_completed_session_has_no_active_round() {
    let engine = engine();
    let id = create(&engine, 1);
    play(&engine, id, &ANA_WINS);

    let err = engine.session_view(id).unwrap_err();
    assert!(matches!(err.kind(), SessionErrorKind::NoActiveRound(_)));

    let err = engine.make_move(id, 8).unwrap_err();
    assert!(matches!(err.kind(), SessionErrorKind::NoActiveRound(_)));
}

#[test]
fn test_view_marks_occupants_and_empty_cells() {
    let engine = engine();
    let id = create(&engine, 1);
    play(&engine, id, &[0, 4]);

    let view = engine.session_view(id).unwrap();
    assert_eq!(*view.id(), id);
    assert_eq!(view.board()[&0], "Ana");
    assert_eq!(view.board()[&4], "Beto");
    assert_eq!(view.board()[&8], EMPTY_MARKER);
    assert_eq!(view.board().len(), 9);
    assert_eq!(view.winner(), "");
    assert!(!view.single_participant());
}

#[test]
fn test_sessions_are_independent() {
    let engine = engine();
    let first = create(&engine, 1);
    let second = create(&engine, 1);

    play(&engine, first, &ANA_WINS);

    assert_eq!(engine.list_sessions().unwrap(), vec![first, second]);
    assert!(engine.session(second).unwrap().rounds()[0].is_pristine());
}

#[test]
fn test_every_saved_state_satisfies_invariants() {
    let engine = engine();
    let id = create(&engine, 3);

    for cells in [&ANA_WINS[..], &DRAW[..], &BETO_WINS[..], &ANA_WINS[..]] {
        for &cell in cells {
            let session = engine.make_move(id, cell).unwrap();
            assert!(SessionInvariants::check_all(&session).is_ok());
        }
    }

    let session = engine.session(id).unwrap();
    assert_eq!(*session.status(), SessionStatus::Completed);
    assert_eq!(session.winner_name(), Some("Ana"));
    assert_eq!(session.round_wins(Seat::First), 2);
    assert_eq!(session.round_wins(Seat::Second), 1);
}
