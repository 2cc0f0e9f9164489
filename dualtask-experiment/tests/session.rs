//! End-to-end sessions driven through the alternation controller.

use std::time::Duration;

use dualtask_core::{Condition, Reveal, SubtractionTrial, TaskKind, TrialPair, TypingTrial};
use dualtask_experiment::{
    AlternationController, MemoryLogger, ProtocolViolation, SessionEvent, SubmitError,
    TrialSequence, TsvLogger, load_trials,
};
use dualtask_timing::ManualTimer;

fn scenario_pair(typing: Condition, subtraction: Condition) -> TrialPair {
    TrialPair::new(
        TypingTrial::new(typing, "ABCDEFGHIJ").unwrap(),
        SubtractionTrial::from_numbers(subtraction, 8888888888, 7654321000).unwrap(),
    )
}

fn start(pairs: Vec<TrialPair>) -> AlternationController<ManualTimer, MemoryLogger> {
    AlternationController::new(
        TrialSequence::new(pairs),
        ManualTimer::starting_at(Duration::from_secs(1_700_000_000)),
        MemoryLogger::new(),
    )
}

#[test]
fn single_easy_pair_runs_to_session_end() {
    let mut c = start(vec![scenario_pair(Condition::Easy, Condition::Easy)]);
    assert_eq!(c.active_task(), Some(TaskKind::Subtraction));

    let events = c.submit(TaskKind::Subtraction, '1').unwrap();
    let SessionEvent::ResponseAccepted(first) = &events[0] else {
        panic!("first event should be the accepted response");
    };
    assert!(first.correct);
    assert_eq!(first.index, 0);
    assert_eq!(c.task(TaskKind::Subtraction).index(), Some(1));

    let solution = "1234567888";
    let word = "abcdefghij";
    let mut typed = word.chars();
    for digit in solution.chars().skip(1) {
        c.submit(TaskKind::Typing, typed.next().unwrap()).unwrap();
        c.submit(TaskKind::Subtraction, digit).unwrap();
    }
    assert!(c.task(TaskKind::Subtraction).is_finished());
    assert_eq!(c.active_task(), Some(TaskKind::Typing));
    assert_eq!(c.task(TaskKind::Typing).index(), Some(9));

    let events = c.submit(TaskKind::Typing, typed.next().unwrap()).unwrap();
    assert!(events.contains(&SessionEvent::TaskFinished(TaskKind::Typing)));
    assert_eq!(events.last(), Some(&SessionEvent::SessionEnded));
    assert!(c.is_ended());
    assert_eq!(c.active_task(), None);

    let records = &c.logger().records;
    assert_eq!(records.len(), 20);
    assert!(records.iter().all(|r| r.correct));
    assert_eq!(records[0].task, TaskKind::Subtraction);
    assert_eq!(records[1].task, TaskKind::Typing);
    assert_eq!(records[1].symbol, 'A');

    assert!(matches!(
        c.submit(TaskKind::Typing, 'A'),
        Err(SubmitError::Protocol(ProtocolViolation::SessionEnded))
    ));
    assert_eq!(c.logger().records.len(), 20);
}

#[test]
fn empty_sequence_ends_immediately() {
    let mut c = start(Vec::new());
    assert!(c.is_ended());
    assert_eq!(c.active_task(), None);
    assert_eq!(c.trial_progress(), None);
    assert_eq!(c.summary().trials_completed, 0);
    assert!(c.logger().records.is_empty());
    assert!(matches!(
        c.submit(TaskKind::Subtraction, '1'),
        Err(SubmitError::Protocol(ProtocolViolation::SessionEnded))
    ));
}

#[test]
fn response_for_inactive_task_changes_nothing() {
    let mut c = start(vec![scenario_pair(Condition::Easy, Condition::Easy)]);
    let before = c.task(TaskKind::Typing).progress();

    let err = c.submit(TaskKind::Typing, 'A').unwrap_err();
    assert!(matches!(
        err,
        SubmitError::Protocol(ProtocolViolation::InactiveTask(TaskKind::Typing))
    ));
    assert_eq!(c.task(TaskKind::Typing).progress(), before);
    assert_eq!(c.task(TaskKind::Subtraction).index(), Some(0));
    assert_eq!(c.active_task(), Some(TaskKind::Subtraction));
    assert!(c.logger().records.is_empty());
}

#[test]
fn hard_typing_reveals_word_only_at_start() {
    let mut c = start(vec![scenario_pair(Condition::Hard, Condition::Hard)]);
    assert_eq!(
        c.reveal(TaskKind::Typing).unwrap(),
        Some(Reveal::Typing {
            word: "ABCDEFGHIJ".into()
        })
    );

    c.submit(TaskKind::Subtraction, '1').unwrap();
    c.submit(TaskKind::Typing, 'A').unwrap();
    assert_eq!(
        c.reveal(TaskKind::Typing).unwrap(),
        Some(Reveal::Typing {
            word: "##########".into()
        })
    );
    assert_eq!(
        c.reveal(TaskKind::Subtraction).unwrap(),
        Some(Reveal::Subtraction {
            minuend: "##########".into(),
            subtrahend: "##########".into(),
            entry: String::new(),
        })
    );
}

#[test]
fn wrong_answers_are_logged_and_still_advance() {
    let mut c = start(vec![scenario_pair(Condition::Easy, Condition::Easy)]);
    c.submit(TaskKind::Subtraction, '9').unwrap();
    assert_eq!(c.task(TaskKind::Subtraction).index(), Some(1));

    let record = &c.logger().records[0];
    assert!(!record.correct);
    assert_eq!(record.symbol, '9');
    assert_eq!(record.condition, Condition::Easy);
    assert_eq!(c.summary().subtraction.accuracy(), Some(0.0));
}

#[test]
fn session_from_yaml_file_writes_tsv_log() {
    let dir = tempfile::tempdir().unwrap();
    let trials_path = dir.path().join("trials.yaml");
    std::fs::write(
        &trials_path,
        "- typing: { condition: hard, word: abcdefghij }\n  \
           subtraction: { condition: easy, number1: 8888888888, number2: 7654321000 }\n",
    )
    .unwrap();

    let trials = load_trials(&trials_path).unwrap();
    let timer = ManualTimer::starting_at(Duration::from_secs(1_700_000_000));
    let mut c = AlternationController::new(trials, timer.clone(), TsvLogger::new(Vec::new()));

    timer.advance(Duration::from_millis(500));
    c.submit(TaskKind::Subtraction, '1').unwrap();
    timer.advance(Duration::from_millis(250));
    c.submit(TaskKind::Typing, 'x').unwrap();

    let text = String::from_utf8(c.into_logger().into_inner()).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines,
        vec![
            "subtraction\teasy\t1\tTrue\t1700000000.500000\t0.500000",
            "typing\thard\tX\tFalse\t1700000000.750000\t0.250000",
        ]
    );
}

#[test]
fn missing_trial_source_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    assert!(load_trials(&dir.path().join("absent.yaml")).is_err());
}
