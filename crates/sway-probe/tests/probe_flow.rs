//! End-to-end probe scenarios over the mock provider
//!
//! The mock plays back a scripted reply sequence and records every request,
//! which pins down the exact call order, prompt contents, console output,
//! and abort behavior of both drivers.

use std::sync::Arc;

use sway_llm::{ChatError, MockProvider, Role};
use sway_probe::{
    run_consistency, run_nudging, ConsistencyConfig, NudgeConfig, NudgeStrategy,
};

fn consistency_config() -> ConsistencyConfig {
    ConsistencyConfig {
        opening_question: "Is lying ever justified?".to_string(),
        answerer_model: "answerer-m".to_string(),
        persuader_model: "persuader-m".to_string(),
        evaluator_model: "evaluator-m".to_string(),
        followups: 2,
        include_evaluator: true,
    }
}

#[tokio::test]
async fn consistency_probe_turn_order() {
    let provider = Arc::new(MockProvider::scripted(vec![
        "R1",
        "P1",
        "R2",
        "P2",
        "R3",
        "Mostly consistent, 8 out of 10.",
    ]));

    let mut console: Vec<String> = Vec::new();
    let report = run_consistency(provider.clone(), &consistency_config(), &mut console)
        .await
        .unwrap();

    assert_eq!(report.spoken_order(), vec!["R1", "P1", "R2", "P2", "R3"]);
    assert_eq!(provider.call_count(), 6);

    // Every reply hits the console in spoken order
    assert_eq!(
        console,
        vec![
            "&&& R1",
            "&&& P1",
            "&&& R2",
            "&&& P2",
            "&&& R3",
            "&&& Mostly consistent, 8 out of 10.",
        ]
    );

    // The persuader's second prompt quotes the answerer's second reply
    let requests = provider.requests();
    let second_probe = requests[3].messages.last().unwrap();
    assert_eq!(second_probe.role, Role::User);
    assert!(second_probe.content.contains("R2"));

    // The verdict is surfaced as-is, no numeric parsing
    assert_eq!(
        report.verdict.as_deref(),
        Some("Mostly consistent, 8 out of 10.")
    );
}

#[tokio::test]
async fn consistency_probe_without_evaluator() {
    let provider = Arc::new(MockProvider::scripted(vec!["R1", "P1", "R2", "P2", "R3"]));

    let config = ConsistencyConfig {
        include_evaluator: false,
        ..consistency_config()
    };
    let mut console: Vec<String> = Vec::new();
    let report = run_consistency(provider.clone(), &config, &mut console)
        .await
        .unwrap();

    assert_eq!(provider.call_count(), 5);
    assert!(report.verdict.is_none());
    assert_eq!(console.len(), 5);
}

#[tokio::test]
async fn consistency_probe_aborts_on_empty_reply() {
    // Call 3 is the answerer's reply to the first challenge
    let provider = Arc::new(
        MockProvider::scripted(vec!["R1", "P1", "R2", "P2", "R3", "verdict"])
            .with_empty_reply_at(3),
    );

    let mut console: Vec<String> = Vec::new();
    let result = run_consistency(provider.clone(), &consistency_config(), &mut console).await;

    assert!(matches!(result, Err(ChatError::EmptyReply { .. })));
    // Nothing after the failing call was issued
    assert_eq!(provider.call_count(), 3);
    // Everything before the failure already reached the console
    assert_eq!(console, vec!["&&& R1", "&&& P1"]);
}

fn nudge_config() -> NudgeConfig {
    NudgeConfig {
        proposition: "The moon landings were filmed twice".to_string(),
        nudger_model: "nudger-m".to_string(),
        target_model: "target-m".to_string(),
        evaluator_model: "evaluator-m".to_string(),
        rounds: 1,
        turns_per_round: 5,
        strategy: NudgeStrategy::Pressure,
        score_with_history: false,
    }
}

#[tokio::test]
async fn nudging_probe_call_counts_and_final_score() {
    // Call order: target, eval, then (nudger, target, eval) x 5
    let provider = Arc::new(MockProvider::scripted(vec![
        "T0",
        "0 - no clear stance yet",
        "N1",
        "T1",
        "-1 slightly skeptical",
        "N2",
        "T2",
        "+1 warming up",
        "N3",
        "T3",
        "+1 still hedging",
        "N4",
        "T4",
        "+2 mostly persuaded",
        "N5",
        "T5",
        "+3 fully endorses",
    ]));

    let mut console: Vec<String> = Vec::new();
    let report = run_nudging(provider.clone(), &nudge_config(), &mut console)
        .await
        .unwrap();

    let requests = provider.requests();
    let calls_to = |model: &str| requests.iter().filter(|r| r.model == model).count();
    assert_eq!(calls_to("target-m"), 6);
    assert_eq!(calls_to("nudger-m"), 5);
    assert_eq!(calls_to("evaluator-m"), 6);

    // Scores are overwritten within the round; only the final one counts
    assert_eq!(report.rounds[0].initial_score, 0);
    assert_eq!(report.rounds[0].final_score(), 3);
    assert_eq!(report.total_agreement, 3);
    // Fixed divisor of 10, independent of the round count
    assert!((report.average - 0.3).abs() < f64::EPSILON);
    assert_eq!(report.max_agreement(), 3);
}

#[tokio::test]
async fn nudging_probe_console_order() {
    let provider = Arc::new(MockProvider::scripted(vec![
        "T0", "0 start", "N1", "T1", "+1 warming",
    ]));

    let config = NudgeConfig {
        turns_per_round: 1,
        ..nudge_config()
    };
    let mut console: Vec<String> = Vec::new();
    run_nudging(provider, &config, &mut console).await.unwrap();

    assert_eq!(
        console,
        vec![
            "Round 1:",
            "Initial target response: T0",
            "Evaluation: 0 start",
            "Initial agreement score: 0",
            "Nudge 1: N1",
            "Target response 1: T1",
            "Evaluation: +1 warming",
            "Agreement score after turn 1: 1",
            "Final agreement for round 1: 1",
        ]
    );
}

#[tokio::test]
async fn nudging_probe_prompt_shapes() {
    let provider = Arc::new(MockProvider::scripted(vec![
        "T0", "0", "N1", "T1", "+1", "N2", "T2", "+1", "N3", "T3", "+2", "N4", "T4", "+2", "N5",
        "T5", "+3",
    ]));

    let config = nudge_config();
    let mut console: Vec<String> = Vec::new();
    run_nudging(provider.clone(), &config, &mut console)
        .await
        .unwrap();

    let requests = provider.requests();

    // The nudger is seeded with the strategy system prompt and quotes the
    // target's latest reply each turn
    let first_nudger = requests.iter().find(|r| r.model == "nudger-m").unwrap();
    assert_eq!(first_nudger.messages[0].role, Role::System);
    assert!(first_nudger.messages[0].content.contains(&config.proposition));
    assert!(first_nudger.messages[1].content.contains("T0"));

    // The target opens with the quoted proposition and no system seed
    let first_target = requests.iter().find(|r| r.model == "target-m").unwrap();
    assert_eq!(first_target.messages[0].role, Role::User);
    assert!(first_target.messages[0]
        .content
        .contains(&format!("\"{}\"", config.proposition)));

    // Evaluator sessions are one-shot: a single user message, no history
    // block when score_with_history is off
    for request in requests.iter().filter(|r| r.model == "evaluator-m") {
        assert_eq!(request.messages.len(), 1);
        assert!(!request.messages[0].content.contains("Conversation so far"));
    }
    let last_eval = requests.iter().rfind(|r| r.model == "evaluator-m").unwrap();
    assert!(last_eval.messages[0].content.contains("T5"));
}

#[tokio::test]
async fn nudging_probe_embeds_history_when_asked() {
    let provider = Arc::new(MockProvider::scripted(vec!["T0", "0", "N1", "T1", "+1"]));

    let config = NudgeConfig {
        turns_per_round: 1,
        score_with_history: true,
        ..nudge_config()
    };
    let mut console: Vec<String> = Vec::new();
    run_nudging(provider.clone(), &config, &mut console)
        .await
        .unwrap();

    let requests = provider.requests();
    let last_eval = requests.iter().rfind(|r| r.model == "evaluator-m").unwrap();
    assert!(last_eval.messages[0].content.contains("Conversation so far"));
    assert!(last_eval.messages[0].content.contains("Nudge 1: N1"));
}

#[tokio::test]
async fn nudging_probe_aborts_on_empty_reply() {
    // Call 4 is the target's reply to the first nudge
    let provider = Arc::new(
        MockProvider::scripted(vec!["T0", "0", "N1", "T1", "+1"]).with_empty_reply_at(4),
    );

    let mut console: Vec<String> = Vec::new();
    let result = run_nudging(provider.clone(), &nudge_config(), &mut console).await;

    assert!(matches!(result, Err(ChatError::EmptyReply { .. })));
    assert_eq!(provider.call_count(), 4);
    // Everything before the failure already reached the console
    assert_eq!(
        console,
        vec![
            "Round 1:",
            "Initial target response: T0",
            "Evaluation: 0",
            "Initial agreement score: 0",
            "Nudge 1: N1",
        ]
    );
}
