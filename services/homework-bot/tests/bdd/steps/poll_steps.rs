//! BDD step definitions for the poll cycle feature

use std::sync::Arc;
use std::time::Duration;

use cucumber::gherkin::Step;
use cucumber::{given, then, when};

use homework_bot::api_client::ApiClient;
use homework_bot::config::PracticumConfig;
use homework_bot::poll_loop::{CycleOutcome, PollLoop};

use crate::world::{HomeworkBotWorld, RecordingNotifier, ScriptedReply};

fn docstring(step: &Step) -> String {
    step.docstring
        .as_deref()
        .expect("step needs a doc string")
        .trim()
        .to_string()
}

fn poll_loop(world: &mut HomeworkBotWorld) -> &mut PollLoop {
    if world.poll_loop.is_none() {
        let notifier = Arc::new(RecordingNotifier::new(world.notifier_fails));
        let api = ApiClient::new(
            &PracticumConfig::default(),
            "test-token",
            Arc::clone(&world.http) as Arc<dyn homework_bot::io::HttpClient>,
        );
        world.poll_loop = Some(PollLoop::new(
            api,
            Arc::clone(&notifier) as Arc<dyn homework_bot::notifier::Notifier>,
            "chat-1",
            Duration::from_millis(1),
            world.start_timestamp,
        ));
        world.notifier = Some(notifier);
    }
    world.poll_loop.as_mut().expect("poll loop just built")
}

fn sent_messages(world: &HomeworkBotWorld) -> Vec<String> {
    world
        .notifier
        .as_ref()
        .expect("no cycle has run")
        .messages()
}

#[given(expr = "the review window starts at {int}")]
fn window_starts_at(world: &mut HomeworkBotWorld, timestamp: i64) {
    world.start_timestamp = timestamp;
}

#[given(expr = "the API responds with status {int} and body:")]
fn api_responds(world: &mut HomeworkBotWorld, status: u16, step: &Step) {
    world
        .http
        .push(ScriptedReply::Status(status, docstring(step)));
}

#[given("the API is unreachable")]
fn api_unreachable(world: &mut HomeworkBotWorld) {
    world.http.push(ScriptedReply::Unreachable);
}

#[given("the chat cannot receive messages")]
fn chat_fails(world: &mut HomeworkBotWorld) {
    world.notifier_fails = true;
}

#[when("one poll cycle runs")]
async fn one_cycle_runs(world: &mut HomeworkBotWorld) {
    let outcome = poll_loop(world).run_cycle().await;
    world.outcomes.push(outcome);
}

#[when(expr = "{int} poll cycles run")]
async fn cycles_run(world: &mut HomeworkBotWorld, count: usize) {
    for _ in 0..count {
        let outcome = poll_loop(world).run_cycle().await;
        world.outcomes.push(outcome);
    }
}

#[then("the chat should receive exactly:")]
fn chat_receives_exactly(world: &mut HomeworkBotWorld, step: &Step) {
    assert_eq!(sent_messages(world), vec![docstring(step)]);
}

#[then("no message should be sent")]
fn no_message_sent(world: &mut HomeworkBotWorld) {
    assert!(
        sent_messages(world).is_empty(),
        "unexpected messages: {:?}",
        sent_messages(world)
    );
}

#[then(expr = "the chat should receive a failure diagnostic mentioning {string}")]
fn chat_receives_diagnostic(world: &mut HomeworkBotWorld, fragment: String) {
    let messages = sent_messages(world);
    let last = messages.last().expect("no message sent");
    assert!(last.starts_with("Program failure: "), "{last}");
    assert!(last.contains(&fragment), "{last}");
}

#[then(expr = "the chat should have been sent {int} message(s)")]
fn chat_message_count(world: &mut HomeworkBotWorld, count: usize) {
    assert_eq!(sent_messages(world).len(), count);
}

#[then(expr = "the review window should start at {int}")]
fn window_is(world: &mut HomeworkBotWorld, timestamp: i64) {
    let poll_loop = world.poll_loop.as_ref().expect("no cycle has run");
    assert_eq!(poll_loop.last_timestamp(), timestamp);
}

#[then(expr = "every request should have asked for from_date {string}")]
fn every_request_used(world: &mut HomeworkBotWorld, from_date: String) {
    let from_dates = world.http.from_dates();
    assert!(!from_dates.is_empty(), "no request was made");
    assert!(
        from_dates.iter().all(|d| *d == from_date),
        "requests used {:?}",
        from_dates
    );
}

#[then("the last cycle should have failed")]
fn last_cycle_failed(world: &mut HomeworkBotWorld) {
    assert!(matches!(
        world.outcomes.last(),
        Some(CycleOutcome::Failed(_))
    ));
}

#[then("the last cycle should have succeeded")]
fn last_cycle_succeeded(world: &mut HomeworkBotWorld) {
    assert!(!matches!(
        world.outcomes.last(),
        None | Some(CycleOutcome::Failed(_))
    ));
}
