//! Integration tests for the per-update guard [`dbot_telegram::MessageProcessor`].

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{echo_chain, MockBot};
use dbot_core::{Chat, HandlerResponse, Message, User};
use dbot_telegram::{MessageProcessor, FAILURE_REPLY};

fn message(text: &str) -> Message {
    Message::new("1", User::anonymous(9), Chat::private(9)).with_text(text)
}

#[tokio::test]
async fn test_success_returns_response() {
    let bot = Arc::new(MockBot::default());
    let processor = MessageProcessor::new(echo_chain(bot.clone()), bot.clone());

    let response = processor.process_message(&message("hi")).await;

    assert_eq!(response, Some(HandlerResponse::Stop));
    assert_eq!(bot.texts(), vec![(9, "echo: hi".to_string())]);
}

/// **Test: A chain error is swallowed here and answered with the failure notice.**
#[tokio::test]
async fn test_failure_sends_notice() {
    let bot = Arc::new(MockBot::default());
    let processor = MessageProcessor::new(echo_chain(bot.clone()), bot.clone());

    let response = processor.process_message(&message("boom")).await;

    assert_eq!(response, None);
    assert_eq!(bot.texts(), vec![(9, FAILURE_REPLY.to_string())]);
}

/// **Test: With failure replies off, a failed update is only logged.**
#[tokio::test]
async fn test_failure_reply_disabled() {
    let bot = Arc::new(MockBot::default());
    let processor =
        MessageProcessor::new(echo_chain(bot.clone()), bot.clone()).with_reply_on_failure(false);

    assert_eq!(processor.process_message(&message("boom")).await, None);
    assert!(bot.texts().is_empty());
}

#[tokio::test]
async fn test_enqueue_reports_outcome() {
    let bot = Arc::new(MockBot::default());
    let processor = MessageProcessor::new(echo_chain(bot.clone()), bot.clone());

    let response = processor.enqueue(message("async")).await.unwrap();

    assert_eq!(response, Some(HandlerResponse::Stop));
    assert_eq!(bot.texts(), vec![(9, "echo: async".to_string())]);
}

/// **Test: Updates from one user are handled in arrival order.**
///
/// Setup: Multi-threaded runtime; the first update is slow.
/// Action: Enqueue a slow update, then many fast ones, back to back without awaiting.
/// Expected: Replies come out in the order the updates went in.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_same_user_updates_keep_arrival_order() {
    let bot = Arc::new(MockBot::default());
    let processor = MessageProcessor::new(echo_chain(bot.clone()), bot.clone());

    let mut pending = vec![processor.enqueue(message("slow first"))];
    for i in 0..20 {
        pending.push(processor.enqueue(message(&format!("m{}", i))));
    }
    for done in pending {
        done.await.unwrap();
    }

    let mut expected = vec![(9, "echo: slow first".to_string())];
    expected.extend((0..20).map(|i| (9, format!("echo: m{}", i))));
    assert_eq!(bot.texts(), expected);
}

/// **Test: A slow user does not hold up another user.**
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_users_are_processed_independently() {
    let bot = Arc::new(MockBot::default());
    let processor = MessageProcessor::new(echo_chain(bot.clone()), bot.clone());

    let slow = processor.enqueue(
        Message::new("1", User::anonymous(1), Chat::private(1)).with_text("slow one"),
    );
    let fast = processor
        .enqueue(Message::new("2", User::anonymous(2), Chat::private(2)).with_text("quick"));
    fast.await.unwrap();
    slow.await.unwrap();

    assert_eq!(
        bot.texts(),
        vec![(2, "echo: quick".to_string()), (1, "echo: slow one".to_string())]
    );
}

/// **Test: A user's worker exits once the queue is empty, and a later update starts a new one.**
#[tokio::test]
async fn test_worker_exits_when_idle() {
    let bot = Arc::new(MockBot::default());
    let processor = MessageProcessor::new(echo_chain(bot.clone()), bot.clone());

    processor.enqueue(message("one")).await.unwrap();
    for _ in 0..50 {
        if processor.active_users() == 0 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert_eq!(processor.active_users(), 0);

    processor.enqueue(message("two")).await.unwrap();
    assert_eq!(
        bot.texts(),
        vec![(9, "echo: one".to_string()), (9, "echo: two".to_string())]
    );
}
