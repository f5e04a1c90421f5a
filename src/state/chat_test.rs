use super::*;
use crate::models::Source;

const GREETING: &str = "Hello from ResQ AI";

fn active_chat() -> ChatState {
    let mut chat = ChatState::new(GREETING, true);
    chat.begin_send("max dose of epi?");
    chat.finish_send(Ok(ChatReply {
        answer: "0.3mg IM".to_string(),
        follow_up: Some("Repeat in 5 min?".to_string()),
        sources: vec![Source {
            label: "Epinephrine SOP".to_string(),
            link: "https://files/epi.pdf".to_string(),
        }],
    }));
    chat
}

#[test]
fn test_new_chat_shows_greeting() {
    let chat = ChatState::new(GREETING, true);
    assert_eq!(chat.messages(), &[Message::greeting(GREETING)]);
    assert!(chat.messages()[0].is_greeting());
    assert!(!chat.offers_more_context());
}

#[test]
fn test_load() {
    let mut chat = ChatState::new(GREETING, true);
    chat.begin_load();
    assert!(chat.is_loading_transcript());

    chat.finish_load(vec![Message::new_user("dose?"), Message::new_assistant("5mg")]);
    assert!(!chat.is_loading_transcript());
    assert_eq!(
        chat.messages(),
        &[Message::new_user("dose?"), Message::new_assistant("5mg")]
    );

    chat.begin_load();
    chat.finish_load(vec![]);
    assert_eq!(chat.messages(), &[Message::greeting(GREETING)]);
}

#[test]
fn test_successful_send() {
    let mut chat = ChatState::new(GREETING, true);
    let before = chat.messages().len();

    chat.begin_send("max dose of epi?");
    assert!(chat.is_sending());
    assert!(chat.is_session_active());
    assert!(!chat.offers_more_context());

    chat.finish_send(Ok(ChatReply {
        answer: "0.3mg IM".to_string(),
        follow_up: Some("Repeat in 5 min?".to_string()),
        sources: vec![],
    }));

    assert!(!chat.is_sending());
    assert_eq!(chat.messages().len(), before + 2);
    assert_eq!(chat.messages()[before], Message::new_user("max dose of epi?"));
    assert_eq!(chat.messages()[before + 1], Message::new_assistant("0.3mg IM"));
    assert_eq!(
        chat.metadata().follow_up.as_deref(),
        Some("Repeat in 5 min?")
    );
}

#[test]
fn test_empty_answer_uses_placeholder() {
    let mut chat = ChatState::new(GREETING, true);
    chat.begin_send("hi");
    chat.finish_send(Ok(ChatReply::default()));
    assert_eq!(chat.messages().last().unwrap().text(), NO_RESPONSE_MESSAGE);
}

#[test]
fn test_failed_send() {
    let mut chat = active_chat();
    let before = chat.messages().len();

    chat.begin_send("again?");
    assert!(chat.metadata().is_empty());
    chat.finish_send(Err("backend returned HTTP 500".to_string()));

    assert_eq!(chat.messages().len(), before + 2);
    let last = chat.messages().last().unwrap();
    assert!(last.is_assistant());
    assert_eq!(
        last.text(),
        "Error: Could not get a reply from ResQ AI (backend returned HTTP 500)"
    );
    assert_ne!(last.text(), NO_RESPONSE_MESSAGE);
}

#[test]
fn test_more_context_eligibility() {
    let chat = active_chat();
    assert!(chat.offers_more_context());

    // Feature switched off
    let mut off = ChatState::new(GREETING, false);
    off.begin_send("q");
    off.finish_send(Ok(ChatReply {
        answer: "a".to_string(),
        ..Default::default()
    }));
    assert!(!off.offers_more_context());

    // Send in flight, latest message is the user's
    let mut sending = active_chat();
    sending.begin_send("next");
    assert!(!sending.offers_more_context());

    // Session not active after a transcript load
    let mut loaded = active_chat();
    loaded.begin_load();
    loaded.finish_load(vec![Message::new_user("q"), Message::new_assistant("a")]);
    assert!(!loaded.is_session_active());
    assert!(!loaded.offers_more_context());

    // No details marker, any case
    let mut no_details = ChatState::new(GREETING, true);
    no_details.begin_send("q");
    no_details.finish_send(Ok(ChatReply {
        answer: "Sorry, No Details Found in your files.".to_string(),
        ..Default::default()
    }));
    assert!(!no_details.offers_more_context());
}

#[test]
fn test_enhance_flow() {
    let mut chat = active_chat();

    let reply_id = chat.messages().last().unwrap().id().to_string();
    let request = chat.begin_enhance().unwrap();
    assert_eq!(request.text, "max dose of epi?");
    assert_eq!(request.message_id, reply_id);
    assert!(chat.is_enhancing());
    // Disabled while in flight
    assert_eq!(chat.begin_enhance(), None);

    chat.finish_enhance(&reply_id, None);
    assert!(!chat.is_enhancing());
    assert!(!chat.has_enhanced_context());

    assert!(chat.begin_enhance().is_some());
    chat.finish_enhance(&reply_id, Some("**Adults:** 0.5mg".to_string()));
    assert!(chat.metadata().enhanced_visible);
    assert_eq!(
        chat.metadata().enhanced_context.as_deref(),
        Some("**Adults:** 0.5mg")
    );

    chat.toggle_enhanced();
    assert!(!chat.metadata().enhanced_visible);
    chat.toggle_enhanced();
    assert!(chat.metadata().enhanced_visible);

    // A new send drops the enhanced text
    chat.begin_send("and children?");
    assert!(!chat.has_enhanced_context());
}

#[test]
fn test_revision_moves_on_transcript_changes() {
    let mut chat = ChatState::new(GREETING, true);
    let start = chat.revision();
    chat.begin_send("q");
    assert!(chat.revision() > start);

    let after_send = chat.revision();
    chat.toggle_enhanced();
    assert_eq!(chat.revision(), after_send);
}

#[test]
fn test_send_abandons_pending_enhance() {
    let mut chat = active_chat();
    let request = chat.begin_enhance().unwrap();

    chat.begin_send("and for kids?");
    assert!(!chat.is_enhancing());
    chat.finish_send(Ok(ChatReply {
        answer: "0.15mg".to_string(),
        ..Default::default()
    }));

    chat.finish_enhance(&request.message_id, Some("EPI DETAILS".to_string()));
    assert!(!chat.has_enhanced_context());
    assert!(chat.offers_more_context());
    assert!(chat.begin_enhance().is_some());
}
