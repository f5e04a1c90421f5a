use super::*;
use crate::models::{ChatReply, ConversationSummary, Message};

const GREETING: &str = "Hello from ResQ AI";

fn dashboard() -> Dashboard {
    Dashboard::new(Tab::all().to_vec(), GREETING, true)
}

fn backend(dash: &mut Dashboard, event: BackendEvent) -> Vec<Action> {
    dash.reduce(Input::Backend(event))
}

fn user(dash: &mut Dashboard, intent: Intent) -> Vec<Action> {
    dash.reduce(Input::User(intent))
}

fn greeting_only(dash: &Dashboard) -> bool {
    dash.chat.messages() == [Message::greeting(GREETING)]
}

/// Directory lists "a", the transcript for "a" is loaded.
fn dashboard_on_a() -> Dashboard {
    let mut dash = dashboard();
    user(&mut dash, Intent::Refresh);
    backend(
        &mut dash,
        BackendEvent::ConversationsLoaded(vec![
            ConversationSummary::new("a").with_title("Chest pain"),
        ]),
    );
    backend(
        &mut dash,
        BackendEvent::TranscriptLoaded {
            convo_id: "a".to_string(),
            messages: vec![Message::new_user("dose?"), Message::new_assistant("5mg")],
        },
    );
    dash
}

#[test]
fn test_initial_load_selects_last_and_loads_transcript() {
    let mut dash = dashboard();
    assert_eq!(user(&mut dash, Intent::Refresh), vec![Action::ListConversations]);
    assert!(dash.directory.is_loading());
    // The refresh key is disabled while a load is in flight
    assert!(user(&mut dash, Intent::Refresh).is_empty());

    let actions = backend(
        &mut dash,
        BackendEvent::ConversationsLoaded(vec![
            ConversationSummary::new("a").with_title("Chest pain"),
        ]),
    );
    assert_eq!(actions, vec![Action::LoadTranscript("a".to_string())]);
    assert_eq!(dash.active_conversation(), Some("a"));
    assert!(dash.chat.is_loading_transcript());

    backend(
        &mut dash,
        BackendEvent::TranscriptLoaded {
            convo_id: "a".to_string(),
            messages: vec![Message::new_user("dose?"), Message::new_assistant("5mg")],
        },
    );
    assert_eq!(
        dash.chat.messages(),
        [Message::new_user("dose?"), Message::new_assistant("5mg")]
    );
    assert!(dash.chat.messages()[0].is_user());
    assert!(dash.chat.messages()[1].is_assistant());
}

#[test]
fn test_unknown_conversation_shows_greeting() {
    for id in ["ghost", "", "deleted-1"] {
        let mut dash = dashboard_on_a();
        let actions = user(&mut dash, Intent::SelectConversation(id.to_string()));
        assert_eq!(actions, vec![Action::LoadTranscript(id.to_string())]);

        // The backend answers with an error payload, which decodes to nothing
        backend(
            &mut dash,
            BackendEvent::TranscriptLoaded {
                convo_id: id.to_string(),
                messages: vec![],
            },
        );
        assert!(greeting_only(&dash), "expected greeting for {id:?}");
        assert!(!dash.chat.is_loading_transcript());
    }
}

#[test]
fn test_stale_transcript_is_ignored() {
    let mut dash = dashboard_on_a();
    user(&mut dash, Intent::SelectConversation("b".to_string()));

    let actions = backend(
        &mut dash,
        BackendEvent::TranscriptLoaded {
            convo_id: "a".to_string(),
            messages: vec![Message::new_user("old")],
        },
    );
    assert!(actions.is_empty());
    assert!(dash.chat.is_loading_transcript());
}

#[test]
fn test_blank_send_is_a_noop() {
    for text in ["", "   ", "\n\t "] {
        let mut dash = dashboard_on_a();
        let before = dash.chat.messages().len();
        assert!(user(&mut dash, Intent::Send(text.to_string())).is_empty());
        assert_eq!(dash.chat.messages().len(), before);
        assert!(!dash.chat.is_sending());
    }
}

#[test]
fn test_send_without_selection() {
    let mut dash = dashboard();
    assert!(user(&mut dash, Intent::Send("hello".to_string())).is_empty());
    assert!(greeting_only(&dash));
    assert!(!dash.accepts_input());

    // Each focus event asks for exactly one new conversation
    assert_eq!(
        user(&mut dash, Intent::InputFocused),
        vec![Action::CreateConversation]
    );
    assert_eq!(
        user(&mut dash, Intent::InputFocused),
        vec![Action::CreateConversation]
    );

    let actions = backend(&mut dash, BackendEvent::ConversationCreated("new".to_string()));
    assert_eq!(
        actions,
        vec![
            Action::ListConversations,
            Action::LoadTranscript("new".to_string())
        ]
    );
    assert_eq!(dash.active_conversation(), Some("new"));
    assert!(user(&mut dash, Intent::InputFocused).is_empty());
}

#[test]
fn test_focused_input_creates_once_directory_settles() {
    let mut dash = dashboard();
    user(&mut dash, Intent::Refresh);
    // Nothing while the list is still loading
    assert!(dash.follow_focus(true).is_empty());

    backend(&mut dash, BackendEvent::ConversationsLoaded(vec![]));
    assert_eq!(dash.follow_focus(true), vec![Action::CreateConversation]);
    // Still waiting on that create, or it failed: no repeat
    assert!(dash.follow_focus(true).is_empty());

    // Leaving and coming back arms it again
    assert!(dash.follow_focus(false).is_empty());
    assert_eq!(dash.follow_focus(true), vec![Action::CreateConversation]);
}

#[test]
fn test_focused_input_creates_after_selection_is_deleted() {
    let mut dash = dashboard_on_a();
    assert!(dash.follow_focus(true).is_empty());

    backend(&mut dash, BackendEvent::ConversationDeleted("a".to_string()));
    assert_eq!(dash.active_conversation(), None);
    assert!(dash.follow_focus(true).is_empty());

    backend(&mut dash, BackendEvent::ConversationsLoaded(vec![]));
    assert_eq!(dash.follow_focus(true), vec![Action::CreateConversation]);

    backend(&mut dash, BackendEvent::ConversationCreated("b".to_string()));
    assert!(dash.follow_focus(true).is_empty());
}

#[test]
fn test_sidebar_focus_never_creates() {
    let mut dash = dashboard();
    user(&mut dash, Intent::Refresh);
    backend(&mut dash, BackendEvent::ConversationsLoaded(vec![]));
    assert!(dash.follow_focus(false).is_empty());
}

#[test]
fn test_successful_send() {
    let mut dash = dashboard_on_a();
    let before = dash.chat.messages().len();

    let actions = user(&mut dash, Intent::Send("max dose of epi?".to_string()));
    assert_eq!(
        actions,
        vec![Action::SendMessage {
            convo_id: "a".to_string(),
            text: "max dose of epi?".to_string()
        }]
    );
    assert!(!dash.accepts_input());
    // A second send while one is in flight is refused
    assert!(user(&mut dash, Intent::Send("again".to_string())).is_empty());

    let actions = backend(
        &mut dash,
        BackendEvent::ReplyReceived {
            convo_id: "a".to_string(),
            reply: Ok(ChatReply {
                answer: "0.3mg IM".to_string(),
                follow_up: Some("Repeat in 5 min?".to_string()),
                sources: vec![],
            }),
        },
    );
    assert_eq!(actions, vec![Action::ListConversations]);

    let messages = dash.chat.messages();
    assert_eq!(messages.len(), before + 2);
    assert_eq!(messages[before], Message::new_user("max dose of epi?"));
    assert_eq!(messages[before + 1], Message::new_assistant("0.3mg IM"));
    assert_eq!(
        dash.chat.metadata().follow_up.as_deref(),
        Some("Repeat in 5 min?")
    );
}

#[test]
fn test_failed_send() {
    let mut dash = dashboard_on_a();
    let before = dash.chat.messages().len();

    user(&mut dash, Intent::Send("max dose of epi?".to_string()));
    let actions = backend(
        &mut dash,
        BackendEvent::ReplyReceived {
            convo_id: "a".to_string(),
            reply: Err("backend returned HTTP 500".to_string()),
        },
    );
    assert!(actions.is_empty());

    let messages = dash.chat.messages();
    assert_eq!(messages.len(), before + 2);
    let error = &messages[before + 1];
    assert!(error.is_assistant());
    assert!(!error.text().is_empty());
    assert!(error.text().contains("HTTP 500"));
    assert_ne!(error.text(), crate::config::constants::NO_RESPONSE_MESSAGE);
}

#[test]
fn test_reply_for_inactive_conversation() {
    let mut dash = dashboard_on_a();
    user(&mut dash, Intent::Send("q".to_string()));
    user(&mut dash, Intent::SelectConversation("b".to_string()));
    backend(
        &mut dash,
        BackendEvent::TranscriptLoaded {
            convo_id: "b".to_string(),
            messages: vec![],
        },
    );

    let actions = backend(
        &mut dash,
        BackendEvent::ReplyReceived {
            convo_id: "a".to_string(),
            reply: Ok(ChatReply {
                answer: "late".to_string(),
                ..Default::default()
            }),
        },
    );
    assert_eq!(actions, vec![Action::ListConversations]);
    assert!(greeting_only(&dash));
    assert!(!dash.chat.is_sending());
}

#[test]
fn test_more_context() {
    let mut dash = dashboard_on_a();
    // Loaded transcripts do not offer it, the session is not active yet
    assert!(user(&mut dash, Intent::MoreContext).is_empty());

    user(&mut dash, Intent::Send("max dose of epi?".to_string()));
    backend(
        &mut dash,
        BackendEvent::ReplyReceived {
            convo_id: "a".to_string(),
            reply: Ok(ChatReply {
                answer: "0.3mg IM".to_string(),
                ..Default::default()
            }),
        },
    );
    assert!(dash.chat.offers_more_context());

    let reply_id = dash.chat.messages().last().unwrap().id().to_string();
    let actions = user(&mut dash, Intent::MoreContext);
    assert_eq!(
        actions,
        vec![Action::EnhanceContext {
            convo_id: "a".to_string(),
            message_id: reply_id.clone(),
            text: "max dose of epi?".to_string()
        }]
    );
    assert!(user(&mut dash, Intent::MoreContext).is_empty());

    backend(
        &mut dash,
        BackendEvent::ContextEnhanced {
            convo_id: "a".to_string(),
            message_id: reply_id,
            enhanced: Some("**Adults:** 0.5mg".to_string()),
        },
    );
    assert!(dash.chat.metadata().enhanced_visible);

    // Toggling never fetches again
    assert!(user(&mut dash, Intent::MoreContext).is_empty());
    assert!(!dash.chat.metadata().enhanced_visible);
}

#[test]
fn test_stale_context_is_not_attached_to_newer_reply() {
    let mut dash = dashboard_on_a();
    let reply = |answer: &str| BackendEvent::ReplyReceived {
        convo_id: "a".to_string(),
        reply: Ok(ChatReply {
            answer: answer.to_string(),
            ..Default::default()
        }),
    };

    user(&mut dash, Intent::Send("max dose of epi?".to_string()));
    backend(&mut dash, reply("0.3mg IM"));
    let first = match &user(&mut dash, Intent::MoreContext)[..] {
        [Action::EnhanceContext { message_id, .. }] => message_id.clone(),
        other => panic!("unexpected actions {other:?}"),
    };

    // A new question while the first fetch is still out
    user(&mut dash, Intent::Send("and for kids?".to_string()));
    assert!(!dash.chat.is_enhancing());
    backend(&mut dash, reply("0.15mg"));

    // The new reply can ask for its own context right away
    let second = match &user(&mut dash, Intent::MoreContext)[..] {
        [Action::EnhanceContext { message_id, text, .. }] => {
            assert_eq!(text, "and for kids?");
            message_id.clone()
        }
        other => panic!("unexpected actions {other:?}"),
    };
    assert_ne!(first, second);

    backend(
        &mut dash,
        BackendEvent::ContextEnhanced {
            convo_id: "a".to_string(),
            message_id: first,
            enhanced: Some("EPI DETAILS".to_string()),
        },
    );
    assert_eq!(
        dash.chat.messages().last().map(|m| m.text()),
        Some("0.15mg")
    );
    assert!(!dash.chat.has_enhanced_context());
    assert!(dash.chat.is_enhancing());

    backend(
        &mut dash,
        BackendEvent::ContextEnhanced {
            convo_id: "a".to_string(),
            message_id: second,
            enhanced: Some("PEDIATRIC DETAILS".to_string()),
        },
    );
    assert_eq!(
        dash.chat.metadata().enhanced_context.as_deref(),
        Some("PEDIATRIC DETAILS")
    );
}

#[test]
fn test_more_context_disabled_by_flag() {
    let mut dash = Dashboard::new(Tab::all().to_vec(), GREETING, false);
    backend(
        &mut dash,
        BackendEvent::ConversationsLoaded(vec![ConversationSummary::new("a")]),
    );
    user(&mut dash, Intent::Send("q".to_string()));
    backend(
        &mut dash,
        BackendEvent::ReplyReceived {
            convo_id: "a".to_string(),
            reply: Ok(ChatReply {
                answer: "a".to_string(),
                ..Default::default()
            }),
        },
    );
    assert!(user(&mut dash, Intent::MoreContext).is_empty());
}

#[test]
fn test_delete_selected_conversation() {
    let mut dash = dashboard_on_a();
    assert_eq!(
        user(&mut dash, Intent::DeleteConversation("a".to_string())),
        vec![Action::DeleteConversation("a".to_string())]
    );

    let actions = backend(&mut dash, BackendEvent::ConversationDeleted("a".to_string()));
    assert_eq!(actions, vec![Action::ListConversations]);
    assert_eq!(dash.active_conversation(), None);
    assert!(greeting_only(&dash));
}

#[test]
fn test_delete_other_conversation_keeps_transcript() {
    let mut dash = dashboard_on_a();
    let actions = backend(&mut dash, BackendEvent::ConversationDeleted("z".to_string()));
    assert_eq!(actions, vec![Action::ListConversations]);
    assert_eq!(dash.active_conversation(), Some("a"));
    assert_eq!(dash.chat.messages().len(), 2);
}

#[test]
fn test_clear_all() {
    let mut dash = dashboard_on_a();
    assert_eq!(user(&mut dash, Intent::ClearAll), vec![Action::ClearHistory]);

    let actions = backend(&mut dash, BackendEvent::HistoryCleared);
    assert_eq!(actions, vec![Action::ListConversations]);
    assert!(dash.directory.conversations().is_empty());
    assert_eq!(dash.active_conversation(), None);
    assert!(greeting_only(&dash));

    backend(&mut dash, BackendEvent::ConversationsLoaded(vec![]));
    assert_eq!(dash.active_conversation(), None);
    assert!(greeting_only(&dash));
}

#[test]
fn test_tabs() {
    let mut dash = Dashboard::new(vec![Tab::AiAssistant, Tab::Protocols], GREETING, true);
    assert!(dash.shell.shows_chat());

    user(&mut dash, Intent::NextTab);
    assert_eq!(dash.shell.active(), Tab::Protocols);
    assert!(!dash.shell.shows_chat());
    user(&mut dash, Intent::NextTab);
    assert_eq!(dash.shell.active(), Tab::AiAssistant);
    user(&mut dash, Intent::PrevTab);
    assert_eq!(dash.shell.active(), Tab::Protocols);

    // Not configured, ignored
    user(&mut dash, Intent::SelectTab(Tab::Files));
    assert_eq!(dash.shell.active(), Tab::Protocols);
    user(&mut dash, Intent::SelectTab(Tab::AiAssistant));
    assert_eq!(dash.shell.active(), Tab::AiAssistant);
}

#[test]
fn test_from_config() {
    let mut config = Configuration::default();
    config.shell.tabs = vec![Tab::Triage];
    config.general.greeting = "Hi".to_string();
    config.features.enhance_context = false;

    let dash = Dashboard::from_config(&config);
    assert_eq!(dash.shell.tabs(), [Tab::Triage]);
    assert_eq!(dash.chat.messages(), [Message::greeting("Hi")]);
}
