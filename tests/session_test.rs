// tests/session_test.rs — Integration test: session lifecycle, optimistic sends, echo reconciliation

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use pretty_assertions::assert_eq;
use tokio::sync::mpsc;

use roomchat::channel::{
    InboundEvent, InboundQueue, JoinRequest, LocalHub, NewFile, NewMessage, OutboundEvent,
    RealtimeChannel,
};
use roomchat::infra::errors::{ChatError, Result};
use roomchat::session::{
    Author, ChatSession, MessageKind, RemoteOutcome, SessionConfig, UserIdentity, WELCOME_TEXT,
};
use roomchat::upload::{decode_inline, FileRef, Uploader};

/// Channel that records emits and lets the test push inbound events.
#[derive(Default)]
struct RecordingChannel {
    emitted: Mutex<Vec<OutboundEvent>>,
    joined: Mutex<Vec<JoinRequest>>,
    inbound: Mutex<Option<mpsc::UnboundedSender<InboundEvent>>>,
    disconnects: Mutex<usize>,
}

impl RecordingChannel {
    fn push(&self, event: InboundEvent) {
        if let Some(tx) = self.inbound.lock().unwrap().as_ref() {
            tx.send(event).unwrap();
        }
    }

    fn emitted(&self) -> Vec<OutboundEvent> {
        self.emitted.lock().unwrap().clone()
    }
}

impl RealtimeChannel for RecordingChannel {
    fn join(&self, request: JoinRequest) -> Result<InboundQueue> {
        let (tx, rx) = mpsc::unbounded_channel();
        *self.inbound.lock().unwrap() = Some(tx);
        self.joined.lock().unwrap().push(request);
        Ok(rx)
    }

    fn emit(&self, event: OutboundEvent) {
        self.emitted.lock().unwrap().push(event);
    }

    fn disconnect(&self) {
        self.inbound.lock().unwrap().take();
        *self.disconnects.lock().unwrap() += 1;
    }
}

/// Uploader with a canned reply that counts how often it was asked.
struct FixedUploader {
    reply: std::result::Result<String, String>,
    calls: AtomicUsize,
}

impl FixedUploader {
    fn ok(path: &str) -> Self {
        Self {
            reply: Ok(path.into()),
            calls: AtomicUsize::new(0),
        }
    }

    fn failing(reason: &str) -> Self {
        Self {
            reply: Err(reason.into()),
            calls: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Uploader for FixedUploader {
    async fn upload(&self, _file: &FileRef) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.reply.clone().map_err(ChatError::Upload)
    }
}

fn ada() -> UserIdentity {
    UserIdentity::new("Ada", "", "ada@example.com")
}

fn tech(user: UserIdentity) -> SessionConfig {
    SessionConfig::new("Tech", "en", user)
}

fn recording_session() -> (Arc<RecordingChannel>, ChatSession) {
    session_with(Arc::new(FixedUploader::ok("/uploads/cat.png")))
}

fn session_with(uploader: Arc<FixedUploader>) -> (Arc<RecordingChannel>, ChatSession) {
    let channel = Arc::new(RecordingChannel::default());
    let session = ChatSession::new(channel.clone(), uploader);
    (channel, session)
}

fn new_message(text: &str, first: &str, last: &str, score: Option<f64>) -> NewMessage {
    NewMessage {
        message: text.into(),
        first_name: first.into(),
        last_name: last.into(),
        sentiment_score: score,
    }
}

fn file_from(name: &str, first: &str) -> NewFile {
    NewFile {
        file_name: name.into(),
        file_type: "text/plain".into(),
        file_data: "data:text/plain;base64,YQ==".into(),
        first_name: first.into(),
        last_name: "".into(),
    }
}

#[test]
fn test_activate_joins_with_welcome() {
    let (channel, mut session) = recording_session();
    let handle = session.activate(tech(ada())).unwrap();

    assert!(session.is_active());
    assert_eq!(session.messages().len(), 1);
    let welcome = &session.messages()[0];
    assert_eq!(welcome.author, Author::System);
    assert_eq!(welcome.text(), Some(WELCOME_TEXT));
    assert!(!welcome.is_self);

    let joined = channel.joined.lock().unwrap().clone();
    assert_eq!(joined.len(), 1);
    assert_eq!(joined[0].room, "Tech");
    assert_eq!(joined[0].language, "en");
    assert_eq!(joined[0].first_name, "Ada");

    assert_eq!(handle.room(), "Tech");
    assert_eq!(handle.identity(), "Ada");
    assert_eq!(handle.messages().len(), 1);
}

#[test]
fn test_activate_rejects_blank_room() {
    let (_channel, mut session) = recording_session();
    let err = session
        .activate(SessionConfig::new("  ", "en", ada()))
        .unwrap_err();
    assert!(matches!(err, ChatError::Config(_)));
    assert!(!session.is_active());
}

#[test]
fn test_own_echo_reconciles_score() {
    let (channel, mut session) = recording_session();
    session.activate(tech(ada())).unwrap();

    let sent = session.send_text("hello").unwrap().unwrap();
    assert!(sent.is_self);
    assert!(sent.is_pending_score());
    assert_eq!(session.messages().len(), 2);

    match &channel.emitted()[..] {
        [OutboundEvent::SendMessage(m)] => {
            assert_eq!(m.room, "Tech");
            assert_eq!(m.message, "hello");
            assert_eq!(m.language, "en");
            assert_eq!(m.first_name, "Ada");
        }
        other => panic!("unexpected emits: {other:?}"),
    }

    let outcome = session
        .on_remote_text(new_message("hello", "Ada", "", Some(2.0)))
        .unwrap();
    assert_eq!(outcome, RemoteOutcome::Reconciled(sent.id));
    assert_eq!(session.messages().len(), 2);
    assert_eq!(session.messages()[1].sentiment_score, Some(2.0));
}

#[test]
fn test_other_participant_appended() {
    let (_channel, mut session) = recording_session();
    session.activate(tech(ada())).unwrap();

    let outcome = session
        .on_remote_text(new_message("hi", "Bob", "", Some(-3.0)))
        .unwrap();
    let RemoteOutcome::Appended(id) = outcome else {
        panic!("expected append, got {outcome:?}");
    };

    let m = session.log().get(id).unwrap();
    assert_eq!(m.text(), Some("hi"));
    assert_eq!(m.author, Author::participant("Bob", ""));
    assert!(!m.is_self);
    assert_eq!(m.sentiment_score, Some(-3.0));
}

#[test]
fn test_unmatched_echo_dropped() {
    let (_channel, mut session) = recording_session();
    session.activate(tech(ada())).unwrap();

    let outcome = session
        .on_remote_text(new_message("never sent", "Ada", "", Some(1.0)))
        .unwrap();
    assert_eq!(outcome, RemoteOutcome::Dropped);
    assert_eq!(session.messages().len(), 1);
}

#[test]
fn test_duplicate_texts_reconcile_most_recent_first() {
    let (_channel, mut session) = recording_session();
    session.activate(tech(ada())).unwrap();

    let first = session.send_text("ok").unwrap().unwrap();
    let second = session.send_text("ok").unwrap().unwrap();

    let outcome = session
        .on_remote_text(new_message("ok", "Ada", "", Some(1.0)))
        .unwrap();
    assert_eq!(outcome, RemoteOutcome::Reconciled(second.id));
    assert!(session.log().get(first.id).unwrap().is_pending_score());

    let outcome = session
        .on_remote_text(new_message("ok", "Ada", "", Some(0.0)))
        .unwrap();
    assert_eq!(outcome, RemoteOutcome::Reconciled(first.id));
    assert_eq!(session.log().pending_count(), 0);
}

#[test]
fn test_echo_without_score_stays_pending() {
    let (_channel, mut session) = recording_session();
    session.activate(tech(ada())).unwrap();
    let sent = session.send_text("hmm").unwrap().unwrap();

    session
        .on_remote_text(new_message("hmm", "Ada", "", None))
        .unwrap();
    assert!(session.log().get(sent.id).unwrap().is_pending_score());
}

#[test]
fn test_whitespace_send_is_noop() {
    let (channel, mut session) = recording_session();
    session.activate(tech(ada())).unwrap();

    assert!(session.send_text("   \n\t").unwrap().is_none());
    assert!(session.send_text("").unwrap().is_none());
    assert_eq!(session.messages().len(), 1);
    assert!(channel.emitted().is_empty());
}

#[test]
fn test_send_trims_text() {
    let (channel, mut session) = recording_session();
    session.activate(tech(ada())).unwrap();

    let sent = session.send_text("  padded  ").unwrap().unwrap();
    assert_eq!(sent.text(), Some("padded"));
    match &channel.emitted()[..] {
        [OutboundEvent::SendMessage(m)] => assert_eq!(m.message, "padded"),
        other => panic!("unexpected emits: {other:?}"),
    }
}

#[test]
fn test_ids_contiguous() {
    let (_channel, mut session) = recording_session();
    session.activate(tech(ada())).unwrap();

    session.send_text("one").unwrap();
    session
        .on_remote_text(new_message("two", "Bob", "", None))
        .unwrap();
    session.send_text("three").unwrap();

    let ids: Vec<u64> = session.messages().iter().map(|m| m.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4]);
}

#[tokio::test]
async fn test_deactivate_stops_everything() {
    let uploader = Arc::new(FixedUploader::ok("/uploads/cat.png"));
    let (channel, mut session) = session_with(uploader.clone());
    session.activate(tech(ada())).unwrap();
    session.send_text("bye").unwrap();

    session.deactivate();
    assert!(!session.is_active());
    assert_eq!(*channel.disconnects.lock().unwrap(), 1);

    let before = session.messages().len();
    let err = session.send_text("x").unwrap_err();
    assert!(matches!(err, ChatError::Lifecycle(_)));
    let err = session
        .on_remote_text(new_message("late", "Bob", "", None))
        .unwrap_err();
    assert!(matches!(err, ChatError::Lifecycle(_)));

    let image = FileRef::new("cat.png", "image/png", vec![1, 2, 3]);
    let err = session.send_file(image).await.unwrap_err();
    assert!(matches!(err, ChatError::Lifecycle(_)));
    let notes = FileRef::new("notes.txt", "text/plain", b"hi".to_vec());
    let err = session.send_file(notes).await.unwrap_err();
    assert!(matches!(err, ChatError::Lifecycle(_)));
    let err = session.on_remote_file(file_from("b.txt", "Bob")).unwrap_err();
    assert!(matches!(err, ChatError::Lifecycle(_)));

    assert_eq!(session.messages().len(), before);
    assert_eq!(channel.emitted().len(), 1);
    assert_eq!(uploader.calls(), 0);

    // Idempotent
    session.deactivate();
    assert_eq!(*channel.disconnects.lock().unwrap(), 1);
}

#[tokio::test]
async fn test_files_rejected_before_activate() {
    let uploader = Arc::new(FixedUploader::ok("/uploads/cat.png"));
    let (channel, mut session) = session_with(uploader.clone());

    let image = FileRef::new("cat.png", "image/png", vec![1, 2, 3]);
    assert!(matches!(
        session.send_file(image).await,
        Err(ChatError::Lifecycle(_))
    ));
    assert!(matches!(
        session.on_remote_file(file_from("b.txt", "Bob")),
        Err(ChatError::Lifecycle(_))
    ));
    assert!(session.messages().is_empty());
    assert!(channel.emitted().is_empty());
    assert_eq!(uploader.calls(), 0);
}

#[test]
fn test_reactivation_rejected() {
    let (_channel, mut session) = recording_session();
    session.activate(tech(ada())).unwrap();
    assert!(matches!(
        session.activate(tech(ada())),
        Err(ChatError::Lifecycle(_))
    ));

    session.deactivate();
    assert!(matches!(
        session.activate(tech(ada())),
        Err(ChatError::Lifecycle(_))
    ));
}

#[test]
fn test_deactivate_before_activate_is_noop() {
    let (channel, mut session) = recording_session();
    session.deactivate();
    assert_eq!(*channel.disconnects.lock().unwrap(), 0);
    assert!(session.activate(tech(ada())).is_ok());
}

#[tokio::test]
async fn test_inline_file_roundtrip() {
    let (channel, mut session) = recording_session();
    session.activate(tech(ada())).unwrap();

    let file = FileRef::new("notes.txt", "text/plain", b"hello".to_vec());
    let message = session.send_file(file).await.unwrap();
    assert_eq!(message.kind(), MessageKind::File);
    assert!(message.is_self);

    let attachment = message.file().unwrap();
    let (mime, bytes) = decode_inline(&attachment.file_data).unwrap();
    assert_eq!(mime, "text/plain");
    assert_eq!(bytes, b"hello");

    match &channel.emitted()[..] {
        [OutboundEvent::SendFile(f)] => {
            assert_eq!(f.file_name, "notes.txt");
            assert_eq!(f.file_data, attachment.file_data);
        }
        other => panic!("unexpected emits: {other:?}"),
    }
}

#[tokio::test]
async fn test_image_uses_uploaded_path() {
    let (_channel, mut session) = recording_session();
    session.activate(tech(ada())).unwrap();

    let file = FileRef::new("cat.png", "image/png", vec![0x89, 0x50]);
    let message = session.send_file(file).await.unwrap();
    assert_eq!(message.file().unwrap().file_data, "/uploads/cat.png");
}

#[tokio::test]
async fn test_image_upload_failure_appends_nothing() {
    let uploader = Arc::new(FixedUploader::failing("server said 500"));
    let (channel, mut session) = session_with(uploader.clone());
    session.activate(tech(ada())).unwrap();

    let file = FileRef::new("cat.png", "image/png", vec![1, 2, 3]);
    let err = session.send_file(file).await.unwrap_err();
    assert!(matches!(err, ChatError::Upload(_)));
    assert!(err.is_recoverable());
    assert_eq!(session.messages().len(), 1);
    assert!(channel.emitted().is_empty());
    assert_eq!(uploader.calls(), 1);
}

#[tokio::test]
async fn test_image_from_disk_goes_through_uploader() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scan.tiff");
    std::fs::write(&path, [0x49, 0x49, 0x2a, 0x00]).unwrap();

    let uploader = Arc::new(FixedUploader::ok("/uploads/scan.tiff"));
    let (channel, mut session) = session_with(uploader.clone());
    session.activate(tech(ada())).unwrap();

    let file = FileRef::from_path(&path).unwrap();
    assert_eq!(file.mime_type, "image/tiff");
    let message = session.send_file(file).await.unwrap();

    assert_eq!(uploader.calls(), 1);
    let attachment = message.file().unwrap();
    assert_eq!(attachment.file_data, "/uploads/scan.tiff");
    assert_eq!(attachment.file_type, "image/tiff");
    match &channel.emitted()[..] {
        [OutboundEvent::SendFile(f)] => assert_eq!(f.file_data, "/uploads/scan.tiff"),
        other => panic!("unexpected emits: {other:?}"),
    }
}

#[test]
fn test_own_file_echo_dropped_other_file_appended() {
    let (_channel, mut session) = recording_session();
    session.activate(tech(ada())).unwrap();

    assert_eq!(
        session.on_remote_file(file_from("a.txt", "Ada")).unwrap(),
        RemoteOutcome::Dropped
    );

    let theirs = NewFile {
        file_name: "b.png".into(),
        file_type: "image/png".into(),
        file_data: "/uploads/b.png".into(),
        first_name: "Bob".into(),
        last_name: "Stone".into(),
    };
    let RemoteOutcome::Appended(id) = session.on_remote_file(theirs).unwrap() else {
        panic!("expected append");
    };
    let m = session.log().get(id).unwrap();
    assert_eq!(m.file().unwrap().file_name, "b.png");
    assert_eq!(m.author, Author::participant("Bob", "Stone"));
}

#[test]
fn test_process_pending_in_arrival_order() {
    let (channel, mut session) = recording_session();
    session.activate(tech(ada())).unwrap();
    let sent = session.send_text("hello").unwrap().unwrap();

    channel.push(InboundEvent::NewMessage(new_message("first", "Bob", "", None)));
    channel.push(InboundEvent::NewMessage(new_message("hello", "Ada", "", Some(2.0))));
    channel.push(InboundEvent::NewMessage(new_message("  ", "Cy", "", None)));
    channel.push(InboundEvent::NewMessage(new_message("second", "Cy", "", None)));

    let outcomes = session.process_pending();
    assert_eq!(
        outcomes,
        vec![
            RemoteOutcome::Appended(3),
            RemoteOutcome::Reconciled(sent.id),
            RemoteOutcome::Dropped,
            RemoteOutcome::Appended(4),
        ]
    );
    let texts: Vec<_> = session.messages().iter().filter_map(|m| m.text()).collect();
    assert_eq!(texts, vec![WELCOME_TEXT, "hello", "first", "second"]);
    assert!(session.process_pending().is_empty());
}

#[tokio::test]
async fn test_local_hub_two_participants() {
    let hub = LocalHub::new();
    let uploader: Arc<dyn Uploader> = Arc::new(FixedUploader::failing("offline"));

    let mut ada_session = ChatSession::new(Arc::new(hub.connect()), uploader.clone());
    let mut bob_session = ChatSession::new(Arc::new(hub.connect()), uploader);
    ada_session.activate(tech(ada())).unwrap();
    let mut bob_handle = bob_session
        .activate(tech(UserIdentity::new("Bob", "", "")))
        .unwrap();
    assert_eq!(hub.member_count("Tech"), 2);

    let sent = ada_session.send_text("hello bob").unwrap().unwrap();

    assert_eq!(
        ada_session.next_event().await,
        Some(RemoteOutcome::Reconciled(sent.id))
    );
    let outcome = bob_session.next_event().await;
    assert_eq!(outcome, Some(RemoteOutcome::Appended(2)));

    assert!(bob_handle.changed().await);
    let snapshot = bob_handle.messages();
    assert_eq!(snapshot.len(), 2);
    assert_eq!(snapshot[1].text(), Some("hello bob"));
    assert_eq!(snapshot[1].author, Author::participant("Ada", ""));

    ada_session.deactivate();
    assert_eq!(ada_session.next_event().await, None);
    assert_eq!(
        hub.inject(
            "Tech",
            InboundEvent::NewMessage(new_message("still here?", "Cy", "", None))
        ),
        1
    );
}
