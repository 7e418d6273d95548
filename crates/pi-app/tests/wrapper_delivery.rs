//! End-to-end delivery behavior of wrapped inputs: filtering, enable state,
//! disposal, fan-out, and file-backed conversion.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use pi_app::{DeliveryMode, PasteCallback, PasteChannel, PasteWrapper, PasteWrapperConfig};
use pi_core::clipboard::{ClipboardContent, ClipboardItem, MimeType};
use pi_core::ports::ClipboardReaderPort;
use pi_core::{PasteFilter, Payload, PayloadKind};
use pi_platform::{CommandHookPasteSource, ContentInsertionPasteSource, FileTempStore};
use tokio::sync::mpsc;
use tokio::time::timeout;

const PNG_MAGIC: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

struct SettableReader {
    content: Mutex<ClipboardContent>,
}

impl SettableReader {
    fn new() -> Self {
        Self {
            content: Mutex::new(ClipboardContent::empty()),
        }
    }

    fn set(&self, content: ClipboardContent) {
        *self.content.lock().unwrap() = content;
    }
}

impl ClipboardReaderPort for SettableReader {
    fn read(&self) -> anyhow::Result<ClipboardContent> {
        Ok(self.content.lock().unwrap().clone())
    }

    fn read_text(&self) -> anyhow::Result<ClipboardContent> {
        let content = self.content.lock().unwrap();
        let items = content
            .items
            .iter()
            .filter(|item| item.mime.is_text())
            .cloned()
            .collect();
        Ok(ClipboardContent::new(items))
    }
}

fn collecting_callback() -> (PasteCallback, mpsc::UnboundedReceiver<Payload>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let callback: PasteCallback = Arc::new(move |payload| {
        let _ = tx.send(payload);
    });
    (callback, rx)
}

async fn recv_payload(rx: &mut mpsc::UnboundedReceiver<Payload>) -> Payload {
    timeout(Duration::from_secs(1), rx.recv())
        .await
        .expect("timed out waiting for paste delivery")
        .expect("callback channel closed")
}

/// Give in-flight events time to propagate, then assert nothing arrived.
async fn assert_no_delivery(rx: &mut mpsc::UnboundedReceiver<Payload>) {
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(rx.try_recv().is_err(), "unexpected delivery");
}

fn push_channel() -> (Arc<PasteChannel>, Arc<ContentInsertionPasteSource>) {
    let source = Arc::new(ContentInsertionPasteSource::new());
    let channel = Arc::new(PasteChannel::new(
        Arc::new(SettableReader::new()),
        source.clone(),
    ));
    (channel, source)
}

#[tokio::test]
async fn test_command_hook_paste_delivers_exactly_once() {
    let reader = Arc::new(SettableReader::new());
    reader.set(ClipboardContent::new(vec![ClipboardItem::text("hello")]));

    let source = Arc::new(CommandHookPasteSource::new());
    let channel = Arc::new(PasteChannel::new(reader, source.clone()));

    let (callback, mut rx) = collecting_callback();
    let wrapper =
        PasteWrapper::new(channel, PasteWrapperConfig::default(), None, callback).unwrap();
    wrapper.mount().await;

    source.notify_paste_command();

    assert_eq!(recv_payload(&mut rx).await, Payload::new_text("hello"));
    assert_no_delivery(&mut rx).await;
}

#[tokio::test]
async fn test_clipboard_is_read_after_the_paste_action() {
    let reader = Arc::new(SettableReader::new());
    let source = Arc::new(CommandHookPasteSource::new());
    let channel = Arc::new(PasteChannel::new(reader.clone(), source.clone()));

    let (callback, mut rx) = collecting_callback();
    let wrapper =
        PasteWrapper::new(channel, PasteWrapperConfig::default(), None, callback).unwrap();
    wrapper.mount().await;

    // Content lands on the clipboard only after the wrapper is live; the
    // paste must still see it, proving nothing was pre-fetched.
    reader.set(ClipboardContent::new(vec![ClipboardItem::text("fresh")]));
    source.notify_paste_command();

    assert_eq!(recv_payload(&mut rx).await, Payload::new_text("fresh"));
}

#[tokio::test]
async fn test_image_filter_never_sees_text() {
    let (channel, source) = push_channel();

    let (callback, mut rx) = collecting_callback();
    let config = PasteWrapperConfig {
        filter: PasteFilter::of([PayloadKind::Image]),
        ..Default::default()
    };
    let wrapper = PasteWrapper::new(channel, config, None, callback).unwrap();
    wrapper.mount().await;

    for i in 0..100 {
        source
            .insert_content(vec![ClipboardItem::text(format!("text {i}"))])
            .await;
    }
    assert_no_delivery(&mut rx).await;

    // The wrapper is still alive and still delivers matching payloads.
    source
        .insert_content(vec![ClipboardItem::new(
            MimeType::image_png(),
            PNG_MAGIC.to_vec(),
        )])
        .await;
    assert!(recv_payload(&mut rx).await.is_image());
}

#[tokio::test]
async fn test_disable_enable_round_trip() {
    let (channel, source) = push_channel();

    let (callback, mut rx) = collecting_callback();
    let wrapper =
        PasteWrapper::new(channel, PasteWrapperConfig::default(), None, callback).unwrap();
    wrapper.mount().await;

    source.insert_content(vec![ClipboardItem::text("one")]).await;
    assert_eq!(recv_payload(&mut rx).await, Payload::new_text("one"));

    wrapper.set_enabled(false).await;
    assert!(!wrapper.is_enabled().await);
    source.insert_content(vec![ClipboardItem::text("two")]).await;
    assert_no_delivery(&mut rx).await;

    wrapper.set_enabled(true).await;
    source.insert_content(vec![ClipboardItem::text("three")]).await;
    assert_eq!(recv_payload(&mut rx).await, Payload::new_text("three"));
    assert_no_delivery(&mut rx).await;
}

#[tokio::test]
async fn test_disposed_wrapper_receives_nothing() {
    let (channel, source) = push_channel();

    let (callback, mut rx) = collecting_callback();
    let wrapper =
        PasteWrapper::new(channel, PasteWrapperConfig::default(), None, callback).unwrap();
    wrapper.mount().await;
    wrapper.dispose().await;

    source.insert_content(vec![ClipboardItem::text("late")]).await;
    assert_no_delivery(&mut rx).await;

    // Every post-disposal operation is a silent no-op.
    wrapper.set_enabled(true).await;
    wrapper.mount().await;
    wrapper.dispose().await;
    source.insert_content(vec![ClipboardItem::text("later")]).await;
    assert_no_delivery(&mut rx).await;
}

#[tokio::test]
async fn test_mounting_twice_does_not_double_deliver() {
    let (channel, source) = push_channel();

    let (callback, mut rx) = collecting_callback();
    let wrapper =
        PasteWrapper::new(channel, PasteWrapperConfig::default(), None, callback).unwrap();
    wrapper.mount().await;
    wrapper.mount().await;

    source.insert_content(vec![ClipboardItem::text("once")]).await;
    assert_eq!(recv_payload(&mut rx).await, Payload::new_text("once"));
    assert_no_delivery(&mut rx).await;
}

#[tokio::test]
async fn test_every_live_subscriber_sees_every_event() {
    let (channel, source) = push_channel();

    let (all_callback, mut all_rx) = collecting_callback();
    let all = PasteWrapper::new(
        channel.clone(),
        PasteWrapperConfig::default(),
        None,
        all_callback,
    )
    .unwrap();
    all.mount().await;

    let (text_callback, mut text_rx) = collecting_callback();
    let text_only = PasteWrapper::new(
        channel.clone(),
        PasteWrapperConfig {
            filter: PasteFilter::of([PayloadKind::Text]),
            ..Default::default()
        },
        None,
        text_callback,
    )
    .unwrap();
    text_only.mount().await;

    assert_eq!(channel.registered_views(), 2);

    source.insert_content(vec![ClipboardItem::text("shared")]).await;
    source
        .insert_content(vec![ClipboardItem::new(
            MimeType::image_png(),
            PNG_MAGIC.to_vec(),
        )])
        .await;

    assert_eq!(recv_payload(&mut all_rx).await, Payload::new_text("shared"));
    assert!(recv_payload(&mut all_rx).await.is_image());

    assert_eq!(recv_payload(&mut text_rx).await, Payload::new_text("shared"));
    assert_no_delivery(&mut text_rx).await;
}

#[tokio::test]
async fn test_deliveries_preserve_paste_order() {
    let (channel, source) = push_channel();

    let (callback, mut rx) = collecting_callback();
    let wrapper =
        PasteWrapper::new(channel, PasteWrapperConfig::default(), None, callback).unwrap();
    wrapper.mount().await;

    for text in ["a", "b", "c"] {
        source.insert_content(vec![ClipboardItem::text(text)]).await;
    }

    assert_eq!(recv_payload(&mut rx).await, Payload::new_text("a"));
    assert_eq!(recv_payload(&mut rx).await, Payload::new_text("b"));
    assert_eq!(recv_payload(&mut rx).await, Payload::new_text("c"));
}

#[tokio::test]
async fn test_file_backed_delivery_writes_temp_files() {
    let dir = tempfile::tempdir().unwrap();
    let (channel, source) = push_channel();

    let (callback, mut rx) = collecting_callback();
    let config = PasteWrapperConfig {
        delivery: DeliveryMode::FileBacked,
        ..Default::default()
    };
    let store = Arc::new(FileTempStore::with_dir(dir.path()));
    let wrapper = PasteWrapper::new(channel, config, Some(store), callback).unwrap();
    wrapper.mount().await;

    source
        .insert_content(vec![ClipboardItem::new(
            MimeType::image_png(),
            PNG_MAGIC.to_vec(),
        )])
        .await;

    match recv_payload(&mut rx).await {
        Payload::FileImage(file_image) => {
            assert_eq!(file_image.uris().len(), 1);
            assert_eq!(file_image.mimes(), &[MimeType::image_png()]);
            assert_eq!(std::fs::read(&file_image.uris()[0]).unwrap(), PNG_MAGIC);
        }
        other => panic!("expected file-backed image payload, got {:?}", other),
    }
}

#[tokio::test]
async fn test_file_backed_conversion_failure_degrades_to_unsupported() {
    let dir = tempfile::tempdir().unwrap();
    let (channel, source) = push_channel();

    let (callback, mut rx) = collecting_callback();
    let config = PasteWrapperConfig {
        delivery: DeliveryMode::FileBacked,
        ..Default::default()
    };
    let store = Arc::new(FileTempStore::with_dir(dir.path()));
    let wrapper = PasteWrapper::new(channel, config, Some(store), callback).unwrap();
    wrapper.mount().await;

    source
        .insert_content(vec![ClipboardItem::new(
            MimeType::image_png(),
            b"garbage, not an image".to_vec(),
        )])
        .await;

    assert_eq!(recv_payload(&mut rx).await, Payload::Unsupported);
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_file_backed_mode_requires_a_temp_store() {
    let (channel, _source) = push_channel();
    let (callback, _rx) = collecting_callback();

    let result = PasteWrapper::new(
        channel,
        PasteWrapperConfig {
            delivery: DeliveryMode::FileBacked,
            ..Default::default()
        },
        None,
        callback,
    );
    assert!(result.is_err());
}
