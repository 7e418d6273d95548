//! Full-pipeline test: builder wiring, manual-trigger paste flow,
//! on-demand reads, and temp artifact cleanup.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use paste_input::{
    ClipboardContent, ClipboardItem, ClipboardReaderPort, ManualTriggerPasteSource, MimeType,
    PasteCallback, PasteInput, PasteWrapperConfig, Payload,
};
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
        self.read()
    }
}

#[tokio::test]
async fn test_manual_trigger_paste_reaches_the_consumer() {
    let reader = Arc::new(SettableReader::new());
    let source = Arc::new(ManualTriggerPasteSource::new());
    let temp_dir = tempfile::tempdir().unwrap();

    let input = PasteInput::builder()
        .with_reader(reader.clone())
        .with_source(source.clone())
        .with_temp_store(Arc::new(paste_input::FileTempStore::with_dir(
            temp_dir.path(),
        )))
        .build()
        .unwrap();

    let (tx, mut rx) = mpsc::unbounded_channel();
    let callback: PasteCallback = Arc::new(move |payload| {
        let _ = tx.send(payload);
    });

    let wrapper = input.wrapper(PasteWrapperConfig::default(), callback).unwrap();
    wrapper.mount().await;

    reader.set(ClipboardContent::new(vec![ClipboardItem::text("pasted")]));
    source.trigger().await;

    let payload = timeout(Duration::from_secs(1), rx.recv())
        .await
        .expect("timed out waiting for delivery")
        .expect("callback channel closed");
    assert_eq!(payload, Payload::new_text("pasted"));

    // On-demand read, independent of the event stream.
    reader.set(ClipboardContent::new(vec![ClipboardItem::new(
        MimeType::image_png(),
        PNG_MAGIC.to_vec(),
    )]));
    assert!(input.channel().get_current_payload().is_image());

    assert!(!input.platform_version_string().is_empty());
}

#[tokio::test]
async fn test_clear_temporary_artifacts_reports_removals() {
    let temp_dir = tempfile::tempdir().unwrap();
    let store = Arc::new(paste_input::FileTempStore::with_dir(temp_dir.path()));

    let input = PasteInput::builder()
        .with_reader(Arc::new(SettableReader::new()))
        .with_source(Arc::new(ManualTriggerPasteSource::new()))
        .with_temp_store(store.clone())
        .build()
        .unwrap();

    use paste_input::TempStorePort;
    store
        .write_image(PNG_MAGIC, &MimeType::image_png())
        .await
        .unwrap();

    assert_eq!(input.clear_temporary_artifacts().await, 1);
    assert_eq!(input.clear_temporary_artifacts().await, 0);
}
