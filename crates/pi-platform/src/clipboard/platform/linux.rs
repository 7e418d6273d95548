use super::super::common::CommonReaderImpl;
use anyhow::{anyhow, Result};
use clipboard_rs::{ClipboardContext, ClipboardContextX11Options};
use pi_core::clipboard::ClipboardContent;
use pi_core::ports::ClipboardReaderPort;
use std::sync::{Arc, Mutex};

pub struct LinuxClipboardReader {
    inner: Arc<Mutex<ClipboardContext>>,
}

impl LinuxClipboardReader {
    pub fn new() -> Result<Self> {
        let context =
            ClipboardContext::new_with_options(ClipboardContextX11Options { read_timeout: None })
                .map_err(|e| anyhow!(e))?;
        Ok(Self {
            inner: Arc::new(Mutex::new(context)),
        })
    }
}

impl ClipboardReaderPort for LinuxClipboardReader {
    fn read(&self) -> Result<ClipboardContent> {
        let mut ctx = self.inner.lock().unwrap();
        CommonReaderImpl::read_content(&mut ctx)
    }

    fn read_text(&self) -> Result<ClipboardContent> {
        let mut ctx = self.inner.lock().unwrap();
        CommonReaderImpl::read_text_content(&mut ctx)
    }
}
