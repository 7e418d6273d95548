use super::super::common::CommonReaderImpl;
use anyhow::{anyhow, Result};
use clipboard_rs::ClipboardContext;
use pi_core::clipboard::ClipboardContent;
use pi_core::ports::ClipboardReaderPort;
use std::sync::{Arc, Mutex};

pub struct MacOSClipboardReader {
    inner: Arc<Mutex<ClipboardContext>>,
}

impl MacOSClipboardReader {
    pub fn new() -> Result<Self> {
        let context = ClipboardContext::new().map_err(|e| anyhow!(e))?;
        Ok(Self {
            inner: Arc::new(Mutex::new(context)),
        })
    }
}

impl ClipboardReaderPort for MacOSClipboardReader {
    fn read(&self) -> Result<ClipboardContent> {
        let mut ctx = self.inner.lock().unwrap();
        CommonReaderImpl::read_content(&mut ctx)
    }

    fn read_text(&self) -> Result<ClipboardContent> {
        let mut ctx = self.inner.lock().unwrap();
        CommonReaderImpl::read_text_content(&mut ctx)
    }
}
