use std::path::PathBuf;

use anyhow::Result;
use clipboard_rs::{common::RustImage, Clipboard, ContentFormat};
use pi_core::clipboard::{ClipboardContent, ClipboardItem, MimeType};

/// Shared read logic over a `clipboard-rs` context. The per-OS reader types
/// only differ in how the context is constructed.
///
/// Every item-level failure is swallowed (fail closed): a locked clipboard
/// or an unreadable format yields fewer items, in the worst case an empty
/// snapshot, never an error the caller has to handle.
pub struct CommonReaderImpl;

impl CommonReaderImpl {
    pub fn read_content(ctx: &mut clipboard_rs::ClipboardContext) -> Result<ClipboardContent> {
        let mut items = Vec::new();

        if ctx.has(ContentFormat::Image) {
            if let Ok(img) = ctx.get_image() {
                match img.to_png() {
                    Ok(png) => items.push(ClipboardItem::new(
                        MimeType::image_png(),
                        png.get_bytes().to_vec(),
                    )),
                    Err(err) => log::warn!("clipboard image could not be encoded: {}", err),
                }
            }
        }

        if ctx.has(ContentFormat::Text) {
            if let Ok(text) = ctx.get_text() {
                items.push(ClipboardItem::text(text));
            }
        }

        // File-manager copies of image files arrive as a uri-list rather
        // than inline image data; surface them as image items so they
        // classify the same way.
        if !items.iter().any(|item| item.mime.is_image()) && ctx.has(ContentFormat::Files) {
            if let Ok(files) = ctx.get_files() {
                items.extend(resolve_image_uris(&files));
            }
        }

        Ok(ClipboardContent::new(items))
    }

    /// Text-only fallback used when the full read path fails.
    pub fn read_text_content(ctx: &mut clipboard_rs::ClipboardContext) -> Result<ClipboardContent> {
        let mut items = Vec::new();

        if ctx.has(ContentFormat::Text) {
            if let Ok(text) = ctx.get_text() {
                items.push(ClipboardItem::text(text));
            }
        }

        Ok(ClipboardContent::new(items))
    }
}

fn resolve_image_uris(files: &[String]) -> Vec<ClipboardItem> {
    let mut items = Vec::new();

    for raw in files {
        let Some(path) = file_uri_to_path(raw) else {
            continue;
        };
        let Some(mime) = path
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(MimeType::from_extension)
        else {
            continue;
        };

        match std::fs::read(&path) {
            Ok(bytes) => items.push(ClipboardItem::new(mime, bytes)),
            Err(err) => {
                log::warn!("failed to read copied file {}: {}", path.display(), err);
            }
        }
    }

    items
}

fn file_uri_to_path(raw: &str) -> Option<PathBuf> {
    let stripped = raw.strip_prefix("file://").unwrap_or(raw);
    let decoded = urlencoding::decode(stripped).ok()?;
    Some(PathBuf::from(decoded.into_owned()))
}
