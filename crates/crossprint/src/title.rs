//! Scoped override of the host document title

use crate::host::PrintHost;

/// Overrides the host title for as long as the guard lives.
///
/// The previous title is put back when the guard is dropped, which covers
/// early returns and unwinding alike.
pub struct TitleGuard<'a, H: PrintHost + ?Sized> {
    host: &'a H,
    saved: Option<String>,
}

impl<'a, H: PrintHost + ?Sized> TitleGuard<'a, H> {
    /// Replace the host title with `title`. With `None` the title is left
    /// alone and dropping the guard does nothing.
    pub fn swap(host: &'a H, title: Option<&str>) -> Self {
        let saved = title.map(|title| {
            let saved = host.document_title();
            host.set_document_title(title);
            saved
        });
        Self { host, saved }
    }

    /// Title that will be restored, if the guard changed anything
    pub fn saved(&self) -> Option<&str> {
        self.saved.as_deref()
    }
}

impl<H: PrintHost + ?Sized> Drop for TitleGuard<'_, H> {
    fn drop(&mut self) {
        if let Some(saved) = self.saved.take() {
            self.host.set_document_title(&saved);
        }
    }
}
