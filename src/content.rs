// Common content access traits so the rewrite pipeline, autosave and the
// exporters can work against any text surface, not just the FLTK editor.

/// Provides read access to the current document text.
///
/// Implementations should return exactly what would be saved to disk.
pub trait ContentProvider {
    fn get_content(&self) -> String;
}

/// Provides a unified way to load a full document into an editing surface.
pub trait ContentLoader {
    fn set_content(&mut self, text: &str);
}

/// Exposes the caret and selection of an editing surface as byte offsets
/// into the text returned by [`ContentProvider::get_content`].
pub trait SelectionAccess {
    /// Byte offset of the caret, or None when the surface has no caret.
    fn caret_offset(&self) -> Option<usize>;

    /// Half-open byte range of the active selection, or None when nothing
    /// is selected. A zero-width range counts as no selection.
    fn selection_range(&self) -> Option<(usize, usize)>;
}

impl<T: ContentProvider> ContentProvider for &T {
    fn get_content(&self) -> String {
        (*self).get_content()
    }
}

impl<T: SelectionAccess> SelectionAccess for &T {
    fn caret_offset(&self) -> Option<usize> {
        (*self).caret_offset()
    }

    fn selection_range(&self) -> Option<(usize, usize)> {
        (*self).selection_range()
    }
}
