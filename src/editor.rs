use fltk::{prelude::*, *};

use crate::content::{ContentLoader, ContentProvider, SelectionAccess};

const PAPER_COLOR: (u8, u8, u8) = (253, 251, 247);
const INK_COLOR: (u8, u8, u8) = (31, 41, 55);

/// The main writing surface: a word-wrapped FLTK text editor holding the
/// story body. All positions exposed here are byte offsets into the
/// buffer text, which is what the region resolver works with.
pub struct StoryEditor {
    editor: text::TextEditor,
    buffer: text::TextBuffer,
}

impl StoryEditor {
    pub fn new(x: i32, y: i32, w: i32, h: i32, text_size: i32) -> Self {
        let buffer = text::TextBuffer::default();
        let mut editor = text::TextEditor::new(x, y, w, h, None);

        editor.set_buffer(buffer.clone());
        editor.set_frame(enums::FrameType::FlatBox);
        editor.wrap_mode(text::WrapMode::AtBounds, 0);
        editor.set_text_font(enums::Font::Helvetica);
        editor.set_text_size(text_size);
        editor.set_text_color(enums::Color::from_rgb(
            INK_COLOR.0, INK_COLOR.1, INK_COLOR.2,
        ));
        editor.set_color(enums::Color::from_rgb(
            PAPER_COLOR.0, PAPER_COLOR.1, PAPER_COLOR.2,
        ));
        editor.set_cursor_color(enums::Color::from_rgb(79, 70, 229));

        StoryEditor { editor, buffer }
    }

    pub fn widget(&self) -> text::TextEditor {
        self.editor.clone()
    }

    pub fn widget_mut(&mut self) -> &mut text::TextEditor {
        &mut self.editor
    }

    /// Replace the whole document and move the caret to the start.
    pub fn set_content(&mut self, content: &str) {
        self.buffer.set_text(content);
        self.editor.set_insert_position(0);
        self.editor.scroll(0, 0);
    }

    pub fn get_content(&self) -> String {
        self.buffer.text()
    }

    /// Replace a byte range with new text. Out-of-range offsets are
    /// clamped, the document may have changed since they were captured.
    pub fn splice(&mut self, start: usize, end: usize, replacement: &str) {
        let len = self.buffer.length();
        let start = (start as i32).min(len).max(0);
        let end = (end as i32).min(len).max(start);

        self.buffer.replace(start, end, replacement);
        self.editor
            .set_insert_position(start + replacement.len() as i32);
    }

    /// Select a byte range and scroll it into view, used to mark the
    /// freshly rewritten span.
    pub fn select_range(&mut self, start: usize, end: usize) {
        let len = self.buffer.length();
        let start = (start as i32).min(len).max(0);
        let end = (end as i32).min(len).max(start);

        self.buffer.select(start, end);
        self.editor.set_insert_position(end);
        self.editor.show_insert_position();
    }

    pub fn set_text_size(&mut self, size: i32) {
        self.editor.set_text_size(size);
        self.editor.redraw();
    }

    /// Fires on user edits only, not on programmatic content changes.
    pub fn on_change(&mut self, mut f: impl FnMut() + 'static) {
        let mut w = self.editor.clone();
        w.set_trigger(enums::CallbackTrigger::Changed);
        w.set_callback(move |_| {
            f();
        });
    }
}

impl ContentProvider for StoryEditor {
    fn get_content(&self) -> String {
        self.get_content()
    }
}

impl ContentLoader for StoryEditor {
    fn set_content(&mut self, text: &str) {
        self.set_content(text);
    }
}

impl SelectionAccess for StoryEditor {
    fn caret_offset(&self) -> Option<usize> {
        let pos = self.editor.insert_position();
        if pos < 0 { None } else { Some(pos as usize) }
    }

    fn selection_range(&self) -> Option<(usize, usize)> {
        match self.buffer.selection_position() {
            Some((start, end)) if start < end => Some((start as usize, end as usize)),
            _ => None,
        }
    }
}
