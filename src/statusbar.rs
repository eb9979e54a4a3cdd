use fltk::{prelude::*, *};

use crate::story::TextStats;

/// Helper function to create a brighter version of a color
/// Increases each RGB component by a factor (clamped to 255)
fn brighten_color(color: enums::Color, factor: f32) -> enums::Color {
    let (r, g, b) = color.to_rgb();
    let new_r = ((r as f32 * factor).min(255.0)) as u8;
    let new_g = ((g as f32 * factor).min(255.0)) as u8;
    let new_b = ((b as f32 * factor).min(255.0)) as u8;
    enums::Color::from_rgb(new_r, new_g, new_b)
}

/// Status bar along the bottom of the window: word count and reading
/// time on the left, save state on the right. Clicking the save state
/// forces a save.
pub struct StatusBar {
    background: frame::Frame,
    // Left side: text statistics (display only)
    stats: frame::Frame,
    // Right side: save status (button for clicking)
    save_status: button::Button,
}

impl StatusBar {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        let bg_color = enums::Color::from_rgb(79, 70, 229); // Indigo
        let text_color = enums::Color::White;
        let hover_color = brighten_color(bg_color, 1.2); // 20% brighter

        let mut background = frame::Frame::new(x, y, w, h, None);
        background.set_frame(enums::FrameType::FlatBox);
        background.set_color(bg_color);

        let mut stats = frame::Frame::new(x + 5, y, w / 2 - 10, h, None);
        stats.set_frame(enums::FrameType::FlatBox);
        stats.set_align(enums::Align::Left | enums::Align::Inside);
        stats.set_label_size(app::font_size() - 1);
        stats.set_color(bg_color);
        stats.set_label_color(text_color);

        let mut save_status = button::Button::new(x + 5 + w / 2, y, w / 2 - 10, h, None);
        save_status.set_frame(enums::FrameType::FlatBox);
        save_status.set_align(enums::Align::Right | enums::Align::Inside);
        save_status.set_label_size(app::font_size() - 1);
        save_status.set_color(bg_color);
        save_status.set_label_color(text_color);
        save_status.set_tooltip("এখনই সেভ করতে ক্লিক করুন");

        // Hover effect for the save button
        let mut but2 = save_status.clone();
        save_status.handle(move |_, evt| match evt {
            enums::Event::Enter => {
                but2.set_color(hover_color);
                but2.redraw();
                true
            }
            enums::Event::Leave => {
                but2.set_color(bg_color);
                but2.redraw();
                true
            }
            _ => false,
        });

        StatusBar {
            background,
            stats,
            save_status,
        }
    }

    /// Update the word count, reading time and character count display
    pub fn set_stats(&mut self, stats: &TextStats) {
        self.stats.set_label(&format!(
            "{} শব্দ  •  {} মিনিট পড়া  •  {} অক্ষর",
            stats.words, stats.reading_minutes, stats.graphemes
        ));
    }

    /// Set the save status text (right side)
    pub fn set_status(&mut self, text: &str) {
        self.save_status.set_label(text);
    }

    /// Register a callback for when the save status is clicked
    pub fn on_save_click<F: FnMut() + 'static>(&mut self, mut cb: F) {
        self.save_status.set_callback(move |_| cb());
    }

    /// Resize the status bar and update child positions
    pub fn resize(&mut self, x: i32, y: i32, w: i32, h: i32) {
        self.background.resize(x, y, w, h);
        self.stats.resize(x + 5, y, w / 2 - 10, h);
        self.save_status.resize(x + 5 + w / 2, y, w / 2 - 10, h);
    }

    pub fn height(&self) -> i32 {
        self.background.height()
    }
}
