use fltk::{prelude::*, *};

use crate::story::{DEFAULT_TONE, StoryGenre, StoryLength, StoryParams};

const ACCENT_COLOR: (u8, u8, u8) = (79, 70, 229);
const LABEL_COLOR: (u8, u8, u8) = (107, 114, 128);

/// Left-hand panel with the generation controls: genre, length, tone,
/// the plot prompt and the generate button.
pub struct GeneratePanel {
    group: group::Group,
    genre: menu::Choice,
    length: menu::Choice,
    tone: input::Input,
    plot: input::MultilineInput,
    generate: button::Button,
}

impl GeneratePanel {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        let mut group = group::Group::new(x, y, w, h, None);
        group.set_frame(enums::FrameType::FlatBox);
        group.set_color(enums::Color::White);

        let pad = 14;
        let field_w = w - 2 * pad;

        let mut header = frame::Frame::new(x + pad, y + 10, field_w, 30, Some("বাংলা লেখক AI"));
        header.set_align(enums::Align::Left | enums::Align::Inside);
        header.set_label_font(enums::Font::HelveticaBold);
        header.set_label_size(20);
        header.set_label_color(enums::Color::from_rgb(
            ACCENT_COLOR.0,
            ACCENT_COLOR.1,
            ACCENT_COLOR.2,
        ));

        let mut subtitle = frame::Frame::new(
            x + pad,
            y + 38,
            field_w,
            18,
            Some("আপনার গল্পের স্টুডিও"),
        );
        subtitle.set_align(enums::Align::Left | enums::Align::Inside);
        subtitle.set_label_size(11);
        subtitle.set_label_color(label_color());

        make_label(x + pad, y + 66, field_w, "ধরন (Genre)");
        let mut genre = menu::Choice::new(x + pad, y + 86, field_w, 26, None);
        for g in StoryGenre::ALL {
            // Escape the submenu separator in labels like "প্রাপ্তবয়স্ক / ১৮+"
            genre.add_choice(&g.label().replace('/', "\\/"));
        }
        genre.set_value(0);

        make_label(x + pad, y + 122, field_w, "দৈর্ঘ্য (Length)");
        let mut length = menu::Choice::new(x + pad, y + 142, field_w, 26, None);
        for l in StoryLength::ALL {
            length.add_choice(l.label());
        }
        length.set_value(1);

        make_label(x + pad, y + 178, field_w, "আবহ (Tone)");
        let mut tone = input::Input::new(x + pad, y + 198, field_w, 26, None);
        tone.set_value(DEFAULT_TONE);

        make_label(x + pad, y + 234, field_w, "গল্পের প্লট / মূল ভাবনা");
        let plot_h = (h - 234 - 20 - 46 - 16).max(60);
        let mut plot = input::MultilineInput::new(x + pad, y + 254, field_w, plot_h, None);
        plot.set_wrap(true);

        let mut generate =
            button::Button::new(x + pad, y + h - 46, field_w, 34, Some("গল্প তৈরি করুন"));
        generate.set_color(enums::Color::from_rgb(
            ACCENT_COLOR.0,
            ACCENT_COLOR.1,
            ACCENT_COLOR.2,
        ));
        generate.set_label_color(enums::Color::White);
        generate.set_frame(enums::FrameType::FlatBox);

        group.end();

        GeneratePanel {
            group,
            genre,
            length,
            tone,
            plot,
            generate,
        }
    }

    pub fn params(&self) -> StoryParams {
        let genre = usize::try_from(self.genre.value())
            .ok()
            .and_then(|i| StoryGenre::ALL.get(i).copied())
            .unwrap_or_default();
        let length = usize::try_from(self.length.value())
            .ok()
            .and_then(|i| StoryLength::ALL.get(i).copied())
            .unwrap_or_default();

        StoryParams {
            prompt: self.plot.value(),
            genre,
            length,
            tone: self.tone.value(),
        }
    }

    pub fn clear_plot(&mut self) {
        self.plot.set_value("");
    }

    /// Disable the button while a generation request is in flight.
    pub fn set_busy(&mut self, busy: bool) {
        if busy {
            self.generate.set_label("তৈরি হচ্ছে...");
            self.generate.deactivate();
        } else {
            self.generate.set_label("গল্প তৈরি করুন");
            self.generate.activate();
        }
    }

    pub fn on_generate<F: FnMut() + 'static>(&mut self, mut cb: F) {
        self.generate.set_callback(move |_| cb());
    }

    pub fn resize(&mut self, x: i32, y: i32, w: i32, h: i32) {
        self.group.resize(x, y, w, h);
    }
}

fn make_label(x: i32, y: i32, w: i32, text: &str) -> frame::Frame {
    let mut label = frame::Frame::new(x, y, w, 18, None);
    label.set_label(text);
    label.set_align(enums::Align::Left | enums::Align::Inside);
    label.set_label_size(12);
    label.set_label_color(label_color());
    label
}

fn label_color() -> enums::Color {
    enums::Color::from_rgb(LABEL_COLOR.0, LABEL_COLOR.1, LABEL_COLOR.2)
}
