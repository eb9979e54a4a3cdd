use fltk::{prelude::*, *};

use crate::region::TargetMode;
use crate::story::{Intensity, QUICK_FEEDBACKS};

/// Strip under the editor with the rewrite controls: target mode,
/// intensity, free-form instruction, optional keywords and the quick
/// feedback buttons.
pub struct RefinePanel {
    group: group::Group,
    mode_label: frame::Frame,
    target: menu::Choice,
    intensity: menu::Choice,
    keywords: input::Input,
    instruction: input::Input,
    rewrite: button::Button,
    quick_buttons: Vec<button::Button>,
}

pub const PANEL_HEIGHT: i32 = 108;

impl RefinePanel {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        let mut group = group::Group::new(x, y, w, h, None);
        group.set_frame(enums::FrameType::FlatBox);
        group.set_color(enums::Color::from_rgb(243, 244, 246));

        let pad = 10;

        let mut mode_label =
            frame::Frame::new(x + pad, y + 6, 200, 20, Some("এআই পরিমার্জন"));
        mode_label.set_align(enums::Align::Left | enums::Align::Inside);
        mode_label.set_label_size(12);
        mode_label.set_label_font(enums::Font::HelveticaBold);
        mode_label.set_label_color(enums::Color::from_rgb(79, 70, 229));

        // Quick feedback buttons fill the rest of the top row
        let quick_x = x + pad + 205;
        let quick_w = ((w - pad - 205 - pad) / QUICK_FEEDBACKS.len() as i32).max(60);
        let mut quick_buttons = Vec::new();
        for (i, (label, _)) in QUICK_FEEDBACKS.iter().enumerate() {
            let mut button = button::Button::new(
                quick_x + i as i32 * quick_w,
                y + 4,
                quick_w - 4,
                24,
                Some(*label),
            );
            button.set_label_size(11);
            button.set_frame(enums::FrameType::RoundedBox);
            button.set_color(enums::Color::White);
            quick_buttons.push(button);
        }

        let mut target = menu::Choice::new(x + pad, y + 36, 150, 26, None);
        target.add_choice("সিলেকশন");
        target.add_choice("প্যারাগ্রাফ");
        target.add_choice("সম্পূর্ণ লেখা");
        target.set_value(0);
        target.set_tooltip("কোন অংশ পরিবর্তন হবে");

        let mut intensity = menu::Choice::new(x + pad + 160, y + 36, 150, 26, None);
        for level in Intensity::ALL {
            intensity.add_choice(level.label());
        }
        intensity.set_value(0);
        intensity.set_tooltip("পরিবর্তনের মাত্রা");

        let mut keywords =
            input::Input::new(x + pad + 320, y + 36, w - pad - 320 - pad, 26, None);
        keywords.set_tooltip("কীওয়ার্ড (ঐচ্ছিক), কমা দিয়ে আলাদা করুন");

        let mut instruction =
            input::Input::new(x + pad, y + 70, w - pad - 150 - pad, 30, None);
        instruction.set_tooltip("কী পরিবর্তন চান লিখুন");

        let mut rewrite =
            button::Button::new(x + w - pad - 140, y + 70, 140, 30, Some("পরিবর্তন করুন"));
        rewrite.set_color(enums::Color::from_rgb(79, 70, 229));
        rewrite.set_label_color(enums::Color::White);
        rewrite.set_frame(enums::FrameType::FlatBox);

        group.end();

        RefinePanel {
            group,
            mode_label,
            target,
            intensity,
            keywords,
            instruction,
            rewrite,
            quick_buttons,
        }
    }

    pub fn target_mode(&self) -> TargetMode {
        match self.target.value() {
            1 => TargetMode::Paragraph,
            2 => TargetMode::All,
            _ => TargetMode::Selection,
        }
    }

    pub fn intensity(&self) -> Intensity {
        match self.intensity.value() {
            1 => Intensity::Major,
            _ => Intensity::Slight,
        }
    }

    pub fn instruction(&self) -> String {
        self.instruction.value()
    }

    pub fn set_instruction(&mut self, text: &str) {
        self.instruction.set_value(text);
    }

    pub fn keywords(&self) -> String {
        self.keywords.value()
    }

    pub fn clear_instruction(&mut self) {
        self.instruction.set_value("");
    }

    /// Disable the button while a rewrite request is in flight.
    pub fn set_busy(&mut self, busy: bool) {
        if busy {
            self.rewrite.set_label("পরিবর্তন হচ্ছে...");
            self.rewrite.deactivate();
        } else {
            self.rewrite.set_label("পরিবর্তন করুন");
            self.rewrite.activate();
        }
    }

    /// Show whether the next rewrite continues an earlier one.
    pub fn set_iterative(&mut self, iterative: bool) {
        if iterative {
            self.mode_label.set_label("পুনরায় পরিমার্জন চলছে");
        } else {
            self.mode_label.set_label("এআই পরিমার্জন");
        }
        self.mode_label.redraw();
    }

    /// Wires both the rewrite button and Enter in the instruction field.
    pub fn on_rewrite<F: FnMut() + Clone + 'static>(&mut self, mut cb: F) {
        let mut submit = cb.clone();
        self.instruction.set_trigger(enums::CallbackTrigger::EnterKey);
        self.instruction.set_callback(move |_| submit());
        self.rewrite.set_callback(move |_| cb());
    }

    /// Register a callback fired with the preset instruction text when a
    /// quick feedback button is pressed.
    pub fn on_quick_feedback<F: FnMut(&'static str) + Clone + 'static>(&mut self, cb: F) {
        for (button, (_, value)) in self.quick_buttons.iter_mut().zip(QUICK_FEEDBACKS.iter()) {
            let mut cb = cb.clone();
            let value = *value;
            button.set_callback(move |_| cb(value));
        }
    }

    pub fn resize(&mut self, x: i32, y: i32, w: i32, h: i32) {
        self.group.resize(x, y, w, h);
    }
}
