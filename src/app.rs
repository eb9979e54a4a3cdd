// Central controller: every widget callback and worker thread sends an
// AppAction through one channel, and `App::handle` runs on the UI thread
// as the single place that mutates state. Model requests run on worker
// threads and report back with the epoch they were started under, so
// results that arrive after the editor was cleared are dropped.

use fltk::{app, button, dialog, input, prelude::*, window};
use std::sync::Arc;
use std::thread;
use tracing::{debug, info, warn};

use crate::autosave::{AUTOSAVE_DEBOUNCE, AutoSaveState};
use crate::config::WindowState;
use crate::draft::{Draft, DraftStore};
use crate::editor::StoryEditor;
use crate::export;
use crate::history::EditHistory;
use crate::refine::RefinePanel;
use crate::region::{self, Region, RegionError, ResolvedTarget};
use crate::requests::RequestState;
use crate::service::{ServiceError, StoryService};
use crate::sidebar::GeneratePanel;
use crate::statusbar::StatusBar;
use crate::story::{self, RewriteParams};

const MIN_TEXT_SIZE: i32 = 10;
const MAX_TEXT_SIZE: i32 = 32;

pub const SIDEBAR_WIDTH: i32 = 320;
pub const TITLE_BAR_HEIGHT: i32 = 56;
pub const STATUS_HEIGHT: i32 = 28;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    Print,
    Word,
    Text,
}

/// Everything that can happen in the app. Widget callbacks, menu items,
/// timers and worker threads all send these.
pub enum AppAction {
    Generate,
    Rewrite,
    QuickRewrite(&'static str),
    GenerateDone {
        epoch: u64,
        result: Result<String, ServiceError>,
    },
    RewriteDone {
        epoch: u64,
        region: Region,
        result: Result<String, ServiceError>,
    },
    Undo,
    Redo,
    SaveDraft,
    AutosaveTick,
    EditorChanged,
    TitleChanged,
    Export(ExportKind),
    ClearStory,
    TextSizeUp,
    TextSizeDown,
    Relayout,
    Quit,
}

/// The assembled main window widgets, built in main and handed to [`App`].
pub struct Ui {
    pub window: window::Window,
    pub sidebar: GeneratePanel,
    pub title: input::Input,
    pub save_button: button::Button,
    pub undo_button: button::Button,
    pub redo_button: button::Button,
    pub print_button: button::Button,
    pub word_button: button::Button,
    pub text_button: button::Button,
    pub clear_button: button::Button,
    pub editor: StoryEditor,
    pub refine: RefinePanel,
    pub statusbar: StatusBar,
}

pub struct App {
    ui: Ui,
    store: DraftStore,
    service: Arc<dyn StoryService>,
    sender: app::Sender<AppAction>,
    history: EditHistory,
    autosave: AutoSaveState,
    /// Next rewrite continues an earlier one
    iterative: bool,
    requests: RequestState,
    text_size: i32,
}

impl App {
    pub fn new(
        mut ui: Ui,
        store: DraftStore,
        service: Arc<dyn StoryService>,
        sender: app::Sender<AppAction>,
        draft: Draft,
        text_size: i32,
    ) -> Self {
        ui.title.set_value(&draft.title);
        ui.editor.set_content(&draft.content);

        let mut autosave = AutoSaveState::new();
        autosave.reset(&draft.title, &draft.content);

        let mut app = App {
            ui,
            store,
            service,
            sender,
            history: EditHistory::new(draft.content),
            autosave,
            iterative: false,
            requests: RequestState::new(),
            text_size,
        };
        app.relayout();
        app.refresh();
        app
    }

    pub fn handle(&mut self, action: AppAction) {
        match action {
            AppAction::Generate => self.start_generate(),
            AppAction::Rewrite => self.start_rewrite(None),
            AppAction::QuickRewrite(instruction) => self.start_rewrite(Some(instruction)),
            AppAction::GenerateDone { epoch, result } => self.finish_generate(epoch, result),
            AppAction::RewriteDone {
                epoch,
                region,
                result,
            } => self.finish_rewrite(epoch, region, result),
            AppAction::Undo => self.undo(),
            AppAction::Redo => self.redo(),
            AppAction::SaveDraft => {
                if self.save_now() {
                    self.autosave.flash_saved();
                }
                self.update_save_status();
            }
            AppAction::AutosaveTick => {
                if self.autosave.should_autosave(AUTOSAVE_DEBOUNCE) {
                    self.save_now();
                }
                self.update_save_status();
            }
            AppAction::EditorChanged => {
                self.iterative = false;
                self.ui.refine.set_iterative(false);
                self.autosave.mark_changed();
                self.refresh();
            }
            AppAction::TitleChanged => {
                self.autosave.mark_changed();
                self.update_save_status();
            }
            AppAction::Export(kind) => self.export(kind),
            AppAction::ClearStory => self.clear_story(),
            AppAction::TextSizeUp => self.adjust_text_size(1),
            AppAction::TextSizeDown => self.adjust_text_size(-1),
            AppAction::Relayout => self.relayout(),
            AppAction::Quit => self.quit(),
        }
    }

    fn start_generate(&mut self) {
        let params = self.ui.sidebar.params();
        if params.prompt.trim().is_empty() {
            dialog::alert_default("অনুগ্রহ করে গল্পের প্লট বা মূল ভাবনা লিখুন।");
            return;
        }
        if self.requests.generating() {
            return;
        }

        self.iterative = false;
        self.ui.refine.set_iterative(false);
        self.ui.sidebar.set_busy(true);

        info!(genre = ?params.genre, length = ?params.length, "dispatching generation request");

        let service = Arc::clone(&self.service);
        let sender = self.sender;
        let epoch = self.requests.begin_generate();
        thread::spawn(move || {
            let result = service.generate(&params);
            sender.send(AppAction::GenerateDone { epoch, result });
        });
    }

    fn finish_generate(&mut self, epoch: u64, result: Result<String, ServiceError>) {
        let fresh = self.requests.finish_generate(epoch);
        self.ui.sidebar.set_busy(false);

        if !fresh {
            debug!("dropping generation result from a cleared session");
            return;
        }

        match result {
            Ok(raw) => {
                info!(chars = raw.len(), "generation finished");
                self.apply_generated(&raw);
            }
            Err(err) => {
                warn!(error = %err, "generation failed");
                dialog::alert_default("দুঃখিত, কোনো সমস্যা হয়েছে। আবার চেষ্টা করুন।");
            }
        }
    }

    fn apply_generated(&mut self, raw: &str) {
        let (title, body) = story::split_title(raw);
        if let Some(title) = title {
            self.ui.title.set_value(&title);
        }
        self.ui.editor.set_content(&body);
        self.history.push(body);
        self.autosave.mark_changed();
        self.refresh();
    }

    fn start_rewrite(&mut self, instruction_override: Option<&str>) {
        let instruction = match instruction_override {
            Some(preset) => {
                self.ui.refine.set_instruction(preset);
                preset.to_string()
            }
            None => self.ui.refine.instruction(),
        };
        if instruction.trim().is_empty() {
            dialog::alert_default("অনুগ্রহ করে নির্দেশনা লিখুন বা একটি প্রিসেট বেছে নিন।");
            return;
        }
        let content = self.ui.editor.get_content();
        if content.is_empty() || self.requests.rewriting() {
            return;
        }

        let mode = self.ui.refine.target_mode();
        let region = match region::resolve(&self.ui.editor, &content, mode) {
            Ok(region) => region,
            Err(RegionError::EmptySelection) => {
                dialog::alert_default("অনুগ্রহ করে কিছু টেক্সট সিলেক্ট করুন।");
                return;
            }
            Err(RegionError::ParagraphNotFound) => {
                dialog::alert_default("প্যারাগ্রাফ নির্বাচন করতে ব্যর্থ।");
                return;
            }
        };

        let params = RewriteParams {
            source: region.text.clone(),
            instruction,
            intensity: self.ui.refine.intensity(),
            keywords: self.ui.refine.keywords(),
            iterative: self.iterative,
        };

        self.ui.refine.set_busy(true);

        info!(target = ?mode, intensity = ?params.intensity, iterative = params.iterative, "dispatching rewrite request");

        let service = Arc::clone(&self.service);
        let sender = self.sender;
        let epoch = self.requests.begin_rewrite();
        thread::spawn(move || {
            let result = service.rewrite(&params);
            sender.send(AppAction::RewriteDone {
                epoch,
                region,
                result,
            });
        });
    }

    fn finish_rewrite(&mut self, epoch: u64, region: Region, result: Result<String, ServiceError>) {
        let fresh = self.requests.finish_rewrite(epoch);
        self.ui.refine.set_busy(false);

        if !fresh {
            debug!("dropping rewrite result from a cleared session");
            return;
        }

        match result {
            Ok(new_text) => self.apply_rewrite(region, new_text),
            Err(err) => {
                warn!(error = %err, "rewrite failed");
                dialog::alert_default("পরিবর্তন করতে ব্যর্থ হয়েছে।");
            }
        }
    }

    fn apply_rewrite(&mut self, region: Region, new_text: String) {
        let updated = match region.target {
            ResolvedTarget::Selection { start, end } => {
                self.ui.editor.splice(start, end, &new_text);
                self.ui.editor.select_range(start, start + new_text.len());
                self.ui.editor.get_content()
            }
            ResolvedTarget::Paragraph { index, paragraphs } => {
                let joined = region::reassemble(&paragraphs, index, &new_text);
                self.ui.editor.set_content(&joined);
                joined
            }
            ResolvedTarget::Whole => {
                self.ui.editor.set_content(&new_text);
                new_text
            }
        };

        self.history.push(updated);
        self.autosave.mark_changed();
        self.ui.refine.clear_instruction();
        self.iterative = true;
        self.ui.refine.set_iterative(true);
        self.refresh();
    }

    fn undo(&mut self) {
        if let Some(text) = self.history.undo() {
            let text = text.to_string();
            self.ui.editor.set_content(&text);
            self.autosave.mark_changed();
            self.refresh();
        }
    }

    fn redo(&mut self) {
        if let Some(text) = self.history.redo() {
            let text = text.to_string();
            self.ui.editor.set_content(&text);
            self.autosave.mark_changed();
            self.refresh();
        }
    }

    fn save_now(&mut self) -> bool {
        let title = self.ui.title.value();
        match self.autosave.trigger_save(&title, &self.ui.editor, &self.store) {
            Ok(()) => true,
            Err(err) => {
                warn!(error = %err, "draft save failed");
                self.ui.statusbar.set_status("সেভ ব্যর্থ হয়েছে");
                false
            }
        }
    }

    fn export(&mut self, kind: ExportKind) {
        let title = self.ui.title.value();
        let content = self.ui.editor.get_content();

        let outcome = match kind {
            ExportKind::Print => {
                let path = std::env::temp_dir().join("lekhak_print.html");
                export::write_export(&path, export::print_html(&title, &content).as_bytes())
                    .and_then(|_| export::open_in_default_app(&path))
            }
            ExportKind::Word => {
                match choose_save_path(&export::export_file_name(&title, "doc")) {
                    Some(path) => {
                        export::write_export(&path, &export::word_doc_bytes(&title, &content))
                    }
                    None => return,
                }
            }
            ExportKind::Text => {
                match choose_save_path(&export::export_file_name(&title, "txt")) {
                    Some(path) => export::write_export(
                        &path,
                        export::plain_text(&title, &content).as_bytes(),
                    ),
                    None => return,
                }
            }
        };

        match outcome {
            Ok(()) => info!(kind = ?kind, "export finished"),
            Err(err) => {
                warn!(error = %err, "export failed");
                dialog::alert_default("এক্সপোর্ট ব্যর্থ হয়েছে।");
            }
        }
    }

    fn clear_story(&mut self) {
        let choice = dialog::choice2_default(
            "আপনি কি লেখাগুলো মুছে ফেলতে চান? এটি পুনরায় ফিরে পাওয়া সম্ভব নয়।",
            "বাতিল",
            "মুছে ফেলুন",
            "",
        );
        if choice != Some(1) {
            return;
        }

        // In-flight responses belong to the old session now
        self.requests.invalidate();

        self.ui.title.set_value("");
        self.ui.editor.set_content("");
        self.ui.sidebar.clear_plot();
        self.iterative = false;
        self.ui.refine.set_iterative(false);
        self.history.push(String::new());

        if let Err(err) = self.store.clear() {
            warn!(error = %err, "could not delete the saved draft");
        }
        self.autosave.reset("", "");
        self.refresh();
        info!("editor cleared");
    }

    fn adjust_text_size(&mut self, delta: i32) {
        self.text_size = (self.text_size + delta * 2).clamp(MIN_TEXT_SIZE, MAX_TEXT_SIZE);
        self.ui.editor.set_text_size(self.text_size);
    }

    /// Repositions every panel from the current window size. The fixed
    /// pieces keep their sizes and the editor takes whatever is left.
    fn relayout(&mut self) {
        let win_w = self.ui.window.w();
        let win_h = self.ui.window.h();
        let menu_h = if cfg!(target_os = "macos") {
            0
        } else {
            crate::menu::MENU_HEIGHT
        };

        let body_h = win_h - menu_h - STATUS_HEIGHT;
        let content_x = SIDEBAR_WIDTH;
        let content_w = win_w - SIDEBAR_WIDTH;
        let editor_y = menu_h + TITLE_BAR_HEIGHT;
        let editor_h = body_h - TITLE_BAR_HEIGHT - crate::refine::PANEL_HEIGHT;

        self.ui.sidebar.resize(0, menu_h, SIDEBAR_WIDTH, body_h);

        let toolbar_y = menu_h + 10;
        let mut x = win_w - 16;
        let mut place = |button: &mut button::Button, w: i32| {
            x -= w;
            button.resize(x, toolbar_y, w, 36);
            x -= 6;
        };
        place(&mut self.ui.clear_button, 60);
        place(&mut self.ui.text_button, 48);
        place(&mut self.ui.word_button, 56);
        place(&mut self.ui.print_button, 48);
        place(&mut self.ui.redo_button, 40);
        place(&mut self.ui.undo_button, 40);
        place(&mut self.ui.save_button, 56);
        let title_w = (x - content_x - 26).max(120);
        self.ui.title.resize(content_x + 16, toolbar_y, title_w, 36);
        self.ui
            .editor
            .widget_mut()
            .resize(content_x, editor_y, content_w, editor_h);
        self.ui.refine.resize(
            content_x,
            editor_y + editor_h,
            content_w,
            crate::refine::PANEL_HEIGHT,
        );
        self.ui
            .statusbar
            .resize(0, win_h - STATUS_HEIGHT, win_w, STATUS_HEIGHT);
        self.ui.window.redraw();
    }

    fn quit(&mut self) {
        self.save_now();

        if let Some(path) = WindowState::state_file_path() {
            let state = WindowState {
                x: self.ui.window.x(),
                y: self.ui.window.y(),
                width: self.ui.window.w(),
                height: self.ui.window.h(),
                text_size: self.text_size,
            };
            if let Err(err) = state.save(&path) {
                warn!(error = %err, "could not save window state");
            }
        }

        app::quit();
    }

    fn refresh(&mut self) {
        let stats = story::text_stats(&self.ui.editor.get_content());
        self.ui.statusbar.set_stats(&stats);
        set_active(&mut self.ui.undo_button, self.history.can_undo());
        set_active(&mut self.ui.redo_button, self.history.can_redo());
        self.update_save_status();
    }

    fn update_save_status(&mut self) {
        self.ui.statusbar.set_status(&self.autosave.status_text());
    }
}

fn set_active(button: &mut button::Button, active: bool) {
    if active {
        button.activate();
    } else {
        button.deactivate();
    }
}

fn choose_save_path(preset: &str) -> Option<std::path::PathBuf> {
    let mut chooser = dialog::FileDialog::new(dialog::FileDialogType::BrowseSaveFile);
    chooser.set_option(dialog::FileDialogOptions::SaveAsConfirm);
    chooser.set_preset_file(preset);
    chooser.show();

    let path = chooser.filename();
    if path.as_os_str().is_empty() {
        None
    } else {
        Some(path)
    }
}
