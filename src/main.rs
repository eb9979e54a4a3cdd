use clap::Parser;
use fltk::{app, button, enums, input, prelude::*, window};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use lekhak::app::{App, AppAction, ExportKind, SIDEBAR_WIDTH, STATUS_HEIGHT, TITLE_BAR_HEIGHT, Ui};
use lekhak::config::{AppConfig, WindowState};
use lekhak::draft::DraftStore;
use lekhak::editor::StoryEditor;
use lekhak::menu;
use lekhak::refine::{PANEL_HEIGHT, RefinePanel};
use lekhak::service::{GeminiClient, StoryService};
use lekhak::sidebar::GeneratePanel;
use lekhak::statusbar::StatusBar;

#[derive(Parser, Debug)]
#[command(name = "lekhak-gui")]
#[command(about = "বাংলা লেখক AI, an AI-assisted Bengali story writing studio", long_about = None)]
struct Args {
    /// Configuration file to use instead of the default location
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => AppConfig::load_from(path),
        None => AppConfig::load(),
    };

    let store = match DraftStore::open_default() {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    let draft = store.load();

    let state = WindowState::state_file_path()
        .and_then(|path| WindowState::load(&path))
        .unwrap_or_default();

    if config.resolve_api_key().is_none() {
        warn!("no Gemini API key configured, story generation will fail until one is set");
    }
    let service: Arc<dyn StoryService> = Arc::new(GeminiClient::from_config(&config));

    let fltk_app = app::App::default();
    let (sender, receiver) = app::channel::<AppAction>();

    let mut wind = window::Window::new(state.x, state.y, state.width, state.height, "বাংলা লেখক AI");
    wind.set_color(enums::Color::from_rgb(255, 255, 255));
    wind.begin();

    let menu_h = menu::setup_menu(state.width, sender);

    let body_h = state.height - menu_h - STATUS_HEIGHT;
    let mut sidebar = GeneratePanel::new(0, menu_h, SIDEBAR_WIDTH, body_h);

    let content_x = SIDEBAR_WIDTH;
    let content_w = state.width - SIDEBAR_WIDTH;

    let mut title = input::Input::new(content_x + 16, menu_h + 10, content_w - 145, 36, None);
    title.set_frame(enums::FrameType::FlatBox);
    title.set_text_font(enums::Font::HelveticaBold);
    title.set_text_size(22);
    title.set_text_color(enums::Color::from_rgb(31, 41, 55));
    title.set_tooltip("গল্পের শিরোনাম");
    title.set_trigger(enums::CallbackTrigger::Changed);
    title.set_callback(move |_| sender.send(AppAction::TitleChanged));

    let mut save_button = button::Button::new(state.width - 402, menu_h + 10, 56, 36, "সেভ");
    style_toolbar_button(&mut save_button, "খসড়া সেভ করুন (Ctrl+S)");
    save_button.set_callback(move |_| sender.send(AppAction::SaveDraft));

    let mut undo_button = button::Button::new(state.width - 340, menu_h + 10, 40, 36, "↶");
    style_toolbar_button(&mut undo_button, "আনডু (Ctrl+Z)");
    undo_button.set_label_size(18);
    undo_button.set_callback(move |_| sender.send(AppAction::Undo));

    let mut redo_button = button::Button::new(state.width - 294, menu_h + 10, 40, 36, "↷");
    style_toolbar_button(&mut redo_button, "রিডু (Ctrl+Shift+Z)");
    redo_button.set_label_size(18);
    redo_button.set_callback(move |_| sender.send(AppAction::Redo));

    let mut print_button = button::Button::new(state.width - 248, menu_h + 10, 48, 36, "PDF");
    style_toolbar_button(&mut print_button, "প্রিন্ট / PDF এক্সপোর্ট");
    print_button.set_callback(move |_| sender.send(AppAction::Export(ExportKind::Print)));

    let mut word_button = button::Button::new(state.width - 194, menu_h + 10, 56, 36, "Word");
    style_toolbar_button(&mut word_button, "Word ফাইলে এক্সপোর্ট");
    word_button.set_callback(move |_| sender.send(AppAction::Export(ExportKind::Word)));

    let mut text_button = button::Button::new(state.width - 140, menu_h + 10, 48, 36, "TXT");
    style_toolbar_button(&mut text_button, "টেক্সট ফাইলে এক্সপোর্ট");
    text_button.set_callback(move |_| sender.send(AppAction::Export(ExportKind::Text)));

    let mut clear_button = button::Button::new(state.width - 76, menu_h + 10, 60, 36, "মুছুন");
    style_toolbar_button(&mut clear_button, "সব মুছে ফেলুন");
    clear_button.set_color(enums::Color::from_rgb(254, 242, 242));
    clear_button.set_label_color(enums::Color::from_rgb(220, 38, 38));
    clear_button.set_callback(move |_| sender.send(AppAction::ClearStory));

    let editor_y = menu_h + TITLE_BAR_HEIGHT;
    let editor_h = body_h - TITLE_BAR_HEIGHT - PANEL_HEIGHT;
    let mut editor = StoryEditor::new(content_x, editor_y, content_w, editor_h, state.text_size);
    editor.on_change(move || sender.send(AppAction::EditorChanged));

    // TextEditor has its own Ctrl+Z binding, which would bypass the
    // snapshot history. Catch the chords before the widget sees them.
    editor.widget_mut().handle(move |_, ev| {
        if ev != enums::Event::KeyDown {
            return false;
        }
        let key = app::event_key();
        let state = app::event_state();
        #[cfg(target_os = "macos")]
        let cmd = state.contains(enums::Shortcut::Command);
        #[cfg(not(target_os = "macos"))]
        let cmd = state.contains(enums::Shortcut::Ctrl);
        if cmd && (key == enums::Key::from_char('z') || key == enums::Key::from_char('Z')) {
            if state.contains(enums::Shortcut::Shift) {
                sender.send(AppAction::Redo);
            } else {
                sender.send(AppAction::Undo);
            }
            return true;
        }
        if cmd && key == enums::Key::from_char('y') {
            sender.send(AppAction::Redo);
            return true;
        }
        false
    });

    let mut refine = RefinePanel::new(content_x, editor_y + editor_h, content_w, PANEL_HEIGHT);
    let mut statusbar = StatusBar::new(0, state.height - STATUS_HEIGHT, state.width, STATUS_HEIGHT);

    wind.end();

    let editor_widget = editor.widget();
    wind.resizable(&editor_widget);

    sidebar.on_generate(move || sender.send(AppAction::Generate));
    refine.on_rewrite(move || sender.send(AppAction::Rewrite));
    refine.on_quick_feedback(move |instruction| sender.send(AppAction::QuickRewrite(instruction)));
    statusbar.on_save_click(move || sender.send(AppAction::SaveDraft));

    // The close button must go through Quit so the draft gets saved.
    // Escape also lands here and is ignored.
    wind.set_callback(move |_| {
        if app::event() == enums::Event::Close {
            sender.send(AppAction::Quit);
        }
    });
    wind.handle(move |_, event| {
        if event == enums::Event::Resize {
            sender.send(AppAction::Relayout);
        }
        false
    });

    wind.show();

    // Autosave heartbeat, also keeps the relative save time fresh
    app::add_timeout3(0.5, move |handle| {
        sender.send(AppAction::AutosaveTick);
        app::repeat_timeout3(0.5, handle);
    });

    let ui = Ui {
        window: wind,
        sidebar,
        title,
        save_button,
        undo_button,
        redo_button,
        print_button,
        word_button,
        text_button,
        clear_button,
        editor,
        refine,
        statusbar,
    };
    let mut controller = App::new(ui, store, service, sender, draft, state.text_size);

    info!(model = %config.model, "ready");

    while fltk_app.wait() {
        if let Some(action) = receiver.recv() {
            controller.handle(action);
        }
    }
}

fn style_toolbar_button(button: &mut button::Button, tooltip: &str) {
    button.set_frame(enums::FrameType::FlatBox);
    button.set_color(enums::Color::from_rgb(243, 244, 246));
    button.set_label_size(12);
    button.set_label_color(enums::Color::from_rgb(55, 65, 81));
    button.set_tooltip(tooltip);
}
