use fltk::{
    app,
    enums::Shortcut,
    menu,
    prelude::*,
};

use crate::app::{AppAction, ExportKind};

/// Height the in-window menu bar occupies on non-macOS platforms.
pub const MENU_HEIGHT: i32 = 30;

/// Builds the application menu and returns the vertical space it takes up
/// inside the window. On macOS the menu lives in the system bar.
#[cfg(target_os = "macos")]
pub fn setup_menu(_window_w: i32, sender: app::Sender<AppAction>) -> i32 {
    let mut menu_bar = menu::SysMenuBar::default();
    populate_menu(&mut menu_bar, sender);
    0
}

#[cfg(not(target_os = "macos"))]
pub fn setup_menu(window_w: i32, sender: app::Sender<AppAction>) -> i32 {
    let mut menu_bar = menu::MenuBar::new(0, 0, window_w, MENU_HEIGHT, None);
    menu_bar.set_frame(fltk::enums::FrameType::FlatBox);
    populate_menu(&mut menu_bar, sender);
    MENU_HEIGHT
}

fn populate_menu<M>(menu_bar: &mut M, sender: app::Sender<AppAction>)
where
    M: MenuExt + Clone + 'static,
{
    let cmd = if cfg!(target_os = "macos") {
        Shortcut::Command
    } else {
        Shortcut::Ctrl
    };
    let generate_shortcut = cmd | 'g';
    let save_shortcut = cmd | 's';
    let print_shortcut = cmd | 'p';
    let quit_shortcut = cmd | 'q';
    let undo_shortcut = cmd | 'z';
    let redo_shortcut = cmd | Shortcut::Shift | 'z';
    let rewrite_shortcut = cmd | 'r';
    let bigger_shortcut = cmd | '=';
    let smaller_shortcut = cmd | '-';

    // Story menu
    menu_bar.add(
        "গল্প/নতুন গল্প তৈরি করুন",
        generate_shortcut,
        menu::MenuFlag::Normal,
        move |_| sender.send(AppAction::Generate),
    );

    menu_bar.add(
        "গল্প/_খসড়া সেভ করুন",
        save_shortcut,
        menu::MenuFlag::Normal,
        move |_| sender.send(AppAction::SaveDraft),
    );

    // The label slash would otherwise start a submenu
    menu_bar.add(
        "গল্প/প্রিন্ট \\/ PDF…",
        print_shortcut,
        menu::MenuFlag::Normal,
        move |_| sender.send(AppAction::Export(ExportKind::Print)),
    );

    menu_bar.add(
        "গল্প/Word ফাইলে এক্সপোর্ট…",
        Shortcut::None,
        menu::MenuFlag::Normal,
        move |_| sender.send(AppAction::Export(ExportKind::Word)),
    );

    menu_bar.add(
        "গল্প/_টেক্সট ফাইলে এক্সপোর্ট…",
        Shortcut::None,
        menu::MenuFlag::Normal,
        move |_| sender.send(AppAction::Export(ExportKind::Text)),
    );

    {
        #[cfg(not(target_os = "macos"))]
        let label = "গল্প/_সব মুছে ফেলুন";
        // macOS keeps Quit in the application menu, so no divider here
        #[cfg(target_os = "macos")]
        let label = "গল্প/সব মুছে ফেলুন";
        menu_bar.add(label, Shortcut::None, menu::MenuFlag::Normal, move |_| {
            sender.send(AppAction::ClearStory)
        });
    }

    #[cfg(not(target_os = "macos"))]
    menu_bar.add(
        "গল্প/প্রস্থান",
        quit_shortcut,
        menu::MenuFlag::Normal,
        move |_| sender.send(AppAction::Quit),
    );

    // Edit menu
    menu_bar.add(
        "সম্পাদনা/আনডু",
        undo_shortcut,
        menu::MenuFlag::Normal,
        move |_| sender.send(AppAction::Undo),
    );

    menu_bar.add(
        "সম্পাদনা/_রিডু",
        redo_shortcut,
        menu::MenuFlag::Normal,
        move |_| sender.send(AppAction::Redo),
    );

    menu_bar.add(
        "সম্পাদনা/এআই পুনর্লিখন",
        rewrite_shortcut,
        menu::MenuFlag::Normal,
        move |_| sender.send(AppAction::Rewrite),
    );

    // View menu
    menu_bar.add(
        "দেখুন/লেখা বড় করুন",
        bigger_shortcut,
        menu::MenuFlag::Normal,
        move |_| sender.send(AppAction::TextSizeUp),
    );

    menu_bar.add(
        "দেখুন/লেখা ছোট করুন",
        smaller_shortcut,
        menu::MenuFlag::Normal,
        move |_| sender.send(AppAction::TextSizeDown),
    );
}
