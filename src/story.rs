// Core story domain types: genre/length/tone descriptors, rewrite
// intensity, title extraction from generated text, and reader-facing
// text statistics.

use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

/// Genre labels are shown verbatim in the UI and sent verbatim to the
/// model, so they carry both the Bengali name and an English hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoryGenre {
    #[default]
    Romance,
    Thriller,
    Horror,
    Drama,
    Adult,
    Mystery,
    SciFi,
}

impl StoryGenre {
    pub const ALL: [StoryGenre; 7] = [
        StoryGenre::Romance,
        StoryGenre::Thriller,
        StoryGenre::Horror,
        StoryGenre::Drama,
        StoryGenre::Adult,
        StoryGenre::Mystery,
        StoryGenre::SciFi,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            StoryGenre::Romance => "রোমান্স (Romance)",
            StoryGenre::Thriller => "থ্রিলার (Thriller)",
            StoryGenre::Horror => "ভৌতিক (Horror)",
            StoryGenre::Drama => "নাটকীয় (Drama)",
            StoryGenre::Adult => "প্রাপ্তবয়স্ক / ১৮+ (Adult 18+)",
            StoryGenre::Mystery => "রহস্য (Mystery)",
            StoryGenre::SciFi => "কল্পবিজ্ঞান (Sci-Fi)",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoryLength {
    Short,
    #[default]
    Medium,
    Long,
}

impl StoryLength {
    pub const ALL: [StoryLength; 3] = [StoryLength::Short, StoryLength::Medium, StoryLength::Long];

    pub fn label(&self) -> &'static str {
        match self {
            StoryLength::Short => "ছোট গল্প (Short Story)",
            StoryLength::Medium => "মাঝারি (Medium)",
            StoryLength::Long => "উপন্যাস (Novel/Long Story)",
        }
    }
}

/// How aggressively a rewrite may depart from the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Intensity {
    #[default]
    Slight,
    Major,
}

impl Intensity {
    pub const ALL: [Intensity; 2] = [Intensity::Slight, Intensity::Major];

    pub fn label(&self) -> &'static str {
        match self {
            Intensity::Slight => "সামান্য (Slight)",
            Intensity::Major => "আমূল (Major)",
        }
    }
}

pub const DEFAULT_TONE: &str = "আবেগপ্রবণ (Emotional)";

/// Everything a fresh generation request needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryParams {
    pub prompt: String,
    pub genre: StoryGenre,
    pub length: StoryLength,
    pub tone: String,
}

/// Everything a rewrite request needs. `keywords` may be empty, in which
/// case no keyword clause is sent. `iterative` marks a follow-up to an
/// earlier rewrite so the model treats the instruction as new feedback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteParams {
    pub source: String,
    pub instruction: String,
    pub intensity: Intensity,
    pub keywords: String,
    pub iterative: bool,
}

/// One-tap rewrite instructions shown under the refine panel.
pub const QUICK_FEEDBACKS: [(&str, &str); 6] = [
    ("আরও বিস্তারিত", "আরও বিস্তারিত এবং বর্ণনামূলক করো"),
    ("অল্প কথায়", "অল্প কথায় সারসংক্ষেপ করো"),
    ("ভাষা সহজ", "ভাষা আরও সহজ এবং সাবলীল করো"),
    ("নাটকীয়", "আরও নাটকীয়তা এবং উত্তেজনা বাড়াও"),
    ("আবেগপ্রবণ", "আবেগ এবং অনুভূতির ওপর জোর দাও"),
    ("সংলাপ যোগ", "সংলাপ বা কথোপকথন বাড়িয়ে দাও"),
];

/// Split a generated story into title and body.
///
/// Returns `(Some(title), body)` when a title line was recognized, either
/// an explicit `শিরোনাম:`/`Title:` line anywhere in the text or a short
/// first line followed by more text. Returns `(None, raw)` untouched when
/// no title could be recognized, so callers can keep whatever title the
/// user already had.
pub fn split_title(raw: &str) -> (Option<String>, String) {
    let title_line = Regex::new(r"(?m)^(?:শিরোনাম|Title):\s*(.*)$").unwrap();
    if let Some(caps) = title_line.captures(raw) {
        let title = caps.get(1).map_or("", |m| m.as_str()).trim().to_string();
        let body = raw
            .replacen(caps.get(0).map_or("", |m| m.as_str()), "", 1)
            .trim()
            .to_string();
        return (Some(title), body);
    }

    let first_line = raw.lines().next().unwrap_or("");
    if first_line.chars().count() < 100 && raw.lines().count() > 1 {
        let body = raw
            .lines()
            .skip(1)
            .collect::<Vec<_>>()
            .join("\n")
            .trim()
            .to_string();
        return (Some(first_line.trim().to_string()), body);
    }

    (None, raw.to_string())
}

/// Reader-facing counters for the status bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextStats {
    pub words: usize,
    pub graphemes: usize,
    pub reading_minutes: usize,
}

/// Word count is whitespace-separated tokens. Reading time assumes 180
/// words per minute, rounded up. Graphemes count extended clusters, so
/// a Bengali consonant with its vowel sign counts as one character.
pub fn text_stats(content: &str) -> TextStats {
    let trimmed = content.trim();
    let words = if trimmed.is_empty() {
        0
    } else {
        trimmed.split_whitespace().count()
    };

    TextStats {
        words,
        graphemes: trimmed.graphemes(true).count(),
        reading_minutes: words.div_ceil(180),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_title_from_labeled_line() {
        let raw = "শিরোনাম: ছায়া\n\nএকদিন অন্ধকারে...";

        let (title, body) = split_title(raw);
        assert_eq!(title.as_deref(), Some("ছায়া"));
        assert_eq!(body, "একদিন অন্ধকারে...");
    }

    #[test]
    fn test_split_title_english_label() {
        let raw = "Title: The Shadow\n\nOnce upon a midnight...";

        let (title, body) = split_title(raw);
        assert_eq!(title.as_deref(), Some("The Shadow"));
        assert_eq!(body, "Once upon a midnight...");
    }

    #[test]
    fn test_split_title_labeled_line_not_first() {
        let raw = "ভূমিকা\nশিরোনাম: নদী\nগল্প শুরু";

        let (title, body) = split_title(raw);
        assert_eq!(title.as_deref(), Some("নদী"));
        assert_eq!(body, "ভূমিকা\n\nগল্প শুরু");
    }

    #[test]
    fn test_split_title_short_first_line_fallback() {
        let raw = "ছায়ার গল্প\nএকদিন অন্ধকারে সে হাঁটছিল।";

        let (title, body) = split_title(raw);
        assert_eq!(title.as_deref(), Some("ছায়ার গল্প"));
        assert_eq!(body, "একদিন অন্ধকারে সে হাঁটছিল।");
    }

    #[test]
    fn test_split_title_long_first_line_is_not_a_title() {
        let long_line = "ক".repeat(120);
        let raw = format!("{}\nবাকি অংশ", long_line);

        let (title, body) = split_title(&raw);
        assert_eq!(title, None);
        assert_eq!(body, raw);
    }

    #[test]
    fn test_split_title_single_line_kept_whole() {
        let (title, body) = split_title("শুধু একটি লাইন");
        assert_eq!(title, None);
        assert_eq!(body, "শুধু একটি লাইন");
    }

    #[test]
    fn test_split_title_length_counts_chars_not_bytes() {
        // 50 Bengali characters are 150 UTF-8 bytes but still a short line
        let first = "ক".repeat(50);
        let raw = format!("{}\nগল্পের মূল অংশ", first);

        let (title, _) = split_title(&raw);
        assert_eq!(title, Some(first));
    }

    #[test]
    fn test_text_stats_counts_words_and_reading_time() {
        let stats = text_stats("  এক দুই   তিন\nচার  ");
        assert_eq!(stats.words, 4);
        assert_eq!(stats.reading_minutes, 1);

        assert_eq!(text_stats("").words, 0);
        assert_eq!(text_stats("   ").words, 0);
        assert_eq!(text_stats("").reading_minutes, 0);
    }

    #[test]
    fn test_text_stats_reading_time_rounds_up() {
        let many = vec!["শব্দ"; 181].join(" ");
        assert_eq!(text_stats(&many).reading_minutes, 2);
    }

    #[test]
    fn test_text_stats_graphemes_cluster_vowel_signs() {
        // কা is two code points but renders as one character
        let stats = text_stats("কা");
        assert_eq!(stats.graphemes, 1);
        assert_eq!("কা".chars().count(), 2);
    }
}
