// src/config/consts.rs

// Net config
pub const AJAX_URL: &str = "http://isl.org.il/wp-admin/admin-ajax.php";
pub const PLAYLIST_URL: &str = "https://www.youtube.com/playlist";
pub const USER_AGENT: &str = concat!("isl_scrape/", env!("CARGO_PKG_VERSION"));
pub const HTTP_TIMEOUT_SECS: u64 = 30;

// Search sweep
pub const ALPHABET: [char; 22] = [
    'א', 'ב', 'ג', 'ד', 'ה', 'ו', 'ז', 'ח', 'ט', 'י', 'כ',
    'ל', 'מ', 'נ', 'ס', 'ע', 'פ', 'צ', 'ק', 'ר', 'ש', 'ת',
];
/// The server errors out on these: too many matches for a single-letter query.
pub const SKIPPED_LETTERS: &[char] = &['ו'];
pub const SEARCH_REQUEST_PAUSE_MS: u64 = 500;
pub const SOURCE_REQUEST_PAUSE_MS: u64 = 1500; // be polite

// Playlists
pub const CATEGORY_PREFIX: &str = "מילון שפת הסימנים";
pub const TITLE_BOILERPLATE: &[&str] = &[
    "בשפת הסימנים הישראלית - המכון לקידום החרש",
    "מילון שפת הסימנים - ",
];
pub const TITLE_QUOTES: &[char] = &['"', '\''];
pub const PLAYLIST_REQUEST_PAUSE_MS: u64 = 1000;
/// The playlist page stops listing at this many videos.
pub const OVERSIZED_THRESHOLD: usize = 100;

// Local cache
pub const STORE_DIR: &str = ".store";
pub const PLAYLIST_CACHE_SUBDIR: &str = "playlists";
pub const LOG_FILE: &str = ".store/debug.log";
pub const DEFAULT_CHANNEL_FILE: &str = "isl-playlists.html";

// Output
pub const DEFAULT_OUT_DIR: &str = "out";
pub const DEFAULT_VIDEOS_DIR: &str = "videos";

// Media
pub const FFMPEG: &str = "ffmpeg";
pub const VIDEO_BITRATE: &str = "500000";
pub const VIDEO_SCALE: &str = "scale=-2:480";
pub const SOURCE_PREFERENCE: &[&str] = &["video/mp4", "video/webm", "video/ogg"];
