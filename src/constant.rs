// Window size constants
pub const DEFAULT_WINDOW_WIDTH: f32 = 960.0;
pub const DEFAULT_WINDOW_HEIGHT: f32 = 640.0;
pub const DEFAULT_WINDOW_TITLE: &str = "Diff View";

/// Application name and metadata constants
pub const APP_QUALIFIER: &str = "com";
pub const APP_ORGANIZATION: &str = "diff-view";
pub const APP_NAME: &str = "Diff View";

/// Diff option defaults
pub const DEFAULT_TIMEOUT_SECS: f64 = 1.0;
pub const DEFAULT_CLEANUP_EFFICIENCY: u32 = 4;

/// Inline styles used when neither a renderer nor a class is given for a kind
pub const DEFAULT_REMOVE_STYLE: &str =
    "background:#ffaaaa;color:#960000;text-decoration:line-through";
pub const DEFAULT_INSERT_STYLE: &str = "background:#aaffaa;color:#006400";

pub const EXPORT_FILE_NAME: &str = "diff.html";
