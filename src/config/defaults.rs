//! Default values for covtree configuration.

/// Page title when none is configured.
pub const DEFAULT_TITLE: &str = "Code coverage report";

/// Rows are sorted by name unless configured otherwise.
pub const DEFAULT_SORT_KEY: &str = crate::view::PATH_SORT_KEY;

/// Config file names searched for, in order.
pub const CONFIG_FILE_NAMES: &[&str] = &[
    ".covtree.yaml",
    ".covtree.yml",
    "covtree.yaml",
    "covtree.yml",
    ".covtreerc",
];

/// Subdirectory of the user config directory searched for a config file.
pub const CONFIG_DIR_NAME: &str = "covtree";
