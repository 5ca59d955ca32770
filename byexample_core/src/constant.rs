pub(crate) const HELP_SHORT: &str = "-h";
pub(crate) const HELP_LONG: &str = "--help";

pub(crate) const USAGE_MARKER: &str = "Usage:";
pub(crate) const OPTIONS_PLACEHOLDER: &str = "[options]";
pub(crate) const PROGRAM_PLACEHOLDER: &str = "$0";
pub(crate) const ELLIPSIS: &str = "...";
pub(crate) const DEFAULT_ANNOTATION: &str = "(default";

// `-15` is shorthand for `-n 15`.
pub(crate) const NUMERIC_SHORTHAND: &str = "-n";

pub(crate) const INTEGER_PLACEHOLDER: &str = "NUM";
pub(crate) const DATE_PLACEHOLDER: &str = "DATE";
pub(crate) const TIME_PLACEHOLDER: &str = "TIME";

pub(crate) const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%Y%m%d"];
pub(crate) const TIME_FORMATS: [&str; 3] = ["%H:%M:%S", "%H:%M:%S%.f", "%H:%M"];

pub(crate) const ERROR_PREFIX: &str = "ERROR: ";
