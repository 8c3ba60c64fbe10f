pub mod capture;
pub mod config;
pub mod info;
pub mod stack;
pub mod video;

/// Split a comma-separated extension list, dropping blanks and leading dots.
pub fn parse_extensions(list: &str) -> Vec<String> {
    list.split(',')
        .map(|s| s.trim().trim_start_matches('.'))
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
