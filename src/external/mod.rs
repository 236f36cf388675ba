pub mod gemini;
pub mod omdb;

/// Placeholder stored for any movie field the movie-info source does not provide.
pub const NOT_AVAILABLE: &str = "N/A";

/// Title carried by the record returned when the movie-info source has no match.
pub const NOT_FOUND_TITLE: &str = "NOT FOUND";
