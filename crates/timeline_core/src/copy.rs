//! User-facing strings. Error states only ever show these, never raw causes.

pub const HEADER_TITLE: &str = "Your Music Timeline";
pub const HEADER_SUBTITLE: &str = "Songs tied to real moments in your life.";

pub const STATS_TITLE: &str = "Memories Saved";
pub const RECENT_TITLE: &str = "Most Recent Memory";
pub const RECENT_EMPTY_NOTE: &str = "No note added for this memory.";

pub const EMPTY_TITLE: &str = "Your timeline is empty";
pub const EMPTY_BODY: &str = "Add a song that reminds you of a moment, we'll organize it by year.";
pub const EMPTY_FILTERED_TITLE: &str = "No memories yet";
pub const EMPTY_FILTERED_BODY: &str = "No memories saved for this year.";

pub const LOADING_TEXT: &str = "Loading your memories…";

pub const ERROR_TITLE: &str = "Couldn't load your timeline";
pub const ERROR_BODY: &str = "Please check your connection and try again.";

pub fn distinct_years_note(distinct_years: usize) -> String {
    match distinct_years {
        1 => "1 different year".to_string(),
        n => format!("{n} different years"),
    }
}
