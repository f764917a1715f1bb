mod genre_select;
mod notice;

pub use genre_select::GenreSelect;
pub use notice::{Alert, AlertKind, Notice, NOTICE_DURATION};
