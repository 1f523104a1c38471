pub mod io;
pub mod models;
pub mod stages;

pub use io::{SessionError, SessionStats, SpeakerReader, TableError, read_speakers, save_table};
pub use models::{Cell, NameRecord, Roster, Section, Speaker, Table, ToTable};
pub use stages::{
    Classification, ClassifyConfig, ClassifyResult, NamesListConfig, NamesListResult,
    build_names_list, classify, classify_speakers, is_guest, unique_names,
};
