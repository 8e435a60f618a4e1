pub mod achievements;
pub mod bookmarks;
pub mod deities;
pub mod digest;
pub mod mastery;
pub mod pantheons;
pub mod quiz;
pub mod recommend;
pub mod review;
pub mod search;
pub mod serve;
pub mod show;
pub mod stats;
pub mod stories;
pub mod sync;
pub mod tales;
