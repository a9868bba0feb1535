//! # MPC export reformatting
//!
//! Turns raw exports of the MPC observation and orbit tables into the three sample files
//! read by [`sample_data`](crate::sample_data):
//!
//! | Module                | Role                                                       |
//! |-----------------------|------------------------------------------------------------|
//! | [`obs80`]             | parse one 80-column optical observation                    |
//! | [`raw`]               | CSV readers for the observation and orbit exports          |
//! | [`tracklet_builder`]  | angular separations and rates between tracklet detections  |
//! | [`pipeline`]          | batched end-to-end run and its summary                     |
pub mod obs80;
pub mod pipeline;
pub mod raw;
pub mod tracklet_builder;
