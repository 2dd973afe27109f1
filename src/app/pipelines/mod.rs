pub mod day_pipeline;
