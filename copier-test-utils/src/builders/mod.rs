//! Scenario builders for copy tests

mod scenario;

pub use scenario::{
    CONNECTION_CLOSE_FAILURE, CONNECTION_OPEN_FAILURE, COPY_FAILURE, COPY_PANIC, ScenarioBuilder,
    WRITER_CLOSE_FAILURE, WRITER_OPEN_FAILURE,
};
