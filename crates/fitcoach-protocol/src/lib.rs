//! Shared data shapes for fitcoach logs, chat messages, and structured metrics.
//!
//! Everything here is plain data plus the free-text field extractor, so the
//! memory, core, and CLI crates agree on one wire shape.

mod extract;
mod log;
mod structured;

pub use extract::{extract_doms, extract_structured};
pub use log::{Attachment, ChatMessage, ChatRole, LogId, LogRecord, LogType, ParseLogTypeError};
pub use structured::{
    BodyMeasurements, Exercise, MetricKind, NutritionData, ParseMetricError, RecoveryData,
    StrengthTraining, StructuredData, WorkoutSet,
};
