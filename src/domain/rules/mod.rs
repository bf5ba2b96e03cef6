// Domain rules - Clip pre-flight checks

use crate::domain::errors::*;
use crate::domain::model::*;

/// Business rules for clip validation
pub struct ClipValidator;

impl ClipValidator {
    /// Validate a clip against the source duration.
    ///
    /// Checks run in a fixed order and the first failure is returned:
    /// name, start format, end format, ordering, then duration bound.
    pub fn validate(clip: &Clip, total_duration: f64) -> Result<(), ValidationError> {
        if clip.name.is_empty() {
            return Err(ValidationError::EmptyName);
        }

        let start = TimeSpec::parse(&clip.start_time).map_err(ValidationError::InvalidStart)?;
        let end = TimeSpec::parse(&clip.end_time).map_err(ValidationError::InvalidEnd)?;

        if start.seconds >= end.seconds {
            return Err(ValidationError::NonPositiveRange {
                start: start.seconds,
                end: end.seconds,
            });
        }

        if end.seconds > total_duration {
            return Err(ValidationError::EndBeyondDuration {
                end: end.seconds,
                total: total_duration,
            });
        }

        Ok(())
    }

    /// Validate every clip in order, stopping at the first invalid one
    pub fn validate_all(clips: &[Clip], total_duration: f64) -> Result<(), BatchValidationError> {
        for (index, clip) in clips.iter().enumerate() {
            Self::validate(clip, total_duration).map_err(|source| BatchValidationError {
                index,
                name: clip.name.clone(),
                source,
            })?;
        }
        Ok(())
    }

    /// Names used by more than one clip, in first-seen order
    pub fn duplicate_names(clips: &[Clip]) -> Vec<String> {
        let mut seen = std::collections::HashSet::new();
        let mut duplicates = Vec::new();
        for clip in clips {
            if !seen.insert(clip.name.as_str()) && !duplicates.contains(&clip.name) {
                duplicates.push(clip.name.clone());
            }
        }
        duplicates
    }
}
