use thiserror::Error;

/// Why a section of the page could not be extracted.
///
/// These never abort a cycle: the caller logs the reason and substitutes the
/// section's default values, so a degraded section is distinguishable from a
/// genuinely measured zero at the log level.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Section keyword '{0}' not found in document")]
    SectionNotFound(&'static str),

    #[error("Section '{0}' has no enclosing container element")]
    ContainerNotFound(&'static str),
}
