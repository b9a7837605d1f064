//! Interactive project scaffolding for `tpm init`.
//!
//! The flow is split into a pure part and an effectful part. The
//! [`questionnaire`] state machine collects answers into a
//! [`questionnaire::Blueprint`], and [`plan`] turns that into the files and
//! install choices for a new project. The `init` command drives the prompts
//! and performs the effects.

/// Project kinds, frameworks, and plugin tables.
pub mod framework;
/// `.gitignore` maintenance.
pub mod gitignore;
/// Blueprint to project plan conversion.
pub mod plan;
/// Question flow state machine.
pub mod questionnaire;
/// Starter source templates.
pub mod starter;
/// Frontend scaffolding tool invocations.
pub mod tooling;
