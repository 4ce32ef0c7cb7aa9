//! Login step
//!
//! Proves the credential exchange works end to end. The executor has
//! already obtained a token for this step; the step asserts it looks like a
//! signed bearer token.

use async_trait::async_trait;
use carecheck_client::ClientError;
use carecheck_core::domain::context::PipelineContext;
use carecheck_core::domain::run::RunState;
use carecheck_core::domain::step::StepOutcome;
use tracing::info;

use crate::service::StepJournal;
use crate::steps::{Step, StepEnv};

/// Tokens must be strictly longer than this
pub const MIN_LOGIN_TOKEN_CHARS: usize = 100;

/// Characters accepted as segment separators in a bearer token
const TOKEN_SEPARATORS: [char; 1] = ['.'];

/// Characters of the token shown in logs
const PREVIEW_CHARS: usize = 50;

#[derive(Debug, Default)]
pub struct LoginStep;

impl LoginStep {
    pub fn new() -> Self {
        Self
    }

    fn check(token: &str) -> StepOutcome {
        let len = token.chars().count();
        if len <= MIN_LOGIN_TOKEN_CHARS {
            return StepOutcome::fatal(
                format!("a token longer than {} characters", MIN_LOGIN_TOKEN_CHARS),
                format!("{} characters", len),
            );
        }
        if !token.contains(TOKEN_SEPARATORS) {
            return StepOutcome::fatal(
                "a token with at least one '.' separator",
                "no separator",
            );
        }
        StepOutcome::Ok(format!("token obtained ({} characters)", len))
    }
}

#[async_trait]
impl Step for LoginStep {
    fn label(&self) -> &str {
        "Login user"
    }

    fn reached(&self) -> RunState {
        RunState::Authenticated
    }

    async fn execute(
        &self,
        env: StepEnv<'_>,
        _ctx: &mut PipelineContext,
        _journal: &mut StepJournal<'_>,
    ) -> Result<StepOutcome, ClientError> {
        let outcome = Self::check(env.token);
        if !outcome.is_fatal() {
            let preview: String = env.token.chars().take(PREVIEW_CHARS).collect();
            info!("Login successful, token preview: {}...", preview);
        }
        Ok(outcome)
    }
}
