use crate::error::SchedulerError;
use crate::shared::usecase::UseCase;
use recur_scheduler_domain::{RRuleFrequency, RRuleOptions, RecurrenceRule};
use recur_scheduler_infra::SchedulerContext;

/// Stores a new named `RecurrenceRule` after making sure both the
/// frequency and the params can be understood.
#[derive(Debug)]
pub struct CreateRuleUseCase {
    pub name: String,
    pub description: String,
    pub frequency: String,
    pub params: String,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    InvalidRule(String),
    StorageError,
}

impl From<UseCaseError> for SchedulerError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidRule(msg) => Self::BadClientData(msg),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateRuleUseCase {
    type Response = RecurrenceRule;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateRule";

    async fn execute(&mut self, ctx: &SchedulerContext) -> Result<Self::Response, Self::Error> {
        let frequency = self
            .frequency
            .parse::<RRuleFrequency>()
            .map_err(|e| UseCaseError::InvalidRule(e.to_string()))?;
        RRuleOptions::parse(&self.params).map_err(|e| UseCaseError::InvalidRule(e.to_string()))?;

        let mut rule = RecurrenceRule::new(&self.name, frequency, &self.params);
        rule.description = self.description.clone();

        ctx.repos
            .rules
            .insert(&rule)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(rule)
    }
}
