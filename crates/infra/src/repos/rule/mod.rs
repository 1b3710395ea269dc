mod inmemory;

pub use inmemory::InMemoryRuleRepo;
use recur_scheduler_domain::{RecurrenceRule, ID};

#[async_trait::async_trait]
pub trait IRuleRepo: Send + Sync {
    async fn insert(&self, rule: &RecurrenceRule) -> anyhow::Result<()>;
    async fn find(&self, rule_id: &ID) -> Option<RecurrenceRule>;
}

#[cfg(test)]
mod tests {
    use crate::SchedulerContext;
    use recur_scheduler_domain::{RRuleFrequency, RecurrenceRule, ID};

    #[tokio::test]
    async fn create_and_find() {
        let ctx = SchedulerContext::create_inmemory();
        let rule = RecurrenceRule::new("Every other week", RRuleFrequency::Weekly, "interval:2");

        assert!(ctx.repos.rules.insert(&rule).await.is_ok());

        let res = ctx.repos.rules.find(&rule.id).await.unwrap();
        assert_eq!(res.name, rule.name);
        assert_eq!(res.params, "interval:2");
        assert!(ctx.repos.rules.find(&ID::new()).await.is_none());
    }
}
